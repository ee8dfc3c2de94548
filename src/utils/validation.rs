//! Validation utilities

use crate::traits::{DefaultDocumentValidator, DocumentValidator};
use crate::types::*;

/// Validate the contact fields required on a counterparty
pub fn validate_party_contact(party: &Party) -> BillingResult<()> {
    if party.name.trim().is_empty() {
        return Err(BillingError::Validation(
            "Party name cannot be empty".to_string(),
        ));
    }

    if party.phone.trim().is_empty() {
        return Err(BillingError::Validation(
            "Party phone number cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate a GSTIN if one is present
///
/// An empty GSTIN is accepted; unregistered counterparties are common.
/// A non-empty one must be the 15-character format: a two-digit state
/// code followed by thirteen uppercase alphanumerics.
pub fn validate_gstin(gstin: &str) -> BillingResult<()> {
    let gstin = gstin.trim();
    if gstin.is_empty() {
        return Ok(());
    }

    if gstin.len() != 15 {
        return Err(BillingError::Validation(format!(
            "GSTIN must be 15 characters, got {}",
            gstin.len()
        )));
    }

    if !gstin.chars().take(2).all(|c| c.is_ascii_digit()) {
        return Err(BillingError::Validation(
            "GSTIN must start with a two-digit state code".to_string(),
        ));
    }

    if !gstin
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return Err(BillingError::Validation(
            "GSTIN may only contain digits and uppercase letters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced document validator with contact and GSTIN checks on top of
/// the baseline save requirements
pub struct EnhancedDocumentValidator;

impl DocumentValidator for EnhancedDocumentValidator {
    fn validate(&self, party: Option<&Party>, lines: &[BilledLine]) -> BillingResult<()> {
        DefaultDocumentValidator.validate(party, lines)?;

        if let Some(party) = party {
            validate_party_contact(party)?;
            validate_gstin(&party.gstin)?;
        }

        for line in lines {
            if line.name.trim().is_empty() {
                return Err(BillingError::Validation(
                    "Billed lines must carry an item name".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gstin_validation() {
        assert!(validate_gstin("").is_ok());
        assert!(validate_gstin("29ABCDE1234F1Z5").is_ok());
        assert!(validate_gstin("29ABCDE1234F1Z").is_err()); // 14 chars
        assert!(validate_gstin("XXABCDE1234F1Z5").is_err()); // no state code
        assert!(validate_gstin("29abcde1234f1z5").is_err()); // lowercase
    }

    #[test]
    fn test_party_contact_validation() {
        let mut party = Party::customer("cus-1", "Acme Traders", "Karnataka");
        assert!(validate_party_contact(&party).is_err());

        party.phone = "9876543210".to_string();
        assert!(validate_party_contact(&party).is_ok());

        party.name = "  ".to_string();
        assert!(validate_party_contact(&party).is_err());
    }

    #[test]
    fn test_enhanced_validator() {
        use crate::types::{CatalogItem, ItemPricing};
        use bigdecimal::BigDecimal;

        let validator = EnhancedDocumentValidator;
        let mut party = Party::customer("cus-1", "Acme Traders", "Karnataka");
        party.phone = "9876543210".to_string();

        let item = CatalogItem::new(
            "itm-1",
            "Bolt",
            ItemPricing::Unit {
                price_per_unit: BigDecimal::from(5),
            },
        );
        let line = BilledLine::from_catalog(&item);

        assert!(validator.validate(Some(&party), &[line.clone()]).is_ok());

        party.gstin = "not-a-gstin".to_string();
        assert!(validator.validate(Some(&party), &[line]).is_err());
    }
}
