//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::document::snapshot::DocumentSnapshot;
use crate::tax::gst::GstRates;
use crate::types::*;

/// Storage abstraction for the billing system
///
/// This trait allows the billing core to work with any storage backend
/// (a cloud document store, SQL, in-memory, etc.) by implementing these
/// methods. All I/O failures are reported as errors; nothing in the
/// pricing core itself performs I/O.
#[async_trait]
pub trait BillingStorage: Send + Sync {
    /// Persist a new document and return its storage identifier
    async fn create_document(&mut self, snapshot: &DocumentSnapshot) -> BillingResult<String>;

    /// Overwrite an existing document
    async fn update_document(
        &mut self,
        document_id: &str,
        snapshot: &DocumentSnapshot,
    ) -> BillingResult<()>;

    /// Fetch a document by identifier
    async fn get_document(&self, document_id: &str) -> BillingResult<Option<DocumentSnapshot>>;

    /// List documents, optionally filtered by kind
    async fn list_documents(
        &self,
        kind: Option<DocumentKind>,
    ) -> BillingResult<Vec<DocumentSnapshot>>;

    /// Delete a document
    async fn delete_document(&mut self, document_id: &str) -> BillingResult<()>;

    /// Load the inventory catalog
    async fn list_catalog_items(&self) -> BillingResult<Vec<CatalogItem>>;

    /// List counterparties, optionally filtered by kind
    async fn list_parties(&self, kind: Option<PartyKind>) -> BillingResult<Vec<Party>>;

    /// Fetch the configured GST rates
    async fn gst_rates(&self) -> BillingResult<GstRates>;
}

/// Trait for implementing custom pre-save document validation rules
pub trait DocumentValidator: Send + Sync {
    /// Validate a document before any storage call is attempted
    fn validate(&self, party: Option<&Party>, lines: &[BilledLine]) -> BillingResult<()>;
}

/// Default document validator with the baseline save requirements
pub struct DefaultDocumentValidator;

impl DocumentValidator for DefaultDocumentValidator {
    fn validate(&self, party: Option<&Party>, lines: &[BilledLine]) -> BillingResult<()> {
        if party.is_none() {
            return Err(BillingError::Validation(
                "Select a customer or vendor before saving".to_string(),
            ));
        }

        if lines.is_empty() {
            return Err(BillingError::Validation(
                "Add at least one item before saving".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, ItemPricing};
    use bigdecimal::BigDecimal;

    #[test]
    fn test_default_validator_requires_party_and_lines() {
        let validator = DefaultDocumentValidator;
        let party = Party::customer("cus-1", "Acme Traders", "Karnataka");
        let item = CatalogItem::new(
            "itm-1",
            "Bolt",
            ItemPricing::Unit {
                price_per_unit: BigDecimal::from(5),
            },
        );
        let line = BilledLine::from_catalog(&item);

        assert!(validator.validate(None, &[line.clone()]).is_err());
        assert!(validator.validate(Some(&party), &[]).is_err());
        assert!(validator.validate(Some(&party), &[line]).is_ok());
    }
}
