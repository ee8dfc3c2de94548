//! GST (Goods and Services Tax) splitting for Indian tax compliance
//!
//! Intra-state sales are taxed as CGST plus SGST; inter-state sales are
//! taxed as IGST at the combined rate. Which side applies is decided by
//! comparing the counterparty's state against the seller's home state.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{BillingError, BillingResult};

/// The seller's registered state
pub const HOME_STATE: &str = "Karnataka";

/// Whether a counterparty state is the seller's home state
///
/// The comparison trims surrounding whitespace and ignores ASCII case, so
/// `" KARNATAKA "` is home-state. An empty state (no party selected yet)
/// is not.
pub fn is_home_state(state: &str) -> bool {
    state.trim().eq_ignore_ascii_case(HOME_STATE)
}

/// GST percentage rates, fetched once per editing session from settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRates {
    /// CGST rate percentage (Central GST)
    pub cgst: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst: BigDecimal,
}

impl GstRates {
    /// Create a new rate configuration
    pub fn new(cgst: BigDecimal, sgst: BigDecimal) -> Self {
        Self { cgst, sgst }
    }

    /// IGST rate percentage, always the combined CGST and SGST rates
    pub fn igst(&self) -> BigDecimal {
        &self.cgst + &self.sgst
    }

    /// Validate that the rate configuration is usable
    pub fn validate(&self) -> BillingResult<()> {
        if self.cgst < BigDecimal::from(0) || self.sgst < BigDecimal::from(0) {
            return Err(BillingError::InvalidRate(format!(
                "GST rates cannot be negative: cgst = {}, sgst = {}",
                self.cgst, self.sgst
            )));
        }

        if self.igst() > BigDecimal::from(100) {
            return Err(BillingError::InvalidRate(format!(
                "Combined GST rate cannot exceed 100%: {}",
                self.igst()
            )));
        }

        Ok(())
    }
}

impl Default for GstRates {
    /// The standard 18% services rate, split 9% + 9%
    fn default() -> Self {
        Self::new(BigDecimal::from(9), BigDecimal::from(9))
    }
}

/// Tax amounts split across the three GST components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_amount: BigDecimal,
}

impl TaxBreakdown {
    /// Split tax on a taxable amount by the counterparty's state
    ///
    /// Home-state counterparties pay CGST plus SGST; everyone else pays
    /// IGST at the combined rate. A negative taxable amount produces
    /// negative tax components, uncapped.
    pub fn split(taxable_amount: &BigDecimal, state: &str, rates: &GstRates) -> Self {
        let hundred = BigDecimal::from(100);
        let zero = BigDecimal::from(0);

        if is_home_state(state) {
            Self {
                cgst_amount: taxable_amount * &rates.cgst / &hundred,
                sgst_amount: taxable_amount * &rates.sgst / &hundred,
                igst_amount: zero,
            }
        } else {
            Self {
                cgst_amount: zero.clone(),
                sgst_amount: zero,
                igst_amount: taxable_amount * rates.igst() / &hundred,
            }
        }
    }

    /// Total tax across all components
    pub fn total(&self) -> BigDecimal {
        &self.cgst_amount + &self.sgst_amount + &self.igst_amount
    }
}
