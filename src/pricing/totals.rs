//! Document-level discount aggregation and the tax split
//!
//! Totals are a pure function of the current line list, the counterparty's
//! state, and the GST rate configuration; they are recomputed whole on
//! every change rather than maintained incrementally.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::pricing::valuator::parse_amount;
use crate::tax::gst::{GstRates, TaxBreakdown};
use crate::types::{BilledLine, DiscountType};

/// A line's discount converted to currency
///
/// Percentage discounts apply to the line's gross total; flat discounts
/// are taken as-is and never scaled by quantity. Non-positive parsed
/// discounts contribute zero.
pub fn line_discount(line: &BilledLine) -> BigDecimal {
    let parsed = parse_amount(&line.discount);
    if parsed <= BigDecimal::from(0) {
        return BigDecimal::from(0);
    }

    match line.discount_type {
        DiscountType::Percent => &line.gross_total * parsed / BigDecimal::from(100),
        DiscountType::Flat => parsed,
    }
}

/// Aggregated totals of a working document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentTotals {
    /// Sum of all lines' gross totals
    pub subtotal: BigDecimal,
    /// Sum of all per-line discounts converted to currency
    pub total_discount: BigDecimal,
    /// Subtotal less discount; may go negative, no clamping
    pub taxable_amount: BigDecimal,
    pub cgst_amount: BigDecimal,
    pub sgst_amount: BigDecimal,
    pub igst_amount: BigDecimal,
    /// Taxable amount plus all tax components
    pub net_amount: BigDecimal,
}

impl DocumentTotals {
    /// Aggregate a line list into document totals
    pub fn compute(lines: &[BilledLine], counterparty_state: &str, rates: &GstRates) -> Self {
        let subtotal: BigDecimal = lines.iter().map(|line| &line.gross_total).sum();
        let total_discount: BigDecimal = lines.iter().map(line_discount).sum();
        let taxable_amount = &subtotal - &total_discount;

        let tax = TaxBreakdown::split(&taxable_amount, counterparty_state, rates);
        let net_amount = &taxable_amount + tax.total();

        Self {
            subtotal,
            total_discount,
            taxable_amount,
            cgst_amount: tax.cgst_amount,
            sgst_amount: tax.sgst_amount,
            igst_amount: tax.igst_amount,
            net_amount,
        }
    }
}
