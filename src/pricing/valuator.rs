//! Line-item valuation and waste adjustment
//!
//! All arithmetic here is total: unknown catalog items, measurement kind
//! mismatches, and malformed numeric text degrade to a zero contribution
//! instead of raising an error, so a half-filled form always prices.

use bigdecimal::BigDecimal;

use crate::types::{BilledLine, Catalog, CatalogItem, ItemPricing, Measurement, WasteState};

/// Parse a free-text numeric field, treating empty or invalid input as zero
pub fn parse_amount(text: &str) -> BigDecimal {
    text.trim()
        .parse::<BigDecimal>()
        .unwrap_or_else(|_| BigDecimal::from(0))
}

/// Value of a measurement against an item's unit prices
///
/// A kind mismatch contributes zero; the editor prevents one from forming,
/// but rehydrated legacy documents are not trusted to hold that invariant.
pub(crate) fn measured_amount(measurement: &Measurement, pricing: &ItemPricing) -> BigDecimal {
    match (measurement, pricing) {
        (
            Measurement::HeightWidth { height, width },
            ItemPricing::HeightWidth {
                price_per_height,
                price_per_width,
            },
        ) => parse_amount(height) * price_per_height + parse_amount(width) * price_per_width,
        (Measurement::Kg { kg }, ItemPricing::Kg { price_per_kg }) => {
            parse_amount(kg) * price_per_kg
        }
        (Measurement::Unit { units }, ItemPricing::Unit { price_per_unit }) => {
            parse_amount(units) * price_per_unit
        }
        _ => BigDecimal::from(0),
    }
}

fn lookup<'a>(line: &BilledLine, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
    catalog
        .find(&line.item_id)
        .or_else(|| catalog.find_by_name(&line.name))
}

/// Base amount of a line: measurements priced by the catalog item,
/// multiplied by the effective quantity
pub fn base_amount(line: &BilledLine, catalog: &Catalog) -> BigDecimal {
    match lookup(line, catalog) {
        Some(item) => {
            measured_amount(&line.measurement, &item.pricing)
                * BigDecimal::from(line.effective_quantity())
        }
        None => BigDecimal::from(0),
    }
}

/// Waste amount of a line
///
/// Derived waste is priced from the waste measurements and is a flat
/// addend per line, never scaled by quantity. An overridden amount is
/// taken verbatim.
pub fn waste_amount(line: &BilledLine, catalog: &Catalog) -> BigDecimal {
    match &line.waste {
        WasteState::Disabled => BigDecimal::from(0),
        WasteState::Overridden { amount, .. } => amount.clone(),
        WasteState::Derived { measurement, .. } => match lookup(line, catalog) {
            Some(item) => measured_amount(measurement, &item.pricing),
            None => BigDecimal::from(0),
        },
    }
}

/// Recompute a line's totals from its current fields
///
/// Refreshes the cached derived waste amount, then sets
/// `gross_total = base + waste` and `net_total = gross_total`.
pub fn recompute_line(line: &mut BilledLine, catalog: &Catalog) {
    let waste = waste_amount(line, catalog);
    if let WasteState::Derived { amount, .. } = &mut line.waste {
        *amount = waste.clone();
    }

    let gross = base_amount(line, catalog) + waste;
    line.net_total = gross.clone();
    line.gross_total = gross;
}
