//! Persisted document shape and rehydration back into editable state
//!
//! Snapshots keep the flat field layout of the stored documents: a
//! `measurement_type` discriminator with optional per-kind fields, the
//! waste fields alongside, and the counterparty denormalized into
//! `customer_*` fields. Every optional field carries a default so
//! partially-populated legacy documents rehydrate without surprises.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::totals::DocumentTotals;
use crate::pricing::valuator::{measured_amount, recompute_line};
use crate::types::{
    BilledLine, Catalog, DiscountType, DocumentKind, Measurement, MeasurementKind, Party,
    WasteState,
};

fn default_quantity() -> u32 {
    1
}

fn default_discount() -> String {
    "0".to_string()
}

fn default_stamp() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// One stored line of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Stable catalog item id; absent on documents saved before it existed
    #[serde(default)]
    pub item_id: Option<String>,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub measurement_type: MeasurementKind,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub kg: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub waste_enabled: bool,
    #[serde(default)]
    pub waste_height: Option<String>,
    #[serde(default)]
    pub waste_width: Option<String>,
    #[serde(default)]
    pub waste_kg: Option<String>,
    #[serde(default)]
    pub waste_units: Option<String>,
    #[serde(default)]
    pub waste_amount: Option<BigDecimal>,
    #[serde(default = "default_discount")]
    pub discount: String,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub gross_total: BigDecimal,
    #[serde(default)]
    pub net_total: BigDecimal,
}

fn flatten(
    measurement: &Measurement,
) -> (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
) {
    match measurement {
        Measurement::HeightWidth { height, width } => {
            (Some(height.clone()), Some(width.clone()), None, None)
        }
        Measurement::Kg { kg } => (None, None, Some(kg.clone()), None),
        Measurement::Unit { units } => (None, None, None, Some(units.clone())),
    }
}

fn unflatten(
    kind: MeasurementKind,
    height: &Option<String>,
    width: &Option<String>,
    kg: &Option<String>,
    units: &Option<String>,
) -> Measurement {
    match kind {
        MeasurementKind::HeightWidth => Measurement::HeightWidth {
            height: height.clone().unwrap_or_default(),
            width: width.clone().unwrap_or_default(),
        },
        MeasurementKind::Kg => Measurement::Kg {
            kg: kg.clone().unwrap_or_default(),
        },
        MeasurementKind::Unit => Measurement::Unit {
            units: units.clone().unwrap_or_default(),
        },
    }
}

impl LineSnapshot {
    /// Serialize an in-memory line back to the stored shape
    pub fn from_line(line: &BilledLine) -> Self {
        let (height, width, kg, units) = flatten(&line.measurement);
        let (waste_height, waste_width, waste_kg, waste_units) = match line.waste.measurement() {
            Some(measurement) => flatten(measurement),
            None => (None, None, None, None),
        };

        Self {
            item_id: Some(line.item_id.clone()),
            name: line.name.clone(),
            quantity: line.quantity,
            measurement_type: line.measurement.kind(),
            height,
            width,
            kg,
            units,
            waste_enabled: line.waste.is_enabled(),
            waste_height,
            waste_width,
            waste_kg,
            waste_units,
            waste_amount: line.waste.amount().cloned(),
            discount: line.discount.clone(),
            discount_type: line.discount_type,
            gross_total: line.gross_total.clone(),
            net_total: line.net_total.clone(),
        }
    }

    /// Rehydrate a stored line into editable state
    ///
    /// Assigns a fresh client id, re-joins the catalog (by stable id,
    /// falling back to the display name for legacy documents), and
    /// recomputes the totals against current catalog prices.
    ///
    /// The stored shape carries no waste-mode marker, so the mode is
    /// recovered by comparison: a stored amount equal to the value derived
    /// from the stored waste fields means derived, anything else means the
    /// user had typed an override.
    pub fn to_line(&self, catalog: &Catalog) -> BilledLine {
        let item_id = match &self.item_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => catalog
                .find_by_name(&self.name)
                .map(|item| item.id.clone())
                .unwrap_or_default(),
        };

        let measurement = unflatten(
            self.measurement_type,
            &self.height,
            &self.width,
            &self.kg,
            &self.units,
        );

        let waste = if !self.waste_enabled {
            WasteState::Disabled
        } else {
            let waste_measurement = unflatten(
                self.measurement_type,
                &self.waste_height,
                &self.waste_width,
                &self.waste_kg,
                &self.waste_units,
            );
            let derived = match catalog.find(&item_id) {
                Some(item) => measured_amount(&waste_measurement, &item.pricing),
                None => BigDecimal::from(0),
            };
            match &self.waste_amount {
                Some(stored) if *stored != derived => WasteState::Overridden {
                    measurement: waste_measurement,
                    amount: stored.clone(),
                },
                _ => WasteState::Derived {
                    measurement: waste_measurement,
                    amount: derived,
                },
            }
        };

        let mut line = BilledLine {
            id: Uuid::new_v4(),
            item_id,
            name: self.name.clone(),
            quantity: self.quantity,
            measurement,
            waste,
            discount: self.discount.clone(),
            discount_type: self.discount_type,
            gross_total: BigDecimal::from(0),
            net_total: BigDecimal::from(0),
        };
        recompute_line(&mut line, catalog);
        line
    }
}

/// A document as persisted: counterparty identity, dates, the line list,
/// and a totals snapshot taken at save time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Storage identifier; absent until the first save
    #[serde(default)]
    pub id: Option<String>,
    pub kind: DocumentKind,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_gstin: String,
    #[serde(default)]
    pub billing_address: String,
    /// The counterparty state the tax split was computed against
    #[serde(default)]
    pub place_of_supply: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub products: Vec<LineSnapshot>,
    #[serde(default)]
    pub totals: DocumentTotals,
    #[serde(default = "default_stamp")]
    pub created_at: NaiveDateTime,
    #[serde(default = "default_stamp")]
    pub updated_at: NaiveDateTime,
}

impl DocumentSnapshot {
    /// Reconstruct the counterparty from the denormalized identity fields
    ///
    /// Returns `None` when the stored document never had a party, which
    /// legacy data permits even though a save today requires one.
    pub fn party(&self) -> Option<Party> {
        if self.customer_id.is_empty() && self.customer_name.is_empty() {
            return None;
        }
        Some(Party {
            id: self.customer_id.clone(),
            name: self.customer_name.clone(),
            phone: self.customer_phone.clone(),
            gstin: self.customer_gstin.clone(),
            billing_address: self.billing_address.clone(),
            state: self.place_of_supply.clone(),
            kind: self.kind.party_kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, ItemPricing};

    fn catalog() -> Catalog {
        Catalog::new(vec![CatalogItem::new(
            "itm-glass",
            "Glass Panel",
            ItemPricing::HeightWidth {
                price_per_height: BigDecimal::from(100),
                price_per_width: BigDecimal::from(50),
            },
        )])
    }

    fn measured_line(catalog: &Catalog) -> BilledLine {
        let mut line = BilledLine::from_catalog(catalog.find("itm-glass").unwrap());
        line.measurement = Measurement::HeightWidth {
            height: "4".to_string(),
            width: "2".to_string(),
        };
        line.quantity = 2;
        recompute_line(&mut line, catalog);
        line
    }

    #[test]
    fn test_round_trip_without_waste() {
        let catalog = catalog();
        let line = measured_line(&catalog);

        let restored = LineSnapshot::from_line(&line).to_line(&catalog);
        assert_ne!(restored.id, line.id);
        assert_eq!(restored.item_id, line.item_id);
        assert_eq!(restored.measurement, line.measurement);
        assert_eq!(restored.waste, WasteState::Disabled);
        assert_eq!(restored.gross_total, BigDecimal::from(900));
    }

    #[test]
    fn test_round_trip_derived_waste() {
        let catalog = catalog();
        let mut line = measured_line(&catalog);
        line.waste = WasteState::Derived {
            measurement: Measurement::HeightWidth {
                height: "1".to_string(),
                width: "0.5".to_string(),
            },
            amount: BigDecimal::from(0),
        };
        recompute_line(&mut line, &catalog);

        let restored = LineSnapshot::from_line(&line).to_line(&catalog);
        assert_eq!(restored.waste, line.waste);
        assert_eq!(restored.gross_total, BigDecimal::from(1025));
    }

    #[test]
    fn test_round_trip_overridden_waste() {
        let catalog = catalog();
        let mut line = measured_line(&catalog);
        line.waste = WasteState::Overridden {
            measurement: Measurement::HeightWidth {
                height: "1".to_string(),
                width: "0.5".to_string(),
            },
            amount: BigDecimal::from(200),
        };
        recompute_line(&mut line, &catalog);

        let restored = LineSnapshot::from_line(&line).to_line(&catalog);
        assert_eq!(restored.waste, line.waste);
        assert_eq!(restored.gross_total, BigDecimal::from(1100));
    }

    #[test]
    fn test_legacy_line_defaults() {
        let catalog = catalog();
        let legacy: LineSnapshot = serde_json::from_value(serde_json::json!({
            "name": "Glass Panel",
            "measurement_type": "height_width",
            "height": "4",
            "width": "2"
        }))
        .unwrap();

        assert_eq!(legacy.quantity, 1);
        assert_eq!(legacy.discount, "0");
        assert_eq!(legacy.discount_type, DiscountType::Percent);
        assert!(!legacy.waste_enabled);

        // No item_id stored; the name fallback re-joins the catalog.
        let line = legacy.to_line(&catalog);
        assert_eq!(line.item_id, "itm-glass");
        assert_eq!(line.gross_total, BigDecimal::from(500));
        assert_eq!(line.waste, WasteState::Disabled);
    }

    #[test]
    fn test_legacy_line_with_unknown_item() {
        let catalog = catalog();
        let legacy: LineSnapshot = serde_json::from_value(serde_json::json!({
            "name": "Removed Item",
            "measurement_type": "kg",
            "kg": "3",
            "waste_enabled": true,
            "waste_kg": "1",
            "waste_amount": "40"
        }))
        .unwrap();

        let line = legacy.to_line(&catalog);
        assert_eq!(line.item_id, "");
        // Nothing to derive against, so the stored amount is an override.
        assert_eq!(
            line.waste,
            WasteState::Overridden {
                measurement: Measurement::Kg {
                    kg: "1".to_string()
                },
                amount: BigDecimal::from(40),
            }
        );
        assert_eq!(line.gross_total, BigDecimal::from(40));
    }

    #[test]
    fn test_snapshot_party_reconstruction() {
        let snapshot: DocumentSnapshot = serde_json::from_value(serde_json::json!({
            "kind": "invoice",
            "customer_id": "cus-1",
            "customer_name": "Acme Traders",
            "place_of_supply": "Karnataka"
        }))
        .unwrap();

        let party = snapshot.party().unwrap();
        assert_eq!(party.id, "cus-1");
        assert_eq!(party.state, "Karnataka");
        assert_eq!(party.kind, crate::types::PartyKind::Customer);
    }

    #[test]
    fn test_snapshot_without_party() {
        let snapshot: DocumentSnapshot =
            serde_json::from_value(serde_json::json!({ "kind": "quotation" })).unwrap();
        assert!(snapshot.party().is_none());
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.totals, DocumentTotals::default());
    }
}
