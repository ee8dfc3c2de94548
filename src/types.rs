//! Core types and data structures for the billing system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a catalog item is measured when it is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Priced per unit of height plus per unit of width (e.g. glass panels)
    HeightWidth,
    /// Priced per kilogram
    Kg,
    /// Priced per piece
    Unit,
}

/// Measurements entered for a billed line, kept as the free text the user
/// typed and parsed on every recompute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Measurement {
    HeightWidth { height: String, width: String },
    Kg { kg: String },
    Unit { units: String },
}

impl Measurement {
    /// Blank measurement of the given kind
    pub fn empty(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::HeightWidth => Measurement::HeightWidth {
                height: String::new(),
                width: String::new(),
            },
            MeasurementKind::Kg => Measurement::Kg { kg: String::new() },
            MeasurementKind::Unit => Measurement::Unit {
                units: String::new(),
            },
        }
    }

    /// The measurement kind this value belongs to
    pub fn kind(&self) -> MeasurementKind {
        match self {
            Measurement::HeightWidth { .. } => MeasurementKind::HeightWidth,
            Measurement::Kg { .. } => MeasurementKind::Kg,
            Measurement::Unit { .. } => MeasurementKind::Unit,
        }
    }
}

/// Unit pricing of a catalog item, one variant per measurement kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemPricing {
    HeightWidth {
        price_per_height: BigDecimal,
        price_per_width: BigDecimal,
    },
    Kg {
        price_per_kg: BigDecimal,
    },
    Unit {
        price_per_unit: BigDecimal,
    },
}

impl ItemPricing {
    /// The measurement kind billed lines of this item must carry
    pub fn kind(&self) -> MeasurementKind {
        match self {
            ItemPricing::HeightWidth { .. } => MeasurementKind::HeightWidth,
            ItemPricing::Kg { .. } => MeasurementKind::Kg,
            ItemPricing::Unit { .. } => MeasurementKind::Unit,
        }
    }
}

/// Inventory item, read-only to the pricing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identifier, captured onto billed lines at add-time
    pub id: String,
    /// Display name, denormalized onto billed lines as a label
    pub name: String,
    /// Unit prices for the item's measurement kind
    pub pricing: ItemPricing,
}

impl CatalogItem {
    /// Create a new catalog item
    pub fn new(id: impl Into<String>, name: impl Into<String>, pricing: ItemPricing) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pricing,
        }
    }
}

/// Read-only snapshot of the catalog, loaded once per editing session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create a catalog snapshot from loaded items
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Look up an item by its stable identifier
    pub fn find(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Look up an item by display name
    ///
    /// Only used when rehydrating documents saved before stable item ids
    /// existed; a rename or duplicate name can mis-bind here.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// All items in the snapshot
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// Per-line discount interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DiscountType {
    /// Percentage of the line's gross total
    #[default]
    #[serde(rename = "%")]
    Percent,
    /// Absolute rupee amount, not scaled by quantity
    #[serde(rename = "₹")]
    Flat,
}

/// Waste charged on top of a line's base amount
///
/// The amount is derived from the waste measurements until the user types
/// a value directly, at which point the typed value is authoritative until
/// a waste measurement changes again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WasteState {
    Disabled,
    Derived {
        measurement: Measurement,
        amount: BigDecimal,
    },
    Overridden {
        measurement: Measurement,
        amount: BigDecimal,
    },
}

impl WasteState {
    /// Whether waste is charged on the line
    pub fn is_enabled(&self) -> bool {
        !matches!(self, WasteState::Disabled)
    }

    /// The waste measurements, if waste is enabled
    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            WasteState::Disabled => None,
            WasteState::Derived { measurement, .. }
            | WasteState::Overridden { measurement, .. } => Some(measurement),
        }
    }

    /// The current waste amount, if waste is enabled
    pub fn amount(&self) -> Option<&BigDecimal> {
        match self {
            WasteState::Disabled => None,
            WasteState::Derived { amount, .. } | WasteState::Overridden { amount, .. } => {
                Some(amount)
            }
        }
    }
}

/// One line of an invoice, quotation, or purchase being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilledLine {
    /// Client-generated identifier, unique within the working document
    pub id: Uuid,
    /// Stable catalog item identifier captured at add-time
    pub item_id: String,
    /// Display name copied from the catalog item at add-time
    pub name: String,
    /// Billed quantity; zero is treated as one
    pub quantity: u32,
    /// Measurements for the item's kind; the kind is fixed at add-time
    pub measurement: Measurement,
    /// Waste charged on top of the base amount
    pub waste: WasteState,
    /// Per-line discount as entered, aggregated at document level
    pub discount: String,
    /// How the discount text is interpreted
    pub discount_type: DiscountType,
    /// Base amount plus waste, recomputed on every edit
    pub gross_total: BigDecimal,
    /// Equal to the gross total; the discount nets out in the aggregate
    pub net_total: BigDecimal,
}

impl BilledLine {
    /// Create a fresh line for a catalog item at quantity one
    pub fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            quantity: 1,
            measurement: Measurement::empty(item.pricing.kind()),
            waste: WasteState::Disabled,
            discount: "0".to_string(),
            discount_type: DiscountType::default(),
            gross_total: BigDecimal::from(0),
            net_total: BigDecimal::from(0),
        }
    }

    /// Quantity with the zero-means-one default applied
    pub fn effective_quantity(&self) -> u32 {
        if self.quantity == 0 {
            1
        } else {
            self.quantity
        }
    }
}

/// Whether a counterparty is a customer or a vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Customer,
    Vendor,
}

/// Counterparty on a document; the state decides the tax split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub gstin: String,
    pub billing_address: String,
    /// Free text, expected to match an Indian state name
    pub state: String,
    pub kind: PartyKind,
}

impl Party {
    /// Create a customer with empty contact fields
    pub fn customer(
        id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: String::new(),
            gstin: String::new(),
            billing_address: String::new(),
            state: state.into(),
            kind: PartyKind::Customer,
        }
    }

    /// Create a vendor with empty contact fields
    pub fn vendor(
        id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            kind: PartyKind::Vendor,
            ..Self::customer(id, name, state)
        }
    }
}

/// The kinds of billing document the editor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quotation,
    Purchase,
}

impl DocumentKind {
    /// The counterparty kind this document is written against
    pub fn party_kind(&self) -> PartyKind {
        match self {
            DocumentKind::Purchase => PartyKind::Vendor,
            DocumentKind::Invoice | DocumentKind::Quotation => PartyKind::Customer,
        }
    }
}

/// Errors that can occur in the billing system
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    #[error("Invalid GST rate: {0}")]
    InvalidRate(String),
}

/// Result type for billing operations
pub type BillingResult<T> = Result<T, BillingError>;
