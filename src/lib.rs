//! # Billing Core
//!
//! A billing engine for Indian small businesses providing GST-compliant
//! invoices, quotations, and purchases.
//!
//! ## Features
//!
//! - **Line-item valuation**: height×width, weight, and per-unit pricing
//!   with free-text measurement fields that degrade safely
//! - **Waste adjustment**: derived-from-measurements waste with a
//!   user-override mode per line
//! - **Discount aggregation**: percentage or flat per-line discounts
//!   netted out at document level
//! - **GST splitting**: CGST+SGST for home-state counterparties, IGST
//!   otherwise, from a configurable rate pair
//! - **Document lifecycle**: create, edit, rehydrate, and save invoices,
//!   quotations, and purchases through a storage-agnostic trait
//!
//! ## Quick Start
//!
//! ```rust
//! use billing_core::{
//!     Catalog, CatalogItem, DocumentEditor, DocumentKind, GstRates, ItemPricing, LineEdit,
//!     MeasurementField, Party,
//! };
//! use bigdecimal::BigDecimal;
//!
//! let catalog = Catalog::new(vec![CatalogItem::new(
//!     "itm-1",
//!     "Glass Panel",
//!     ItemPricing::HeightWidth {
//!         price_per_height: BigDecimal::from(100),
//!         price_per_width: BigDecimal::from(50),
//!     },
//! )]);
//!
//! let mut editor = DocumentEditor::new(DocumentKind::Invoice, GstRates::default());
//! editor.select_party(Party::customer("cus-1", "Acme Traders", "Karnataka"));
//!
//! let line = editor.add_item(catalog.find("itm-1").unwrap());
//! editor
//!     .apply_edit(line, LineEdit::Measurement(MeasurementField::Height, "4".into()), &catalog)
//!     .unwrap();
//! editor
//!     .apply_edit(line, LineEdit::Measurement(MeasurementField::Width, "2".into()), &catalog)
//!     .unwrap();
//!
//! let totals = editor.totals();
//! assert_eq!(totals.subtotal, BigDecimal::from(500));
//! assert_eq!(totals.net_amount, BigDecimal::from(590));
//! ```

pub mod document;
pub mod pricing;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use document::*;
pub use pricing::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
