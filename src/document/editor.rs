//! The working-document editor
//!
//! One editor holds one invoice, quotation, or purchase in progress. Every
//! accepted field edit triggers a full recompute of the affected line, and
//! document totals are recomputed from scratch on demand; with line lists
//! in the tens, correctness beats incremental bookkeeping.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::document::snapshot::{DocumentSnapshot, LineSnapshot};
use crate::pricing::totals::DocumentTotals;
use crate::pricing::valuator::{parse_amount, recompute_line};
use crate::tax::gst::GstRates;
use crate::traits::{BillingStorage, DefaultDocumentValidator, DocumentValidator};
use crate::types::{
    BilledLine, BillingError, BillingResult, Catalog, CatalogItem, DiscountType, DocumentKind,
    Measurement, Party, WasteState,
};

/// Where the working document is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// No party and no lines yet
    Empty,
    /// Editable, with a party and/or lines present
    Drafting,
    /// A save is in flight; re-submission is rejected
    Persisting,
}

/// A single measurement sub-field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementField {
    Height,
    Width,
    Kg,
    Units,
}

/// One field edit on a billed line
///
/// The variant records which field changed, which is what decides whether
/// a waste amount is recomputed from measurements or accepted as typed.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEdit {
    Quantity(u32),
    Measurement(MeasurementField, String),
    Discount(String),
    DiscountType(DiscountType),
    WasteEnabled(bool),
    WasteMeasurement(MeasurementField, String),
    WasteAmount(String),
}

/// Result of a save attempt; storage and validation failures surface here
/// rather than propagating past the save boundary
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub success: bool,
    pub document_id: Option<String>,
    pub message: Option<String>,
}

impl SaveOutcome {
    fn saved(document_id: String) -> Self {
        Self {
            success: true,
            document_id: Some(document_id),
            message: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            document_id: None,
            message: Some(message.into()),
        }
    }
}

fn set_measurement_field(
    measurement: &mut Measurement,
    field: MeasurementField,
    text: String,
) -> bool {
    match (measurement, field) {
        (Measurement::HeightWidth { height, .. }, MeasurementField::Height) => {
            *height = text;
            true
        }
        (Measurement::HeightWidth { width, .. }, MeasurementField::Width) => {
            *width = text;
            true
        }
        (Measurement::Kg { kg }, MeasurementField::Kg) => {
            *kg = text;
            true
        }
        (Measurement::Unit { units }, MeasurementField::Units) => {
            *units = text;
            true
        }
        _ => false,
    }
}

/// Editor for one billing document
pub struct DocumentEditor {
    kind: DocumentKind,
    /// Storage id when editing an existing document
    editing: Option<String>,
    party: Option<Party>,
    lines: Vec<BilledLine>,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    rates: GstRates,
    validator: Box<dyn DocumentValidator>,
    saving: bool,
}

impl DocumentEditor {
    /// Create an empty editor for a new document, dated today
    pub fn new(kind: DocumentKind, rates: GstRates) -> Self {
        Self::with_validator(kind, rates, Box::new(DefaultDocumentValidator))
    }

    /// Create an empty editor with a custom pre-save validator
    pub fn with_validator(
        kind: DocumentKind,
        rates: GstRates,
        validator: Box<dyn DocumentValidator>,
    ) -> Self {
        Self {
            kind,
            editing: None,
            party: None,
            lines: Vec::new(),
            issue_date: chrono::Utc::now().date_naive(),
            due_date: None,
            rates,
            validator,
            saving: false,
        }
    }

    /// Rehydrate a stored document for editing
    ///
    /// Lines get fresh client ids and are repriced against the current
    /// catalog; absent fields take their documented defaults.
    pub fn load(snapshot: &DocumentSnapshot, rates: GstRates, catalog: &Catalog) -> Self {
        let mut editor = Self::new(snapshot.kind, rates);
        editor.editing = snapshot.id.clone();
        editor.party = snapshot.party();
        if let Some(issue_date) = snapshot.issue_date {
            editor.issue_date = issue_date;
        }
        editor.due_date = snapshot.due_date;
        editor.lines = snapshot
            .products
            .iter()
            .map(|stored| stored.to_line(catalog))
            .collect();
        editor
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The storage id this editor updates on save, if any
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn party(&self) -> Option<&Party> {
        self.party.as_ref()
    }

    pub fn lines(&self) -> &[BilledLine] {
        &self.lines
    }

    pub fn line(&self, line_id: Uuid) -> Option<&BilledLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn set_issue_date(&mut self, date: NaiveDate) {
        self.issue_date = date;
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        self.due_date = date;
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> EditorPhase {
        if self.saving {
            EditorPhase::Persisting
        } else if self.party.is_none() && self.lines.is_empty() {
            EditorPhase::Empty
        } else {
            EditorPhase::Drafting
        }
    }

    pub fn select_party(&mut self, party: Party) {
        self.party = Some(party);
    }

    pub fn clear_party(&mut self) {
        self.party = None;
    }

    /// Add a catalog item as a new line and return its id
    pub fn add_item(&mut self, item: &CatalogItem) -> Uuid {
        let line = BilledLine::from_catalog(item);
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Remove a line; returns whether it existed
    pub fn remove_line(&mut self, line_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != line_id);
        self.lines.len() != before
    }

    /// Apply one field edit to a line and recompute its totals
    ///
    /// Waste handling dispatches on the edited field: a waste measurement
    /// edit puts the amount back in derived mode, a typed amount becomes an
    /// override, and disabling waste clears every waste field. A
    /// measurement edit naming a field foreign to the line's kind is
    /// rejected without touching the line.
    pub fn apply_edit(
        &mut self,
        line_id: Uuid,
        edit: LineEdit,
        catalog: &Catalog,
    ) -> BillingResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or_else(|| {
                BillingError::Validation(format!("No line with id '{line_id}' in this document"))
            })?;

        match edit {
            LineEdit::Quantity(quantity) => {
                line.quantity = quantity;
            }
            LineEdit::Measurement(field, text) => {
                if !set_measurement_field(&mut line.measurement, field, text) {
                    return Err(BillingError::Validation(format!(
                        "Field {field:?} does not apply to a {:?} line",
                        line.measurement.kind()
                    )));
                }
            }
            LineEdit::Discount(text) => {
                line.discount = text;
            }
            LineEdit::DiscountType(discount_type) => {
                line.discount_type = discount_type;
            }
            LineEdit::WasteEnabled(true) => {
                if !line.waste.is_enabled() {
                    line.waste = WasteState::Derived {
                        measurement: Measurement::empty(line.measurement.kind()),
                        amount: BigDecimal::from(0),
                    };
                }
            }
            LineEdit::WasteEnabled(false) => {
                line.waste = WasteState::Disabled;
            }
            LineEdit::WasteMeasurement(field, text) => {
                let mut measurement = match line.waste.measurement() {
                    Some(measurement) => measurement.clone(),
                    None => {
                        return Err(BillingError::Validation(
                            "Waste is not enabled on this line".to_string(),
                        ))
                    }
                };
                if !set_measurement_field(&mut measurement, field, text) {
                    return Err(BillingError::Validation(format!(
                        "Field {field:?} does not apply to a {:?} line",
                        line.measurement.kind()
                    )));
                }
                // A measurement edit always wins over a typed override.
                line.waste = WasteState::Derived {
                    measurement,
                    amount: BigDecimal::from(0),
                };
            }
            LineEdit::WasteAmount(text) => {
                let measurement = match line.waste.measurement() {
                    Some(measurement) => measurement.clone(),
                    None => {
                        return Err(BillingError::Validation(
                            "Waste is not enabled on this line".to_string(),
                        ))
                    }
                };
                line.waste = WasteState::Overridden {
                    measurement,
                    amount: parse_amount(&text),
                };
            }
        }

        recompute_line(line, catalog);
        Ok(())
    }

    /// Current document totals
    ///
    /// With no party selected the tax split sees an empty state, which is
    /// treated as inter-state.
    pub fn totals(&self) -> DocumentTotals {
        let state = self
            .party
            .as_ref()
            .map(|party| party.state.as_str())
            .unwrap_or("");
        DocumentTotals::compute(&self.lines, state, &self.rates)
    }

    /// Discard the party, lines, and edit target, keeping kind and rates
    pub fn reset(&mut self) {
        self.editing = None;
        self.party = None;
        self.lines.clear();
        self.due_date = None;
    }

    /// Build the persistence payload for the current state
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        let party = self.party.clone().unwrap_or_else(|| Party {
            id: String::new(),
            name: String::new(),
            phone: String::new(),
            gstin: String::new(),
            billing_address: String::new(),
            state: String::new(),
            kind: self.kind.party_kind(),
        });
        let now = chrono::Utc::now().naive_utc();

        DocumentSnapshot {
            id: self.editing.clone(),
            kind: self.kind,
            customer_id: party.id,
            customer_name: party.name,
            customer_phone: party.phone,
            customer_gstin: party.gstin,
            billing_address: party.billing_address,
            place_of_supply: party.state,
            issue_date: Some(self.issue_date),
            due_date: self.due_date,
            products: self.lines.iter().map(LineSnapshot::from_line).collect(),
            totals: self.totals(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate and persist the document
    ///
    /// Creates a new document or updates the loaded one depending on the
    /// edit target. Never returns an error: validation and storage
    /// failures come back as an unsuccessful outcome with a message, and a
    /// save attempted while one is in flight is rejected the same way.
    pub async fn save<S: BillingStorage>(&mut self, storage: &mut S) -> SaveOutcome {
        if self.saving {
            return SaveOutcome::failed("A save is already in progress");
        }
        if let Err(error) = self.validator.validate(self.party.as_ref(), &self.lines) {
            return SaveOutcome::failed(error.to_string());
        }

        self.saving = true;
        let snapshot = self.to_snapshot();
        let result = match &self.editing {
            Some(id) => storage
                .update_document(id, &snapshot)
                .await
                .map(|_| id.clone()),
            None => storage.create_document(&snapshot).await,
        };
        self.saving = false;

        match result {
            Ok(id) => {
                self.editing = Some(id.clone());
                SaveOutcome::saved(id)
            }
            Err(error) => SaveOutcome::failed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemPricing;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new(
                "itm-glass",
                "Glass Panel",
                ItemPricing::HeightWidth {
                    price_per_height: BigDecimal::from(100),
                    price_per_width: BigDecimal::from(50),
                },
            ),
            CatalogItem::new(
                "itm-rod",
                "Steel Rod",
                ItemPricing::Kg {
                    price_per_kg: BigDecimal::from(80),
                },
            ),
        ])
    }

    fn editor_with_glass_line(catalog: &Catalog) -> (DocumentEditor, Uuid) {
        let mut editor = DocumentEditor::new(DocumentKind::Invoice, GstRates::default());
        let line_id = editor.add_item(catalog.find("itm-glass").unwrap());
        editor
            .apply_edit(
                line_id,
                LineEdit::Measurement(MeasurementField::Height, "4".to_string()),
                catalog,
            )
            .unwrap();
        editor
            .apply_edit(
                line_id,
                LineEdit::Measurement(MeasurementField::Width, "2".to_string()),
                catalog,
            )
            .unwrap();
        editor
            .apply_edit(line_id, LineEdit::Quantity(2), catalog)
            .unwrap();
        (editor, line_id)
    }

    #[test]
    fn test_add_and_edit_line() {
        let catalog = catalog();
        let (editor, line_id) = editor_with_glass_line(&catalog);

        let line = editor.line(line_id).unwrap();
        assert_eq!(line.gross_total, BigDecimal::from(900));
        assert_eq!(line.net_total, BigDecimal::from(900));
    }

    #[test]
    fn test_remove_line() {
        let catalog = catalog();
        let (mut editor, line_id) = editor_with_glass_line(&catalog);

        assert!(editor.remove_line(line_id));
        assert!(!editor.remove_line(line_id));
        assert!(editor.lines().is_empty());
    }

    #[test]
    fn test_foreign_field_edit_is_rejected() {
        let catalog = catalog();
        let (mut editor, line_id) = editor_with_glass_line(&catalog);

        let result = editor.apply_edit(
            line_id,
            LineEdit::Measurement(MeasurementField::Kg, "3".to_string()),
            &catalog,
        );
        assert!(result.is_err());
        // The line is untouched.
        assert_eq!(
            editor.line(line_id).unwrap().gross_total,
            BigDecimal::from(900)
        );
    }

    #[test]
    fn test_waste_derivation_and_disable() {
        let catalog = catalog();
        let (mut editor, line_id) = editor_with_glass_line(&catalog);

        editor
            .apply_edit(line_id, LineEdit::WasteEnabled(true), &catalog)
            .unwrap();
        editor
            .apply_edit(
                line_id,
                LineEdit::WasteMeasurement(MeasurementField::Height, "1".to_string()),
                &catalog,
            )
            .unwrap();
        editor
            .apply_edit(
                line_id,
                LineEdit::WasteMeasurement(MeasurementField::Width, "0.5".to_string()),
                &catalog,
            )
            .unwrap();

        let line = editor.line(line_id).unwrap();
        assert_eq!(line.waste.amount(), Some(&BigDecimal::from(125)));
        assert_eq!(line.gross_total, BigDecimal::from(1025));

        editor
            .apply_edit(line_id, LineEdit::WasteEnabled(false), &catalog)
            .unwrap();
        let line = editor.line(line_id).unwrap();
        assert_eq!(line.waste, WasteState::Disabled);
        assert_eq!(line.gross_total, BigDecimal::from(900));
    }

    #[test]
    fn test_waste_override_and_reversion() {
        let catalog = catalog();
        let (mut editor, line_id) = editor_with_glass_line(&catalog);

        editor
            .apply_edit(line_id, LineEdit::WasteEnabled(true), &catalog)
            .unwrap();
        editor
            .apply_edit(
                line_id,
                LineEdit::WasteMeasurement(MeasurementField::Height, "1".to_string()),
                &catalog,
            )
            .unwrap();
        editor
            .apply_edit(line_id, LineEdit::WasteAmount("200".to_string()), &catalog)
            .unwrap();

        // The typed amount is authoritative.
        let line = editor.line(line_id).unwrap();
        assert_eq!(line.waste.amount(), Some(&BigDecimal::from(200)));
        assert_eq!(line.gross_total, BigDecimal::from(1100));

        // It survives unrelated edits.
        editor
            .apply_edit(line_id, LineEdit::Quantity(3), &catalog)
            .unwrap();
        let line = editor.line(line_id).unwrap();
        assert_eq!(line.waste.amount(), Some(&BigDecimal::from(200)));
        assert_eq!(line.gross_total, BigDecimal::from(1550));

        // A waste measurement edit reverts to derivation.
        editor
            .apply_edit(
                line_id,
                LineEdit::WasteMeasurement(MeasurementField::Width, "0.5".to_string()),
                &catalog,
            )
            .unwrap();
        let line = editor.line(line_id).unwrap();
        assert_eq!(line.waste.amount(), Some(&BigDecimal::from(125)));
        assert_eq!(line.gross_total, BigDecimal::from(1475));
    }

    #[test]
    fn test_waste_edits_require_enablement() {
        let catalog = catalog();
        let (mut editor, line_id) = editor_with_glass_line(&catalog);

        assert!(editor
            .apply_edit(line_id, LineEdit::WasteAmount("50".to_string()), &catalog)
            .is_err());
        assert!(editor
            .apply_edit(
                line_id,
                LineEdit::WasteMeasurement(MeasurementField::Height, "1".to_string()),
                &catalog,
            )
            .is_err());
    }

    #[test]
    fn test_phase_transitions() {
        let catalog = catalog();
        let mut editor = DocumentEditor::new(DocumentKind::Quotation, GstRates::default());
        assert_eq!(editor.phase(), EditorPhase::Empty);

        editor.select_party(Party::customer("cus-1", "Acme Traders", "Karnataka"));
        assert_eq!(editor.phase(), EditorPhase::Drafting);

        editor.add_item(catalog.find("itm-rod").unwrap());
        editor.reset();
        assert_eq!(editor.phase(), EditorPhase::Empty);
    }

    #[test]
    fn test_totals_without_party_use_inter_state_split() {
        let catalog = catalog();
        let (editor, _) = editor_with_glass_line(&catalog);

        let totals = editor.totals();
        assert_eq!(totals.cgst_amount, BigDecimal::from(0));
        assert_eq!(totals.igst_amount, BigDecimal::from(162));
    }

    #[test]
    fn test_totals_with_home_state_party() {
        let catalog = catalog();
        let (mut editor, _) = editor_with_glass_line(&catalog);
        editor.select_party(Party::customer("cus-1", "Acme Traders", "Karnataka"));

        let totals = editor.totals();
        assert_eq!(totals.cgst_amount, BigDecimal::from(81));
        assert_eq!(totals.sgst_amount, BigDecimal::from(81));
        assert_eq!(totals.igst_amount, BigDecimal::from(0));
        assert_eq!(totals.net_amount, BigDecimal::from(1062));
    }
}
