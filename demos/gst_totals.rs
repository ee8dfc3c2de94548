//! GST billing totals example

use billing_core::utils::format_inr;
use billing_core::{
    Catalog, CatalogItem, DocumentEditor, DocumentKind, GstRates, ItemPricing, LineEdit,
    MeasurementField, Party,
};
use bigdecimal::BigDecimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Billing Core - GST Totals Example\n");

    // 1. A small catalog covering all three measurement kinds
    let catalog = Catalog::new(vec![
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
        CatalogItem::new(
            "itm-bolt",
            "Bolt",
            ItemPricing::Unit {
                price_per_unit: BigDecimal::from(5),
            },
        ),
    ]);

    println!("📦 Catalog:");
    for item in catalog.items() {
        println!("  ✓ {} ({:?})", item.name, item.pricing.kind());
    }
    println!();

    // 2. Draft an invoice for a home-state customer
    let mut editor = DocumentEditor::new(DocumentKind::Invoice, GstRates::default());
    editor.select_party(Party::customer("cus-1", "Acme Traders", "Karnataka"));

    let glass = editor.add_item(catalog.find("itm-glass").unwrap());
    editor.apply_edit(
        glass,
        LineEdit::Measurement(MeasurementField::Height, "4".into()),
        &catalog,
    )?;
    editor.apply_edit(
        glass,
        LineEdit::Measurement(MeasurementField::Width, "2".into()),
        &catalog,
    )?;
    editor.apply_edit(glass, LineEdit::Quantity(2), &catalog)?;

    // Waste on the glass: one extra height unit and half a width unit
    editor.apply_edit(glass, LineEdit::WasteEnabled(true), &catalog)?;
    editor.apply_edit(
        glass,
        LineEdit::WasteMeasurement(MeasurementField::Height, "1".into()),
        &catalog,
    )?;
    editor.apply_edit(
        glass,
        LineEdit::WasteMeasurement(MeasurementField::Width, "0.5".into()),
        &catalog,
    )?;

    // 10% off the glass line, netted out at document level
    editor.apply_edit(glass, LineEdit::Discount("10".into()), &catalog)?;

    let rod = editor.add_item(catalog.find("itm-rod").unwrap());
    editor.apply_edit(
        rod,
        LineEdit::Measurement(MeasurementField::Kg, "2.5".into()),
        &catalog,
    )?;

    println!("🧾 Invoice lines:");
    for line in editor.lines() {
        println!(
            "  {} × {} = {} gross",
            line.name,
            line.effective_quantity(),
            format_inr(&line.gross_total)
        );
    }
    println!();

    // 3. Intra-state split: CGST + SGST
    let totals = editor.totals();
    println!("🏢 Intra-state totals (Karnataka customer):");
    println!("  Subtotal:    {}", format_inr(&totals.subtotal));
    println!("  Discount:    {}", format_inr(&totals.total_discount));
    println!("  Taxable:     {}", format_inr(&totals.taxable_amount));
    println!("  CGST (9%):   {}", format_inr(&totals.cgst_amount));
    println!("  SGST (9%):   {}", format_inr(&totals.sgst_amount));
    println!("  IGST:        {}", format_inr(&totals.igst_amount));
    println!("  Net Amount:  {}", format_inr(&totals.net_amount));
    println!();

    // 4. Same document for an inter-state customer: IGST only
    editor.select_party(Party::customer("cus-2", "Deccan Supplies", "Maharashtra"));
    let totals = editor.totals();
    println!("🌍 Inter-state totals (Maharashtra customer):");
    println!("  Taxable:     {}", format_inr(&totals.taxable_amount));
    println!("  CGST:        {}", format_inr(&totals.cgst_amount));
    println!("  SGST:        {}", format_inr(&totals.sgst_amount));
    println!("  IGST (18%):  {}", format_inr(&totals.igst_amount));
    println!("  Net Amount:  {}", format_inr(&totals.net_amount));
    println!();

    // 5. Overriding a derived waste amount
    editor.apply_edit(glass, LineEdit::WasteAmount("150".into()), &catalog)?;
    let line = editor.line(glass).unwrap();
    println!("✏️ Waste override:");
    println!(
        "  Typed waste of ₹150 replaces the derived ₹125; gross is now {}",
        format_inr(&line.gross_total)
    );

    println!("\n🎉 GST totals example completed successfully!");
    Ok(())
}
