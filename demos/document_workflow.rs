//! Document lifecycle example: draft, save, reload, and update

use billing_core::utils::{format_inr, MemoryStorage};
use billing_core::{
    BillingStorage, Catalog, CatalogItem, DocumentEditor, DocumentKind, GstRates, ItemPricing,
    LineEdit, MeasurementField, Party,
};
use bigdecimal::BigDecimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Billing Core - Document Workflow Example\n");

    // 1. Seed storage the way an application bootstraps a session
    let mut storage = MemoryStorage::new();
    storage.set_catalog(vec![CatalogItem::new(
        "itm-bolt",
        "Bolt",
        ItemPricing::Unit {
            price_per_unit: BigDecimal::from(5),
        },
    )]);
    storage.set_parties(vec![Party::customer("cus-1", "Acme Traders", "Karnataka")]);
    storage.set_gst_rates(GstRates::new(BigDecimal::from(9), BigDecimal::from(9)));

    let catalog = Catalog::new(storage.list_catalog_items().await?);
    let parties = storage.list_parties(None).await?;
    let rates = storage.gst_rates().await?;
    println!(
        "📊 Session loaded: {} catalog item(s), {} part(ies)",
        catalog.items().len(),
        parties.len()
    );
    println!();

    // 2. Draft and save a new invoice
    let mut editor = DocumentEditor::new(DocumentKind::Invoice, rates.clone());
    editor.select_party(parties[0].clone());
    let line = editor.add_item(catalog.find("itm-bolt").unwrap());
    editor.apply_edit(
        line,
        LineEdit::Measurement(MeasurementField::Units, "12".into()),
        &catalog,
    )?;

    let outcome = editor.save(&mut storage).await;
    let id = match outcome.document_id {
        Some(id) => id,
        None => {
            println!("  ❌ Save failed: {}", outcome.message.unwrap_or_default());
            return Ok(());
        }
    };
    println!("💾 Saved invoice {id}");
    println!(
        "  Net amount: {}",
        format_inr(&editor.totals().net_amount)
    );
    println!();

    // 3. Reload it for editing, bump the quantity, and update in place
    let stored = storage
        .get_document(&id)
        .await?
        .expect("just-saved document");
    let mut reloaded = DocumentEditor::load(&stored, rates, &catalog);
    let line = reloaded.lines()[0].id;
    reloaded.apply_edit(line, LineEdit::Quantity(3), &catalog)?;

    let outcome = reloaded.save(&mut storage).await;
    println!(
        "🔄 Updated invoice {} (success: {})",
        outcome.document_id.as_deref().unwrap_or("?"),
        outcome.success
    );
    println!(
        "  Net amount after update: {}",
        format_inr(&reloaded.totals().net_amount)
    );
    println!();

    // 4. The store holds exactly one document
    let documents = storage.list_documents(Some(DocumentKind::Invoice)).await?;
    println!("📁 Documents in storage: {}", documents.len());
    for document in &documents {
        println!(
            "  {} for {} — {}",
            document.id.as_deref().unwrap_or("?"),
            document.customer_name,
            format_inr(&document.totals.net_amount)
        );
    }

    println!("\n🎉 Document workflow example completed successfully!");
    Ok(())
}
