//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::document::snapshot::DocumentSnapshot;
use crate::tax::gst::GstRates;
use crate::traits::BillingStorage;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    documents: Arc<RwLock<HashMap<String, DocumentSnapshot>>>,
    catalog: Arc<RwLock<Vec<CatalogItem>>>,
    parties: Arc<RwLock<Vec<Party>>>,
    rates: Arc<RwLock<GstRates>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            catalog: Arc::new(RwLock::new(Vec::new())),
            parties: Arc::new(RwLock::new(Vec::new())),
            rates: Arc::new(RwLock::new(GstRates::default())),
        }
    }

    /// Seed the catalog
    pub fn set_catalog(&self, items: Vec<CatalogItem>) {
        *self.catalog.write().unwrap() = items;
    }

    /// Seed the counterparty directory
    pub fn set_parties(&self, parties: Vec<Party>) {
        *self.parties.write().unwrap() = parties;
    }

    /// Set the configured GST rates
    pub fn set_gst_rates(&self, rates: GstRates) {
        *self.rates.write().unwrap() = rates;
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.documents.write().unwrap().clear();
        self.catalog.write().unwrap().clear();
        self.parties.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingStorage for MemoryStorage {
    async fn create_document(&mut self, snapshot: &DocumentSnapshot) -> BillingResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut stored = snapshot.clone();
        stored.id = Some(id.clone());
        self.documents.write().unwrap().insert(id.clone(), stored);
        Ok(id)
    }

    async fn update_document(
        &mut self,
        document_id: &str,
        snapshot: &DocumentSnapshot,
    ) -> BillingResult<()> {
        let mut documents = self.documents.write().unwrap();
        if !documents.contains_key(document_id) {
            return Err(BillingError::DocumentNotFound(document_id.to_string()));
        }
        let mut stored = snapshot.clone();
        stored.id = Some(document_id.to_string());
        documents.insert(document_id.to_string(), stored);
        Ok(())
    }

    async fn get_document(&self, document_id: &str) -> BillingResult<Option<DocumentSnapshot>> {
        Ok(self.documents.read().unwrap().get(document_id).cloned())
    }

    async fn list_documents(
        &self,
        kind: Option<DocumentKind>,
    ) -> BillingResult<Vec<DocumentSnapshot>> {
        let documents = self.documents.read().unwrap();
        let filtered: Vec<DocumentSnapshot> = documents
            .values()
            .filter(|snapshot| kind.is_none_or(|k| snapshot.kind == k))
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn delete_document(&mut self, document_id: &str) -> BillingResult<()> {
        if self
            .documents
            .write()
            .unwrap()
            .remove(document_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(BillingError::DocumentNotFound(document_id.to_string()))
        }
    }

    async fn list_catalog_items(&self) -> BillingResult<Vec<CatalogItem>> {
        Ok(self.catalog.read().unwrap().clone())
    }

    async fn list_parties(&self, kind: Option<PartyKind>) -> BillingResult<Vec<Party>> {
        let parties = self.parties.read().unwrap();
        let filtered: Vec<Party> = parties
            .iter()
            .filter(|party| kind.is_none_or(|k| party.kind == k))
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn gst_rates(&self) -> BillingResult<GstRates> {
        Ok(self.rates.read().unwrap().clone())
    }
}

/// Storage stub whose document writes always fail
///
/// Lets tests drive the save boundary's failure path without a network.
#[derive(Debug, Clone, Default)]
pub struct FailingStorage;

#[async_trait]
impl BillingStorage for FailingStorage {
    async fn create_document(&mut self, _snapshot: &DocumentSnapshot) -> BillingResult<String> {
        Err(BillingError::Storage("simulated outage".to_string()))
    }

    async fn update_document(
        &mut self,
        _document_id: &str,
        _snapshot: &DocumentSnapshot,
    ) -> BillingResult<()> {
        Err(BillingError::Storage("simulated outage".to_string()))
    }

    async fn get_document(&self, _document_id: &str) -> BillingResult<Option<DocumentSnapshot>> {
        Ok(None)
    }

    async fn list_documents(
        &self,
        _kind: Option<DocumentKind>,
    ) -> BillingResult<Vec<DocumentSnapshot>> {
        Ok(Vec::new())
    }

    async fn delete_document(&mut self, document_id: &str) -> BillingResult<()> {
        Err(BillingError::DocumentNotFound(document_id.to_string()))
    }

    async fn list_catalog_items(&self) -> BillingResult<Vec<CatalogItem>> {
        Ok(Vec::new())
    }

    async fn list_parties(&self, _kind: Option<PartyKind>) -> BillingResult<Vec<Party>> {
        Ok(Vec::new())
    }

    async fn gst_rates(&self) -> BillingResult<GstRates> {
        Ok(GstRates::default())
    }
}
