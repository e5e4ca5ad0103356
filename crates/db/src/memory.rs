//! In-process document store.
//!
//! Used by the test suites and when the server runs without `DATABASE_URL`.
//! Contents are lost on restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use folio_core::collection::Collection;
use folio_core::types::{DocId, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::fields::{matches_all, merge_fields, strip_reserved};
use crate::store::{Document, DocumentStore, Fields, Filter, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    fields: Fields,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Insertion order, breaks ties between equal `created_at` values.
    seq: u64,
}

impl Entry {
    fn to_document(&self, id: &str) -> Document {
        Document {
            id: id.to_string(),
            fields: self.fields.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, HashMap<DocId, Entry>>>,
    next_seq: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn not_found(collection: Collection, id: &str) -> StoreError {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn add_document(
        &self,
        collection: Collection,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let entry = Entry {
            fields: strip_reserved(data),
            created_at: now,
            updated_at: now,
            seq: self.next_seq(),
        };
        let doc = entry.to_document(&id);

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id, entry);

        Ok(doc)
    }

    async fn get_documents(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        for filter in filters {
            filter.validate()?;
        }

        let guard = self.collections.read().await;
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<(&DocId, &Entry)> = docs
            .iter()
            .filter(|(_, entry)| matches_all(&entry.fields, filters))
            .collect();
        matched.sort_by(|(_, a), (_, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(matched
            .into_iter()
            .map(|(id, entry)| entry.to_document(id))
            .collect())
    }

    async fn get_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Document, StoreError> {
        self.collections
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| entry.to_document(id))
            .ok_or_else(|| Self::not_found(collection, id))
    }

    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let mut guard = self.collections.write().await;
        let entry = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| Self::not_found(collection, id))?;

        for (key, value) in strip_reserved(data) {
            entry.fields.insert(key, value);
        }
        entry.updated_at = Utc::now();

        Ok(entry.to_document(id))
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .write()
            .await
            .get_mut(&collection)
            .and_then(|docs| docs.remove(id))
            .is_some())
    }

    async fn set_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
        merge: bool,
    ) -> Result<Document, StoreError> {
        let data = strip_reserved(data);
        let now = Utc::now();
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();

        if let Some(entry) = docs.get_mut(id) {
            if merge {
                merge_fields(&mut entry.fields, data);
            } else {
                entry.fields = data;
            }
            entry.updated_at = now;
            return Ok(entry.to_document(id));
        }

        let entry = Entry {
            fields: data,
            created_at: now,
            updated_at: now,
            seq: self.next_seq(),
        };
        let doc = entry.to_document(id);
        docs.insert(id.to_string(), entry);
        Ok(doc)
    }
}
