//! Persistence seam and the in-memory store.

use crate::{StorageError, StorageResult};
use blockhook_model::Document;
use blockhook_types::DocumentId;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Where documents live between operations.
///
/// The runtime only needs keyed access; querying belongs to the host.
pub trait DocumentStore: Send + Sync {
    /// Stores a new document. Fails with `Conflict` if the identity is taken.
    fn insert(&self, document: Document) -> StorageResult<()>;

    fn get(&self, collection: &str, id: &DocumentId) -> StorageResult<Option<Document>>;

    /// Overwrites an existing document, returning the previous version.
    fn replace(&self, document: Document) -> StorageResult<Document>;

    fn remove(&self, collection: &str, id: &DocumentId) -> StorageResult<Option<Document>>;

    /// Documents of a collection, ordered by identity.
    fn list(&self, collection: &str) -> StorageResult<Vec<Document>>;

    fn len(&self) -> StorageResult<usize>;

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

type Key = (String, DocumentId);

/// A [`DocumentStore`] backed by an ordered map behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<Key, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<Key, Document>>> {
        self.documents
            .read()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<Key, Document>>> {
        self.documents
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, document: Document) -> StorageResult<()> {
        let mut documents = self.write()?;
        let key = (document.collection.clone(), document.id);
        if documents.contains_key(&key) {
            return Err(StorageError::Conflict {
                collection: key.0,
                id: key.1,
            });
        }
        documents.insert(key, document);
        Ok(())
    }

    fn get(&self, collection: &str, id: &DocumentId) -> StorageResult<Option<Document>> {
        let documents = self.read()?;
        Ok(documents.get(&(collection.to_string(), *id)).cloned())
    }

    fn replace(&self, document: Document) -> StorageResult<Document> {
        let mut documents = self.write()?;
        let key = (document.collection.clone(), document.id);
        match documents.get_mut(&key) {
            Some(slot) => Ok(std::mem::replace(slot, document)),
            None => Err(StorageError::NotFound {
                collection: key.0,
                id: key.1,
            }),
        }
    }

    fn remove(&self, collection: &str, id: &DocumentId) -> StorageResult<Option<Document>> {
        let mut documents = self.write()?;
        Ok(documents.remove(&(collection.to_string(), *id)))
    }

    fn list(&self, collection: &str) -> StorageResult<Vec<Document>> {
        let documents = self.read()?;
        Ok(documents
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|(_, d)| d.clone())
            .collect())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.read()?.len())
    }
}
