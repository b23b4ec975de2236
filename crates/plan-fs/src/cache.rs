//! Session-scoped document cache
//!
//! A [`DocumentCache`] is created by the caller and handed to whatever
//! resolves configuration, so its lifetime is one resolution session rather
//! than the whole process. Each path gets its own slot: concurrent requests
//! for the same path share a single read, while different paths load
//! independently. Failed loads leave the slot empty so they can be retried.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::{DocumentLoader, FsDocumentLoader, NormalizedPath, Result};

type Slot = Arc<Mutex<Option<Arc<Value>>>>;

/// Memoizing wrapper around a [`DocumentLoader`].
pub struct DocumentCache<L = FsDocumentLoader> {
    loader: L,
    slots: Mutex<HashMap<NormalizedPath, Slot>>,
}

impl Default for DocumentCache<FsDocumentLoader> {
    fn default() -> Self {
        Self::new(FsDocumentLoader)
    }
}

impl<L: DocumentLoader> DocumentCache<L> {
    /// Create an empty cache backed by `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the document at `path`, loading it on first request.
    pub fn get(&self, path: &NormalizedPath) -> Result<Arc<Value>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(path.clone()).or_default())
        };

        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(document) = entry.as_ref() {
            tracing::trace!(%path, "Document cache hit");
            return Ok(Arc::clone(document));
        }

        tracing::debug!(%path, "Loading configuration document");
        let document = Arc::new(self.loader.load(path)?);
        *entry = Some(Arc::clone(&document));
        Ok(document)
    }

    /// Whether a document for `path` has been loaded.
    pub fn contains(&self, path: &NormalizedPath) -> bool {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(path).cloned()
        };
        slot.is_some_and(|slot| {
            let loaded = slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some();
            loaded
        })
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.values().cloned().collect()
        };
        slots
            .iter()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached document.
    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L> std::fmt::Debug for DocumentCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let paths: Vec<NormalizedPath> = self
            .slots
            .lock()
            .map(|slots| slots.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("DocumentCache").field("paths", &paths).finish()
    }
}
