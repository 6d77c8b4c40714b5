//! Lazily hydrated tables
//!
//! A [`LazyTable`] loads its content on first access. The load runs while
//! the table's mutex is held, so concurrent first callers wait for a single
//! load instead of racing into duplicate ones.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use crate::artifacts::read_json;
use crate::error::{IndexError, Result};
use crate::utils::logging::log::log_hydration;

/// Id-keyed table loaded from one JSON artifact on first use
#[derive(Debug)]
pub struct LazyTable<T> {
    name: &'static str,
    path: PathBuf,
    slot: Mutex<Option<Arc<FxHashMap<String, T>>>>,
    loads: AtomicUsize,
}

impl<T: DeserializeOwned> LazyTable<T> {
    #[must_use]
    pub fn new(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            path,
            slot: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    /// The resident table, loading it first if needed
    ///
    /// Callers keep the returned `Arc` alive independently of later
    /// [`Self::clear`] calls.
    pub fn get(&self) -> Result<Arc<FxHashMap<String, T>>> {
        let mut slot = self.lock()?;
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let start = Instant::now();
        let table: FxHashMap<String, T> = read_json(&self.path, self.name)?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        log_hydration(self.name, &self.path, table.len(), start.elapsed());

        let table = Arc::new(table);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the resident table; the next access reloads it
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.take().is_some() {
                log::debug!("Released {}", self.name);
            }
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.lock().is_ok_and(|slot| slot.is_some())
    }

    /// How many times the table has been read from disk
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Arc<FxHashMap<String, T>>>>> {
        self.slot
            .lock()
            .map_err(|_| IndexError::DataIntegrity(format!("{} lock poisoned", self.name)))
    }
}
