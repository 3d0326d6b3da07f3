//! Memoized workbook classification
//!
//! Classification walks every defined name and probes cells, so it is
//! computed once and cached. The cache is scoped to one workbook session:
//! one engine instance, one cache. There is no automatic invalidation -
//! any caller that adds, removes, or redefines names must call
//! [`ClassificationCache::invalidate`] afterwards, or the cached set goes
//! silently stale. Not thread-safe; the execution model is single-threaded
//! and synchronous.

use crate::classify::{classify_workbook, ClassificationSet};
use crate::engine::SpreadsheetEngine;

/// Cache for the workbook-wide classification result
#[derive(Debug, Default)]
pub struct ClassificationCache {
    cached: Option<ClassificationSet>,
}

impl ClassificationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized classification, recomputing only when no cached
    /// set exists or `force_refresh` is true
    pub fn get_or_classify<E: SpreadsheetEngine + ?Sized>(
        &mut self,
        engine: &E,
        force_refresh: bool,
    ) -> &ClassificationSet {
        if force_refresh {
            self.cached = None;
        }
        self.cached.get_or_insert_with(|| {
            tracing::debug!("recomputing named-range classification");
            classify_workbook(engine)
        })
    }

    /// Discard the cached set
    ///
    /// Must be called after any defined-name mutation; staleness is
    /// otherwise silent.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!("classification cache invalidated");
        }
    }

    /// Whether a classification is currently cached
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
