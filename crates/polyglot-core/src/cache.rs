//! Resolution cache.
//!
//! Memoizes, per language key, the strategy a resolver bound to it or the
//! fact that none was found. Entries are never evicted or refreshed.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::strategy::Strategy;

/// Outcome of resolving one language: a strategy, or `None` when absent.
pub type Resolution = Option<Arc<dyn Strategy>>;

/// Shared map from language key to resolution outcome.
#[derive(Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, Resolution>>,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached outcome for a language.
    ///
    /// The outer `Option` is `None` on a miss; `Some(None)` means the
    /// language was resolved before and no strategy was found.
    pub fn get(&self, language: &str) -> Option<Resolution> {
        self.entries.read().get(language).cloned()
    }

    /// Store an outcome. A concurrent insert for the same key overwrites.
    pub fn insert(&self, language: impl Into<String>, resolution: Resolution) {
        self.entries.write().insert(language.into(), resolution);
    }

    /// Whether a language has been resolved.
    pub fn contains(&self, language: &str) -> bool {
        self.entries.read().contains_key(language)
    }

    /// Number of resolved languages.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved languages with the bound strategy name, sorted by language.
    pub fn snapshot(&self) -> Vec<(String, Option<String>)> {
        let mut entries: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|(language, resolution)| {
                (
                    language.clone(),
                    resolution.as_ref().map(|s| s.name().to_string()),
                )
            })
            .collect();
        entries.sort();
        entries
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("entries", &self.snapshot())
            .finish()
    }
}
