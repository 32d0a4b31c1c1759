//! CatalogEngine - reloadable in-memory catalog with fuzzy search
//!
//! The catalog sits behind a read/write lock so it can be rebuilt while
//! searches run. A hash of the loaded records is kept for change detection.

use std::hash::{Hash, Hasher};
use std::time::Instant;

use ahash::{AHashSet, AHasher};
use mojimatch_core::{search_with, FuzzyMatchResult};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::CatalogEntry;
use crate::config::EngineConfig;

/// A ranked catalog record with the result of its best-matching title
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    #[serde(flatten)]
    pub result: FuzzyMatchResult,
}

impl SearchHit {
    /// Whether the best match was on an alias rather than the primary title
    pub fn matched_alias(&self) -> bool {
        self.result.target != self.title
    }
}

/// Thread-safe catalog search engine
pub struct CatalogEngine {
    entries: RwLock<Vec<CatalogEntry>>,

    // Hash of current catalog for change detection
    catalog_hash: RwLock<String>,

    config: EngineConfig,
}

impl CatalogEngine {
    /// Create a new CatalogEngine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new CatalogEngine with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            catalog_hash: RwLock::new(String::new()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the catalog. Records with an already seen id are dropped; the
    /// remaining order is kept since it breaks score ties.
    /// Returns (entry_count, build_time_ms, hash)
    pub fn rebuild_catalog(&self, entries: Vec<CatalogEntry>) -> (usize, u64, String) {
        let start = Instant::now();

        let mut seen = AHashSet::with_capacity(entries.len());
        let entries: Vec<CatalogEntry> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.id))
            .collect();

        let hash = Self::compute_hash(&entries);
        let count = entries.len();

        *self.entries.write() = entries;
        *self.catalog_hash.write() = hash.clone();

        let build_time = start.elapsed().as_millis() as u64;
        info!(entries = count, hash = %hash, build_ms = build_time, "catalog rebuilt");

        (count, build_time, hash)
    }

    /// Rank the catalog against `query`.
    /// Returns (hits, search_time_us). A blank query returns no hits.
    pub fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> (Vec<SearchHit>, u64) {
        let start = Instant::now();

        let limit = limit.unwrap_or(self.config.limit);
        let offset = offset.unwrap_or(self.config.offset);

        if query.trim().is_empty() {
            return (Vec::new(), start.elapsed().as_micros() as u64);
        }

        let entries = self.entries.read();
        let hits: Vec<SearchHit> = search_with(
            &self.config.search_config(),
            query,
            entries.as_slice(),
            limit,
            offset,
        )
        .into_iter()
        .map(|ranked| SearchHit {
            id: ranked.item.id,
            title: ranked.item.title.clone(),
            result: ranked.result,
        })
        .collect();

        let search_time = start.elapsed().as_micros() as u64;
        debug!(query = query, hits = hits.len(), search_us = search_time, "search finished");

        (hits, search_time)
    }

    /// Get current catalog hash for change detection
    pub fn get_catalog_hash(&self) -> String {
        self.catalog_hash.read().clone()
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Check if the catalog has records
    pub fn is_ready(&self) -> bool {
        !self.is_empty()
    }

    fn compute_hash(entries: &[CatalogEntry]) -> String {
        let mut hasher = AHasher::default();
        for entry in entries {
            entry.hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }
}

impl Default for CatalogEngine {
    fn default() -> Self {
        Self::new()
    }
}
