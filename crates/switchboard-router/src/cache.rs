// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification cache keyed by normalized query hash.
//!
//! The cache is an unbounded map with no capacity eviction: TTL staleness
//! is enforced lazily on the read path only, so a stale entry consumes
//! memory until it is next looked up. This mirrors the documented behavior
//! of the routing core; `stats` and `clear` give operators visibility and
//! a manual relief valve.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::classifier::QueryClassification;
use switchboard_core::ClassificationMethod;

/// Cache key for a query: SHA-256 hex digest of the trimmed, lowercased text.
pub fn cache_key(query: &str) -> String {
    let normalized = query.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{digest:x}")
}

/// A cached classification with its creation time and hit counter.
#[derive(Debug, Clone)]
struct CachedEntry {
    classification: QueryClassification,
    created: Instant,
    hits: u64,
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held, stale ones included.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing usable (absent or expired).
    pub misses: u64,
}

/// In-memory classification cache with lazy TTL expiry.
#[derive(Debug)]
pub struct ClassificationCache {
    ttl: Option<Duration>,
    entries: HashMap<String, CachedEntry>,
    hits: u64,
    misses: u64,
}

impl ClassificationCache {
    /// Create a cache. `ttl = None` means entries never expire.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached classification by key.
    ///
    /// A fresh entry increments its hit counter and returns a copy of the
    /// classification with the method overwritten to `Cache`. An expired
    /// entry is removed here and counts as a miss.
    pub fn lookup(&mut self, key: &str) -> Option<QueryClassification> {
        let ttl = self.ttl;
        match self.entries.get_mut(key) {
            Some(entry) if is_fresh(entry.created, ttl) => {
                entry.hits += 1;
                self.hits += 1;
                let mut classification = entry.classification.clone();
                classification.method = ClassificationMethod::Cache;
                debug!(
                    category = %classification.category,
                    entry_hits = entry.hits,
                    "classification cache hit"
                );
                Some(classification)
            }
            Some(_) => {
                self.entries.remove(key);
                self.misses += 1;
                debug!("classification cache entry expired");
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a classification, replacing any previous entry for the key
    /// and resetting its timestamp.
    pub fn store(&mut self, key: String, classification: QueryClassification) {
        self.entries.insert(
            key,
            CachedEntry {
                classification,
                created: Instant::now(),
                hits: 0,
            },
        );
    }

    /// Current cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn is_fresh(created: Instant, ttl: Option<Duration>) -> bool {
    match ttl {
        None => true,
        Some(ttl) => created.elapsed() <= ttl,
    }
}
