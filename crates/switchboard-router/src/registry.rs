// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate registry and category matching.
//!
//! Each candidate is stored as one record holding both its configuration
//! and its live responder handle, so the two can never drift out of
//! alignment. Removal shifts subsequent indices down by one; callers must
//! not hold indices across mutations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use switchboard_core::{ResponderHandle, ResponderIdentity, SwitchboardError};

/// Candidates listing this specialty match every category.
pub const CATCH_ALL_CATEGORY: &str = "general";

/// Lowest allowed candidate priority.
pub const MIN_PRIORITY: u8 = 1;

/// Highest allowed candidate priority.
pub const MAX_PRIORITY: u8 = 10;

/// Configuration for one candidate responder.
///
/// Immutable while a routing call is in flight; changed only through
/// explicit registry add/remove operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateConfig {
    /// Identity of the responder this candidate wraps.
    pub identity: ResponderIdentity,

    /// Specialty categories. An empty list is normalized to the catch-all
    /// on registration, keeping the non-empty invariant.
    #[serde(default)]
    pub specialties: Vec<String>,

    /// Free-text description, used as the ranker label.
    #[serde(default)]
    pub description: String,

    /// Priority 1–10; higher is preferred among candidates matching the
    /// same category.
    #[serde(default = "default_priority")]
    pub priority: u8,

    /// Disabled candidates are invisible to matching and identity lookup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Optional fallback responder tried when this candidate fails.
    #[serde(default)]
    pub fallback: Option<ResponderIdentity>,
}

fn default_priority() -> u8 {
    5
}

fn default_enabled() -> bool {
    true
}

/// One registry record: configuration plus the live responder handle.
pub struct CandidateEntry {
    pub config: CandidateConfig,
    pub handle: ResponderHandle,
}

impl std::fmt::Debug for CandidateEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateEntry")
            .field("config", &self.config)
            .field("handle", &self.handle.identity())
            .finish()
    }
}

/// Holds every configured candidate and answers category/identity lookups.
#[derive(Default)]
pub struct CandidateRegistry {
    entries: Vec<CandidateEntry>,
}

impl CandidateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a candidate. Returns its index.
    ///
    /// Validates the priority range and normalizes an empty specialty list
    /// to the catch-all category.
    pub fn add(
        &mut self,
        mut config: CandidateConfig,
        handle: ResponderHandle,
    ) -> Result<usize, SwitchboardError> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&config.priority) {
            return Err(SwitchboardError::Config(format!(
                "priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {}",
                config.priority
            )));
        }
        if config.specialties.is_empty() {
            debug!(
                identity = %config.identity,
                "candidate registered without specialties, treating as catch-all"
            );
            config.specialties = vec![CATCH_ALL_CATEGORY.to_string()];
        }

        self.entries.push(CandidateEntry { config, handle });
        Ok(self.entries.len() - 1)
    }

    /// Remove the candidate at `index`, shifting subsequent indices down.
    pub fn remove(&mut self, index: usize) -> Result<CandidateEntry, SwitchboardError> {
        if index >= self.entries.len() {
            return Err(SwitchboardError::Config(format!(
                "candidate index {index} out of range ({} registered)",
                self.entries.len()
            )));
        }
        Ok(self.entries.remove(index))
    }

    /// Every enabled candidate matching `category` (its specialty list
    /// contains the category or the catch-all), sorted by descending
    /// priority. The sort is stable, so equal priorities keep registration
    /// order. An empty result means the caller applies its default.
    pub fn find_matches(&self, category: &str) -> Vec<(usize, CandidateConfig)> {
        let mut matches: Vec<(usize, CandidateConfig)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.config.enabled
                    && entry.config.specialties.iter().any(|s| {
                        s.eq_ignore_ascii_case(category)
                            || s.eq_ignore_ascii_case(CATCH_ALL_CATEGORY)
                    })
            })
            .map(|(index, entry)| (index, entry.config.clone()))
            .collect();

        matches.sort_by(|a, b| b.1.priority.cmp(&a.1.priority));
        matches
    }

    /// Enabled candidates whose identity matches `name` (provider name,
    /// model name, or `provider/model`), in registration order. Used for
    /// forced routing and fallback resolution.
    pub fn find_by_identity(&self, name: &str) -> Vec<(usize, CandidateConfig)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.config.enabled && entry.config.identity.matches(name))
            .map(|(index, entry)| (index, entry.config.clone()))
            .collect()
    }

    /// Configuration of the candidate at `index`.
    pub fn config(&self, index: usize) -> Option<&CandidateConfig> {
        self.entries.get(index).map(|entry| &entry.config)
    }

    /// Live handle of the candidate at `index`.
    pub fn handle(&self, index: usize) -> Option<ResponderHandle> {
        self.entries.get(index).map(|entry| entry.handle.clone())
    }

    /// Cloned configurations of every candidate, in index order.
    pub fn configs(&self) -> Vec<CandidateConfig> {
        self.entries
            .iter()
            .map(|entry| entry.config.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
