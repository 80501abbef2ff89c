// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router configuration export and import.
//!
//! The persisted TOML document carries candidate configs, the default
//! candidate index, the classification strategy, cache settings, and
//! pattern rules. Responder handles (and any credentials they hold) are
//! never serialized: the caller supplies them again on load, in the same
//! order as the persisted candidates.

use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use tracing::{info, warn};

use switchboard_core::{ResponderHandle, SwitchboardError};

use crate::config::{RouterDocument, RouterSection, RouterSettings};
use crate::router::QueryRouter;

/// Snapshot a router's configuration as a serializable document.
pub fn to_document(router: &QueryRouter) -> RouterDocument {
    RouterDocument {
        router: RouterSection {
            strategy: router.settings().strategy,
            default_index: router.default_index(),
        },
        cache: router.settings().cache.clone(),
        candidates: router.candidates(),
        patterns: router.classifier().rule_sets(),
    }
}

/// Write a router's configuration to a TOML file.
pub fn export_config(router: &QueryRouter, path: &Path) -> Result<(), SwitchboardError> {
    let document = to_document(router);
    let rendered = toml::to_string_pretty(&document).map_err(|e| {
        SwitchboardError::Persistence {
            message: format!("failed to serialize router config: {e}"),
            source: Some(Box::new(e)),
        }
    })?;
    std::fs::write(path, rendered).map_err(|e| SwitchboardError::Persistence {
        message: format!("failed to write {}: {e}", path.display()),
        source: Some(Box::new(e)),
    })?;

    info!(
        path = %path.display(),
        candidates = document.candidates.len(),
        "router configuration exported"
    );
    Ok(())
}

/// Restore a router from a TOML file, re-injecting responder handles.
///
/// Handles must be supplied in the same order as the persisted candidates;
/// a count mismatch is a configuration error. Partial documents pick up
/// compiled defaults via figment merging.
pub fn load_config(
    path: &Path,
    handles: Vec<ResponderHandle>,
) -> Result<QueryRouter, SwitchboardError> {
    let document: RouterDocument = Figment::new()
        .merge(Serialized::defaults(RouterDocument::default()))
        .merge(Toml::file_exact(path))
        .extract()
        .map_err(|e| {
            SwitchboardError::Config(format!(
                "failed to load router config from {}: {e}",
                path.display()
            ))
        })?;
    from_document(document, handles)
}

/// Build a router from an already-parsed configuration document.
pub fn from_document(
    document: RouterDocument,
    handles: Vec<ResponderHandle>,
) -> Result<QueryRouter, SwitchboardError> {
    if document.candidates.len() != handles.len() {
        return Err(SwitchboardError::Config(format!(
            "config lists {} candidate(s) but {} responder handle(s) were supplied",
            document.candidates.len(),
            handles.len()
        )));
    }

    let settings = RouterSettings {
        strategy: document.router.strategy,
        cache: document.cache.clone(),
    };
    let mut router = QueryRouter::new(settings);

    for rule_set in &document.patterns {
        for pattern in &rule_set.patterns {
            router.add_pattern_rule(&rule_set.category, pattern)?;
        }
    }

    for (config, handle) in document.candidates.into_iter().zip(handles) {
        if config.identity != handle.identity() {
            warn!(
                persisted = %config.identity,
                supplied = %handle.identity(),
                "responder handle identity differs from persisted config"
            );
        }
        router.add_candidate_config(config, handle)?;
    }

    if let Some(default_index) = document.router.default_index {
        router.set_default(default_index)?;
    }
    Ok(router)
}
