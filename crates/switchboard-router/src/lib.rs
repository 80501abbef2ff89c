// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification and candidate routing for Switchboard.
//!
//! This crate provides:
//! - [`QueryClassifier`]: pattern, llm, or hybrid query classification
//!   with an optional TTL'd cache
//! - [`CandidateRegistry`]: priority-ordered category matching over the
//!   configured responder pool
//! - [`CandidateSelector`]: ranker-backed tie-breaks with a priority-order
//!   fallback
//! - [`QueryRouter`]: the routing executor, with single-mode fallback
//!   chains, top-K execution, forced routing, dynamic candidate
//!   management, and TOML config persistence
//!
//! The router intercepts a query before any LLM call, classifies it,
//! picks the most suitable responder from the pool, and executes with
//! fallback semantics when the choice fails.

pub mod cache;
pub mod classifier;
pub mod config;
pub mod persist;
pub mod registry;
pub mod router;
pub mod selector;

pub use cache::{cache_key, CacheStats, ClassificationCache};
pub use classifier::{QueryClassification, QueryClassifier, PATTERN_CONFIDENCE};
pub use config::{CacheSettings, PatternRuleSet, RouterDocument, RouterSettings};
pub use persist::{export_config, from_document, load_config, to_document};
pub use registry::{
    CandidateConfig, CandidateEntry, CandidateRegistry, CATCH_ALL_CATEGORY,
};
pub use router::{QueryRouter, RouteOptions, RoutingResult};
pub use selector::{CandidateSelector, Selection};
