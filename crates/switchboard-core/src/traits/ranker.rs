// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relevance ranker trait for semantic tie-breaks among matching candidates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SwitchboardError;
use crate::types::{LabeledChoice, RankedSelection};

/// An external collaborator that ranks labeled candidates against a query.
///
/// The ranker is only consulted when more than one candidate matches a
/// query's category. `Ok(None)` means the ranker had no usable answer;
/// either way the selector degrades to priority order, so a ranker
/// implementation may fail freely without affecting routing availability.
#[async_trait]
pub trait RelevanceRanker: Send + Sync {
    /// Human-readable name of this ranker, for logs.
    fn name(&self) -> &str;

    /// Pick the most relevant choice for `query`, or `None` if undecided.
    async fn rank(
        &self,
        query: &str,
        choices: &[LabeledChoice],
    ) -> Result<Option<RankedSelection>, SwitchboardError>;
}

/// Shared handle to a live ranker.
pub type RankerHandle = Arc<dyn RelevanceRanker>;
