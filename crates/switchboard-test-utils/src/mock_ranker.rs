// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock relevance ranker for deterministic testing.
//!
//! Covers the three ranker behaviors the selector must handle: a usable
//! selection, no answer, and an outright failure. A fourth constructor
//! produces out-of-range selections to exercise the contract-violation
//! fallback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use switchboard_core::error::SwitchboardError;
use switchboard_core::types::{LabeledChoice, RankedSelection};
use switchboard_core::RelevanceRanker;

/// What the mock ranker does on every `rank` call.
#[derive(Debug, Clone)]
enum RankerBehavior {
    Select {
        index: usize,
        confidence: f32,
        reasoning: String,
    },
    Undecided,
    Fail(String),
}

/// A mock ranker with a fixed behavior and a shared call counter.
#[derive(Clone)]
pub struct MockRanker {
    behavior: RankerBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockRanker {
    /// Always select the given choice index.
    pub fn selecting(index: usize, confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            behavior: RankerBehavior::Select {
                index,
                confidence,
                reasoning: reasoning.into(),
            },
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always return `Ok(None)`.
    pub fn undecided() -> Self {
        Self {
            behavior: RankerBehavior::Undecided,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behavior: RankerBehavior::Fail(reason.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `rank` has been called across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelevanceRanker for MockRanker {
    fn name(&self) -> &str {
        "mock-ranker"
    }

    async fn rank(
        &self,
        _query: &str,
        _choices: &[LabeledChoice],
    ) -> Result<Option<RankedSelection>, SwitchboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            RankerBehavior::Select {
                index,
                confidence,
                reasoning,
            } => Ok(Some(RankedSelection {
                index: *index,
                confidence: *confidence,
                reasoning: reasoning.clone(),
            })),
            RankerBehavior::Undecided => Ok(None),
            RankerBehavior::Fail(reason) => Err(SwitchboardError::Ranker {
                message: reason.clone(),
                source: None,
            }),
        }
    }
}
