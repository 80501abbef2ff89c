// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tie-break selection among candidates matching a category.
//!
//! Pure priority ordering is too coarse when several candidates declare
//! the same specialty; the relevance ranker resolves genuine ambiguity
//! against the actual query text, while the priority fallback guarantees
//! selection never blocks on ranker failure.

use tracing::{debug, warn};

use switchboard_core::{LabeledChoice, RankerHandle};

use crate::registry::CandidateConfig;

/// Confidence when exactly one candidate matched the category.
const SINGLE_MATCH_CONFIDENCE: f32 = 0.9;

/// Confidence when the ranker was unavailable and priority order decided.
const PRIORITY_FALLBACK_CONFIDENCE: f32 = 0.5;

/// The selector's answer: which registry index to route to and why.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Registry index of the chosen candidate.
    pub index: usize,
    /// Selection confidence in [0, 1].
    pub confidence: f32,
    /// Why this candidate was chosen.
    pub reasoning: String,
}

/// Chooses one candidate from a non-empty match list.
#[derive(Default)]
pub struct CandidateSelector {
    ranker: Option<RankerHandle>,
}

impl CandidateSelector {
    /// Create a selector with no ranker; ties resolve by priority order.
    pub fn new() -> Self {
        Self { ranker: None }
    }

    /// Attach a relevance ranker for tie-breaks.
    pub fn set_ranker(&mut self, ranker: RankerHandle) {
        self.ranker = Some(ranker);
    }

    /// Select a candidate for `query` from `matches`.
    ///
    /// `matches` is the registry's category match list (priority-ordered,
    /// non-empty). A single entry is selected outright; multiple entries
    /// go to the ranker, degrading to the highest-priority match when the
    /// ranker fails, is undecided, or answers out of range.
    pub async fn select(&self, query: &str, matches: &[(usize, CandidateConfig)]) -> Selection {
        debug_assert!(!matches.is_empty(), "selector requires at least one match");

        if matches.len() == 1 {
            return Selection {
                index: matches[0].0,
                confidence: SINGLE_MATCH_CONFIDENCE,
                reasoning: "only candidate matching category".to_string(),
            };
        }

        let Some(ranker) = &self.ranker else {
            return priority_fallback(matches);
        };

        let choices: Vec<LabeledChoice> = matches
            .iter()
            .enumerate()
            .map(|(position, (_, config))| LabeledChoice {
                index: position,
                label: if config.description.is_empty() {
                    config.identity.to_string()
                } else {
                    config.description.clone()
                },
            })
            .collect();

        match ranker.rank(query, &choices).await {
            Ok(Some(ranked)) if ranked.index < matches.len() => {
                debug!(
                    ranker = ranker.name(),
                    choice = ranked.index,
                    confidence = ranked.confidence,
                    "ranker resolved tie-break"
                );
                Selection {
                    index: matches[ranked.index].0,
                    confidence: ranked.confidence,
                    reasoning: ranked.reasoning,
                }
            }
            Ok(Some(ranked)) => {
                // Contract violation: the ranker picked an index outside
                // the choice set it was given.
                warn!(
                    ranker = ranker.name(),
                    choice = ranked.index,
                    choices = matches.len(),
                    "ranker selected out-of-range choice, using priority order"
                );
                priority_fallback(matches)
            }
            Ok(None) => {
                debug!(ranker = ranker.name(), "ranker undecided, using priority order");
                priority_fallback(matches)
            }
            Err(err) => {
                warn!(
                    ranker = ranker.name(),
                    error = %err,
                    "ranker failed, using priority order"
                );
                priority_fallback(matches)
            }
        }
    }
}

fn priority_fallback(matches: &[(usize, CandidateConfig)]) -> Selection {
    Selection {
        index: matches[0].0,
        confidence: PRIORITY_FALLBACK_CONFIDENCE,
        reasoning: "ranker unavailable, used priority order".to_string(),
    }
}
