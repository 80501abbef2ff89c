// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing executor: classify → match → select → execute → finalize.
//!
//! `QueryRouter` owns the classifier, the candidate registry, and the
//! selector, and drives one query through them sequentially, applying the
//! fallback chain (candidate fallback, then router default) in single
//! mode or attempting up to K matching candidates in top-K mode. Every
//! mutating operation takes `&mut self`, so registry mutation can never
//! interleave with an in-flight `route()` on the same instance; callers
//! that share a router across tasks wrap it in their own lock.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use switchboard_core::{
    AttemptFailure, ClassificationMethod, ExecutionMode, GenerationOptions, RankerHandle,
    ResponderHandle, ResponderIdentity, SwitchboardError,
};

use crate::cache::{CacheStats, ClassificationCache};
use crate::classifier::{QueryClassification, QueryClassifier};
use crate::config::RouterSettings;
use crate::registry::{CandidateConfig, CandidateRegistry};
use crate::selector::{CandidateSelector, Selection};

/// Confidence recorded when no candidate matched and the default was used.
const DEFAULT_ROUTE_CONFIDENCE: f32 = 0.5;

/// Per-call routing options.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// System prompt forwarded to the responder.
    pub system_prompt: Option<String>,
    /// Sampling temperature forwarded to the responder.
    pub temperature: f32,
    /// Token budget forwarded to the responder.
    pub max_tokens: u32,
    /// When set, attempt up to this many matching candidates in priority
    /// order instead of the single-candidate fallback chain.
    pub top_k: Option<usize>,
    /// Route to this responder (provider name, model name, or
    /// `provider/model`), bypassing matching and selection.
    pub force_responder: Option<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            temperature: 0.7,
            max_tokens: 1024,
            top_k: None,
            force_responder: None,
        }
    }
}

/// The outcome of one routing call. Read-only once assembled.
#[derive(Debug, Clone)]
pub struct RoutingResult {
    /// Generated answer text.
    pub answer: String,
    /// Responder that produced the answer.
    pub responder: ResponderIdentity,
    /// Classification used for matching (synthetic when forced).
    pub classification: QueryClassification,
    /// Selection confidence.
    pub confidence: f32,
    /// Selection reasoning.
    pub reasoning: String,
    /// Whether any responder beyond the first attempt was used.
    pub used_fallback: bool,
    /// Why fallback happened, listing prior failures in attempt order.
    pub fallback_reason: Option<String>,
    /// Total wall-clock time for the routing call.
    pub elapsed: Duration,
}

/// Routes queries to the most suitable responder in a configured pool.
pub struct QueryRouter {
    settings: RouterSettings,
    classifier: QueryClassifier,
    registry: CandidateRegistry,
    selector: CandidateSelector,
    default_index: Option<usize>,
}

impl std::fmt::Debug for QueryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRouter")
            .field("settings", &self.settings)
            .field("candidates", &self.registry.len())
            .field("default_index", &self.default_index)
            .finish_non_exhaustive()
    }
}

impl QueryRouter {
    /// Create a router with an empty candidate pool.
    pub fn new(settings: RouterSettings) -> Self {
        let cache = settings
            .cache
            .enabled
            .then(|| ClassificationCache::new(settings.cache.ttl()));
        let classifier = QueryClassifier::new(settings.strategy, cache);
        Self {
            settings,
            classifier,
            registry: CandidateRegistry::new(),
            selector: CandidateSelector::new(),
            default_index: None,
        }
    }

    /// Attach the responder used for llm-backed classification.
    pub fn set_classifier_delegate(&mut self, delegate: ResponderHandle) {
        self.classifier.set_delegate(delegate);
    }

    /// Attach a relevance ranker for tie-breaks among matching candidates.
    pub fn set_ranker(&mut self, ranker: RankerHandle) {
        self.selector.set_ranker(ranker);
    }

    /// Register a candidate responder. Returns its registry index.
    pub fn add_candidate(
        &mut self,
        handle: ResponderHandle,
        specialties: Vec<String>,
        description: impl Into<String>,
        priority: u8,
        fallback: Option<ResponderIdentity>,
    ) -> Result<usize, SwitchboardError> {
        let config = CandidateConfig {
            identity: handle.identity(),
            specialties,
            description: description.into(),
            priority,
            enabled: true,
            fallback,
        };
        self.add_candidate_config(config, handle)
    }

    /// Register a candidate from an existing configuration. Used by config
    /// loading, where the persisted config is authoritative.
    pub fn add_candidate_config(
        &mut self,
        config: CandidateConfig,
        handle: ResponderHandle,
    ) -> Result<usize, SwitchboardError> {
        let identity = config.identity.clone();
        let index = self.registry.add(config, handle)?;
        debug!(index, identity = %identity, "candidate registered");
        Ok(index)
    }

    /// Remove the candidate at `index`. Subsequent indices shift down by
    /// one; the default index is adjusted to follow its candidate.
    pub fn remove_candidate(&mut self, index: usize) -> Result<(), SwitchboardError> {
        let removed = self.registry.remove(index)?;
        debug!(index, identity = %removed.config.identity, "candidate removed");

        self.default_index = match self.default_index {
            Some(default) if default == index => None,
            Some(default) if default > index => Some(default - 1),
            other => other,
        };
        Ok(())
    }

    /// Mark the candidate at `index` as the default fallback target.
    pub fn set_default(&mut self, index: usize) -> Result<(), SwitchboardError> {
        if index >= self.registry.len() {
            return Err(SwitchboardError::Config(format!(
                "default index {index} out of range ({} registered)",
                self.registry.len()
            )));
        }
        self.default_index = Some(index);
        Ok(())
    }

    /// Register an additional category → pattern rule at runtime.
    pub fn add_pattern_rule(
        &mut self,
        category: &str,
        pattern: &str,
    ) -> Result<(), SwitchboardError> {
        self.classifier.add_rule(category, pattern)
    }

    /// Classify a query without routing it.
    pub async fn classify(&mut self, query: &str) -> QueryClassification {
        self.classifier.classify(query).await
    }

    /// Classification cache counters, when caching is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.classifier.cache_stats()
    }

    /// Drop all cached classifications.
    pub fn clear_cache(&mut self) {
        self.classifier.clear_cache();
    }

    /// Cloned candidate configurations, in registry index order.
    pub fn candidates(&self) -> Vec<CandidateConfig> {
        self.registry.configs()
    }

    /// The router's runtime settings.
    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Index of the default candidate, if one is set.
    pub fn default_index(&self) -> Option<usize> {
        self.default_index
    }

    pub(crate) fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// Select the responder for a query without executing it.
    ///
    /// Returns the handle and the classification, for callers that want to
    /// inspect or reuse the chosen responder.
    pub async fn get_responder_for_query(
        &mut self,
        query: &str,
    ) -> Result<(ResponderHandle, QueryClassification), SwitchboardError> {
        if self.registry.is_empty() {
            return Err(SwitchboardError::Config(
                "no candidates configured".to_string(),
            ));
        }

        let classification = self.classifier.classify(query).await;
        let selection = self.select_for(query, &classification).await;
        let handle = self.registry.handle(selection.index).ok_or_else(|| {
            SwitchboardError::Internal(format!(
                "selected index {} vanished from registry",
                selection.index
            ))
        })?;
        Ok((handle, classification))
    }

    /// Route a query to the most suitable responder and execute it.
    ///
    /// Fails immediately on configuration errors (empty pool, bad `top_k`,
    /// unknown forced identity); otherwise only when every attempted
    /// responder failed, with `AllCandidatesFailed` listing each attempt.
    pub async fn route(
        &mut self,
        query: &str,
        options: &RouteOptions,
    ) -> Result<RoutingResult, SwitchboardError> {
        let started = Instant::now();

        if self.registry.is_empty() {
            return Err(SwitchboardError::Config(
                "no candidates configured".to_string(),
            ));
        }
        if options.top_k == Some(0) {
            return Err(SwitchboardError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }

        let mode = match options.top_k {
            Some(_) => ExecutionMode::TopK,
            None => ExecutionMode::Single,
        };

        let mut classification = self.classifier.classify(query).await;

        let (selection, plan) = if let Some(forced) = &options.force_responder {
            let Some((index, _)) = self.registry.find_by_identity(forced).into_iter().next()
            else {
                return Err(SwitchboardError::ResponderNotFound {
                    identity: forced.clone(),
                });
            };
            // The classifier already ran for metadata; its category is kept
            // but plays no part in selection.
            debug!(
                category = %classification.category,
                "classification recorded for forced routing"
            );
            classification = QueryClassification {
                category: classification.category.clone(),
                confidence: 1.0,
                reasoning: format!("routing forced to '{forced}'"),
                method: ClassificationMethod::Manual,
                alternatives: Vec::new(),
            };
            let selection = Selection {
                index,
                confidence: 1.0,
                reasoning: "forced responder".to_string(),
            };
            let plan = self.single_plan(index);
            (selection, plan)
        } else {
            let matches = self.registry.find_matches(&classification.category);
            if matches.is_empty() {
                let index = self.default_index.unwrap_or(0);
                let selection = Selection {
                    index,
                    confidence: DEFAULT_ROUTE_CONFIDENCE,
                    reasoning: "no candidate matched category; used default responder"
                        .to_string(),
                };
                let plan = self.single_plan(index);
                (selection, plan)
            } else {
                let selection = self.selector.select(query, &matches).await;
                let plan = match mode {
                    ExecutionMode::Single => self.single_plan(selection.index),
                    ExecutionMode::TopK => {
                        let k = options.top_k.unwrap_or(1);
                        matches.iter().take(k).map(|(index, _)| *index).collect()
                    }
                };
                (selection, plan)
            }
        };

        let (answer, responder, failures) = self.execute_plan(query, options, &plan).await?;

        let used_fallback = !failures.is_empty();
        let fallback_reason = used_fallback.then(|| {
            format!(
                "fell back after {} failed attempt(s): {}",
                failures.len(),
                failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            )
        });

        info!(
            responder = %responder,
            category = %classification.category,
            method = %classification.method,
            mode = %mode,
            used_fallback,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "routing complete"
        );

        Ok(RoutingResult {
            answer,
            responder,
            classification,
            confidence: selection.confidence,
            reasoning: selection.reasoning,
            used_fallback,
            fallback_reason,
            elapsed: started.elapsed(),
        })
    }

    async fn select_for(
        &mut self,
        query: &str,
        classification: &QueryClassification,
    ) -> Selection {
        let matches = self.registry.find_matches(&classification.category);
        if matches.is_empty() {
            Selection {
                index: self.default_index.unwrap_or(0),
                confidence: DEFAULT_ROUTE_CONFIDENCE,
                reasoning: "no candidate matched category; used default responder".to_string(),
            }
        } else {
            self.selector.select(query, &matches).await
        }
    }

    /// Single-mode attempt plan: the selected candidate, its configured
    /// fallback, then the router default, deduplicated by identity.
    fn single_plan(&self, index: usize) -> Vec<usize> {
        let mut plan = vec![index];

        if let Some(config) = self.registry.config(index) {
            if let Some(fallback) = &config.fallback {
                match self
                    .registry
                    .find_by_identity(&fallback.to_string())
                    .into_iter()
                    .next()
                {
                    Some((fallback_index, _)) => {
                        self.push_distinct(&mut plan, fallback_index);
                    }
                    None => {
                        warn!(
                            fallback = %fallback,
                            "configured fallback responder not found in registry"
                        );
                    }
                }
            }
        }

        if let Some(default_index) = self.default_index {
            self.push_distinct(&mut plan, default_index);
        }
        plan
    }

    fn push_distinct(&self, plan: &mut Vec<usize>, index: usize) {
        let Some(candidate) = self.registry.config(index) else {
            return;
        };
        let already_planned = plan.iter().any(|&planned| {
            self.registry
                .config(planned)
                .is_some_and(|c| c.identity == candidate.identity)
        });
        if !already_planned {
            plan.push(index);
        }
    }

    /// Invoke responders in plan order until one succeeds, accumulating
    /// failure reasons for diagnostics.
    async fn execute_plan(
        &self,
        query: &str,
        options: &RouteOptions,
        plan: &[usize],
    ) -> Result<(String, ResponderIdentity, Vec<AttemptFailure>), SwitchboardError> {
        let generation = GenerationOptions {
            system_prompt: options.system_prompt.clone(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let mut attempts: Vec<AttemptFailure> = Vec::new();
        for &index in plan {
            let (Some(handle), Some(config)) =
                (self.registry.handle(index), self.registry.config(index))
            else {
                continue;
            };

            match handle.generate(query, &generation).await {
                Ok(answer) => return Ok((answer, config.identity.clone(), attempts)),
                Err(err) => {
                    warn!(
                        responder = %config.identity,
                        error = %err,
                        "responder failed, continuing fallback chain"
                    );
                    attempts.push(AttemptFailure {
                        identity: config.identity.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Err(SwitchboardError::AllCandidatesFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchboard_core::ClassificationStrategy;
    use switchboard_test_utils::MockResponder;

    fn pattern_settings() -> RouterSettings {
        RouterSettings {
            strategy: ClassificationStrategy::Pattern,
            cache: crate::config::CacheSettings {
                enabled: false,
                ttl_secs: None,
            },
        }
    }

    fn router_with_rules() -> QueryRouter {
        let mut router = QueryRouter::new(pattern_settings());
        router.add_pattern_rule("sales", r"price|cost|buy").unwrap();
        router.add_pattern_rule("support", r"error|broken").unwrap();
        router
    }

    #[tokio::test]
    async fn routes_to_matching_specialist() {
        let mut router = router_with_rules();
        let sales = MockResponder::with_replies("sales-bot", "m1", vec!["quote".into()]);
        let support = MockResponder::new("support-bot", "m2");
        router
            .add_candidate(
                Arc::new(sales.clone()),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();
        router
            .add_candidate(
                Arc::new(support.clone()),
                vec!["support".into()],
                "support specialist",
                5,
                None,
            )
            .unwrap();

        let result = router
            .route("how much does it cost?", &RouteOptions::default())
            .await
            .unwrap();

        assert_eq!(result.answer, "quote");
        assert_eq!(result.responder.provider, "sales-bot");
        assert_eq!(result.classification.category, "sales");
        assert!(!result.used_fallback);
        assert!(result.fallback_reason.is_none());
        assert_eq!(support.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_registry_is_config_error() {
        let mut router = router_with_rules();
        let err = router
            .route("anything", &RouteOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchboardError::Config(_)));
    }

    #[tokio::test]
    async fn top_k_zero_is_config_error() {
        let mut router = router_with_rules();
        router
            .add_candidate(
                Arc::new(MockResponder::new("a", "m")),
                vec!["general".into()],
                "",
                5,
                None,
            )
            .unwrap();

        let options = RouteOptions {
            top_k: Some(0),
            ..RouteOptions::default()
        };
        let err = router.route("anything", &options).await.unwrap_err();
        assert!(matches!(err, SwitchboardError::Config(_)));
    }

    #[tokio::test]
    async fn fallback_to_default_on_primary_failure() {
        let mut router = router_with_rules();
        let primary = MockResponder::failing("primary", "m1", "upstream 500");
        let backup = MockResponder::with_replies("backup", "m2", vec!["recovered".into()]);
        router
            .add_candidate(
                Arc::new(primary),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();
        let backup_index = router
            .add_candidate(
                Arc::new(backup),
                vec!["general".into()],
                "generalist",
                3,
                None,
            )
            .unwrap();
        router.set_default(backup_index).unwrap();

        // The sales specialist outranks the catch-all for a sales query
        // only via the ranker; without one, priority order decides. Give
        // the specialist the higher priority so it is attempted first.
        let result = router
            .route("what is the price?", &RouteOptions::default())
            .await
            .unwrap();

        assert_eq!(result.answer, "recovered");
        assert_eq!(result.responder.provider, "backup");
        assert!(result.used_fallback);
        let reason = result.fallback_reason.unwrap();
        assert!(reason.contains("primary/m1"));
        assert!(reason.contains("upstream 500"));
    }

    #[tokio::test]
    async fn no_default_and_primary_failure_aggregates_error() {
        let mut router = router_with_rules();
        router
            .add_candidate(
                Arc::new(MockResponder::failing("only", "m1", "down")),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();

        let err = router
            .route("what is the price?", &RouteOptions::default())
            .await
            .unwrap_err();

        match err {
            SwitchboardError::AllCandidatesFailed { attempts } => {
                assert_eq!(attempts.len(), 1);
                assert_eq!(attempts[0].identity.provider, "only");
            }
            other => panic!("expected AllCandidatesFailed, got {other}"),
        }
    }

    #[tokio::test]
    async fn candidate_fallback_tried_before_router_default() {
        let mut router = router_with_rules();
        let primary = MockResponder::failing("primary", "m1", "down");
        let candidate_fallback =
            MockResponder::with_replies("fb", "m2", vec!["from fallback".into()]);
        let default = MockResponder::new("default", "m3");

        router
            .add_candidate(
                Arc::new(primary),
                vec!["sales".into()],
                "sales specialist",
                5,
                Some(ResponderIdentity::new("fb", "m2")),
            )
            .unwrap();
        router
            .add_candidate(
                Arc::new(candidate_fallback),
                vec!["overflow".into()],
                "overflow capacity",
                5,
                None,
            )
            .unwrap();
        let default_index = router
            .add_candidate(
                Arc::new(default.clone()),
                vec!["general".into()],
                "generalist",
                1,
                None,
            )
            .unwrap();
        router.set_default(default_index).unwrap();

        let result = router
            .route("what is the price?", &RouteOptions::default())
            .await
            .unwrap();

        assert_eq!(result.answer, "from fallback");
        assert_eq!(result.responder.provider, "fb");
        assert_eq!(default.call_count(), 0, "default must not be reached");
    }

    #[tokio::test]
    async fn top_k_stops_at_first_success() {
        let mut router = router_with_rules();
        let first = MockResponder::failing("first", "m1", "down");
        let second = MockResponder::with_replies("second", "m2", vec!["second wins".into()]);
        let third = MockResponder::new("third", "m3");

        router
            .add_candidate(Arc::new(first), vec!["sales".into()], "a", 9, None)
            .unwrap();
        router
            .add_candidate(Arc::new(second), vec!["sales".into()], "b", 5, None)
            .unwrap();
        router
            .add_candidate(Arc::new(third.clone()), vec!["sales".into()], "c", 1, None)
            .unwrap();

        let options = RouteOptions {
            top_k: Some(3),
            ..RouteOptions::default()
        };
        let result = router.route("what is the price?", &options).await.unwrap();

        assert_eq!(result.answer, "second wins");
        assert!(result.used_fallback);
        assert_eq!(third.call_count(), 0, "later candidates must not be attempted");
    }

    #[tokio::test]
    async fn top_k_exhaustion_lists_failures_in_attempt_order() {
        let mut router = router_with_rules();
        router
            .add_candidate(
                Arc::new(MockResponder::failing("a", "m1", "first down")),
                vec!["sales".into()],
                "a",
                9,
                None,
            )
            .unwrap();
        router
            .add_candidate(
                Arc::new(MockResponder::failing("b", "m2", "second down")),
                vec!["sales".into()],
                "b",
                5,
                None,
            )
            .unwrap();
        router
            .add_candidate(
                Arc::new(MockResponder::failing("c", "m3", "third down")),
                vec!["sales".into()],
                "c",
                1,
                None,
            )
            .unwrap();

        let options = RouteOptions {
            top_k: Some(3),
            ..RouteOptions::default()
        };
        let err = router.route("what is the price?", &options).await.unwrap_err();

        match err {
            SwitchboardError::AllCandidatesFailed { attempts } => {
                assert_eq!(attempts.len(), 3);
                let providers: Vec<&str> = attempts
                    .iter()
                    .map(|a| a.identity.provider.as_str())
                    .collect();
                assert_eq!(providers, vec!["a", "b", "c"]);
                assert_eq!(attempts[0].reason, "responder error: first down");
            }
            other => panic!("expected AllCandidatesFailed, got {other}"),
        }
    }

    #[tokio::test]
    async fn forced_routing_bypasses_category_matching() {
        let mut router = router_with_rules();
        let sales = MockResponder::new("sales-bot", "m1");
        let support = MockResponder::with_replies("support-bot", "m2", vec!["forced".into()]);
        router
            .add_candidate(
                Arc::new(sales.clone()),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();
        router
            .add_candidate(
                Arc::new(support),
                vec!["support".into()],
                "support specialist",
                5,
                None,
            )
            .unwrap();

        let options = RouteOptions {
            force_responder: Some("support-bot".to_string()),
            ..RouteOptions::default()
        };
        // A sales query, forced to the support responder.
        let result = router.route("what is the price?", &options).await.unwrap();

        assert_eq!(result.answer, "forced");
        assert_eq!(result.responder.provider, "support-bot");
        assert_eq!(result.classification.method, ClassificationMethod::Manual);
        // Classifier metadata is retained even though it was ignored.
        assert_eq!(result.classification.category, "sales");
        assert_eq!(sales.call_count(), 0);
    }

    #[tokio::test]
    async fn forcing_unknown_responder_is_not_found() {
        let mut router = router_with_rules();
        router
            .add_candidate(
                Arc::new(MockResponder::new("a", "m")),
                vec!["general".into()],
                "",
                5,
                None,
            )
            .unwrap();

        let options = RouteOptions {
            force_responder: Some("nonexistent".to_string()),
            ..RouteOptions::default()
        };
        let err = router.route("anything", &options).await.unwrap_err();
        assert!(matches!(err, SwitchboardError::ResponderNotFound { .. }));
    }

    #[tokio::test]
    async fn unmatched_category_falls_back_to_default_candidate() {
        let mut router = router_with_rules();
        let sales = MockResponder::new("sales-bot", "m1");
        let generalist = MockResponder::with_replies("any", "m2", vec!["generalist".into()]);
        router
            .add_candidate(
                Arc::new(sales),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();
        let generalist_index = router
            .add_candidate(
                // No "general" specialty: this candidate matches nothing,
                // it is reachable only as the default.
                Arc::new(generalist),
                vec!["archive".into()],
                "archivist",
                5,
                None,
            )
            .unwrap();
        router.set_default(generalist_index).unwrap();

        // "broken" classifies as support, which no candidate serves.
        let result = router
            .route("everything is broken", &RouteOptions::default())
            .await
            .unwrap();

        assert_eq!(result.answer, "generalist");
        assert!(result.reasoning.contains("default"));
    }

    #[tokio::test]
    async fn remove_candidate_adjusts_default_index() {
        let mut router = router_with_rules();
        for provider in ["a", "b", "c"] {
            router
                .add_candidate(
                    Arc::new(MockResponder::new(provider, "m")),
                    vec!["general".into()],
                    "",
                    5,
                    None,
                )
                .unwrap();
        }
        router.set_default(2).unwrap();

        router.remove_candidate(1).unwrap();
        assert_eq!(router.default_index(), Some(1), "default follows its candidate");

        router.remove_candidate(1).unwrap();
        assert_eq!(router.default_index(), None, "removed default is cleared");
    }

    #[tokio::test]
    async fn get_responder_for_query_selects_without_executing() {
        let mut router = router_with_rules();
        let sales = MockResponder::new("sales-bot", "m1");
        router
            .add_candidate(
                Arc::new(sales.clone()),
                vec!["sales".into()],
                "sales specialist",
                5,
                None,
            )
            .unwrap();

        let (handle, classification) = router
            .get_responder_for_query("what is the price?")
            .await
            .unwrap();

        assert_eq!(handle.identity().provider, "sales-bot");
        assert_eq!(classification.category, "sales");
        assert_eq!(sales.call_count(), 0, "selection must not execute");
    }

    #[tokio::test]
    async fn routing_result_records_elapsed_time() {
        let mut router = router_with_rules();
        router
            .add_candidate(
                Arc::new(MockResponder::new("a", "m")),
                vec!["general".into()],
                "",
                5,
                None,
            )
            .unwrap();

        let result = router
            .route("hello there", &RouteOptions::default())
            .await
            .unwrap();
        assert!(result.elapsed > Duration::ZERO);
    }
}
