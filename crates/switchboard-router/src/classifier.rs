// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid query classification.
//!
//! Determines a query's category by pattern rules, a responder-backed
//! semantic classifier, or a hybrid of both. Pattern matching is near
//! zero-cost and high-precision for common phrasing; the llm path is slow
//! and costly but handles ambiguous phrasing, which is why hybrid runs
//! patterns first. Classification never fails: internal errors degrade to
//! the catch-all category with low confidence so routing can proceed.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use switchboard_core::{
    ClassificationMethod, ClassificationStrategy, GenerationOptions, ResponderHandle,
    SwitchboardError,
};

use crate::cache::{cache_key, CacheStats, ClassificationCache};
use crate::config::PatternRuleSet;
use crate::registry::CATCH_ALL_CATEGORY;

/// Confidence assigned to every pattern-rule match.
pub const PATTERN_CONFIDENCE: f32 = 0.85;

/// Minimum pattern confidence for hybrid mode to skip the llm stage.
const HYBRID_PATTERN_THRESHOLD: f32 = 0.8;

/// Confidence assigned when classification degrades to the catch-all.
const DEGRADED_CONFIDENCE: f32 = 0.3;

/// Token budget for the responder-backed classification call.
const CLASSIFIER_MAX_TOKENS: u32 = 256;

/// Most alternative categories kept from an llm reply.
const MAX_ALTERNATIVES: usize = 3;

/// The category assigned to a query plus provenance metadata.
#[derive(Debug, Clone)]
pub struct QueryClassification {
    /// Assigned category.
    pub category: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Why this category was chosen.
    pub reasoning: String,
    /// How this classification was produced.
    pub method: ClassificationMethod,
    /// Other plausible categories, at most three.
    pub alternatives: Vec<String>,
}

/// One compiled pattern rule, keeping the raw text for export and reasoning.
#[derive(Debug)]
struct PatternRule {
    raw: String,
    regex: Regex,
}

/// Ordered rules for one category.
#[derive(Debug)]
struct CategoryRules {
    category: String,
    rules: Vec<PatternRule>,
}

/// Classifies queries by pattern rules, an llm delegate, or both.
pub struct QueryClassifier {
    strategy: ClassificationStrategy,
    rules: Vec<CategoryRules>,
    delegate: Option<ResponderHandle>,
    cache: Option<ClassificationCache>,
}

impl QueryClassifier {
    /// Create a classifier with no rules and no llm delegate.
    pub fn new(strategy: ClassificationStrategy, cache: Option<ClassificationCache>) -> Self {
        Self {
            strategy,
            rules: Vec::new(),
            delegate: None,
            cache,
        }
    }

    /// Attach the responder used for llm-backed classification.
    pub fn set_delegate(&mut self, delegate: ResponderHandle) {
        self.delegate = Some(delegate);
    }

    /// The configured classification strategy.
    pub fn strategy(&self) -> ClassificationStrategy {
        self.strategy
    }

    /// Register an additional category → pattern rule at runtime.
    ///
    /// Rules are matched in registration order, first match wins. An
    /// invalid regex is a configuration error.
    pub fn add_rule(&mut self, category: &str, pattern: &str) -> Result<(), SwitchboardError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                SwitchboardError::Config(format!("invalid pattern rule '{pattern}': {e}"))
            })?;
        let rule = PatternRule {
            raw: pattern.to_string(),
            regex,
        };

        match self.rules.iter_mut().find(|r| r.category == category) {
            Some(entry) => entry.rules.push(rule),
            None => self.rules.push(CategoryRules {
                category: category.to_string(),
                rules: vec![rule],
            }),
        }
        Ok(())
    }

    /// All categories the classifier knows, in rule order, catch-all last.
    pub fn known_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.rules.iter().map(|r| r.category.clone()).collect();
        if !categories.iter().any(|c| c == CATCH_ALL_CATEGORY) {
            categories.push(CATCH_ALL_CATEGORY.to_string());
        }
        categories
    }

    /// The pattern table as serializable rule sets, for config export.
    pub fn rule_sets(&self) -> Vec<PatternRuleSet> {
        self.rules
            .iter()
            .map(|r| PatternRuleSet {
                category: r.category.clone(),
                patterns: r.rules.iter().map(|rule| rule.raw.clone()).collect(),
            })
            .collect()
    }

    /// Cache counters, when caching is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ClassificationCache::stats)
    }

    /// Drop all cached classifications.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }
    }

    /// Classify a query. Never fails; degraded results carry the catch-all
    /// category, low confidence, and a reasoning string naming the failure.
    pub async fn classify(&mut self, query: &str) -> QueryClassification {
        let key = self.cache.as_ref().map(|_| cache_key(query));

        if let (Some(cache), Some(key)) = (&mut self.cache, &key) {
            if let Some(hit) = cache.lookup(key) {
                return hit;
            }
        }

        let fresh = self.classify_fresh(query).await;
        debug!(
            category = %fresh.category,
            method = %fresh.method,
            confidence = fresh.confidence,
            "query classified"
        );

        if let (Some(cache), Some(key)) = (&mut self.cache, key) {
            cache.store(key, fresh.clone());
        }
        fresh
    }

    async fn classify_fresh(&self, query: &str) -> QueryClassification {
        match self.strategy {
            ClassificationStrategy::Pattern => {
                self.classify_pattern(query).unwrap_or_else(|| {
                    degraded(ClassificationMethod::Pattern, "no pattern rule matched")
                })
            }
            ClassificationStrategy::Llm => self.classify_llm(query).await,
            ClassificationStrategy::Hybrid => match self.classify_pattern(query) {
                Some(hit) if hit.confidence >= HYBRID_PATTERN_THRESHOLD => hit,
                _ => self.classify_llm(query).await,
            },
        }
    }

    fn classify_pattern(&self, query: &str) -> Option<QueryClassification> {
        for category_rules in &self.rules {
            for rule in &category_rules.rules {
                if rule.regex.is_match(query) {
                    return Some(QueryClassification {
                        category: category_rules.category.clone(),
                        confidence: PATTERN_CONFIDENCE,
                        reasoning: format!("matched pattern '{}'", rule.raw),
                        method: ClassificationMethod::Pattern,
                        alternatives: Vec::new(),
                    });
                }
            }
        }
        None
    }

    async fn classify_llm(&self, query: &str) -> QueryClassification {
        let Some(delegate) = &self.delegate else {
            return degraded(
                ClassificationMethod::Llm,
                "no classifier delegate configured",
            );
        };

        let prompt = build_classification_prompt(query, &self.known_categories());
        let options = GenerationOptions {
            system_prompt: None,
            temperature: 0.0,
            max_tokens: CLASSIFIER_MAX_TOKENS,
        };

        match delegate.generate(&prompt, &options).await {
            Ok(reply) => parse_llm_reply(&reply).unwrap_or_else(|parse_failure| {
                warn!(error = %parse_failure, "classifier reply unusable, degrading");
                degraded(ClassificationMethod::Llm, &parse_failure)
            }),
            Err(err) => {
                warn!(error = %err, "classifier delegate failed, degrading");
                degraded(ClassificationMethod::Llm, &err.to_string())
            }
        }
    }
}

fn degraded(method: ClassificationMethod, reason: &str) -> QueryClassification {
    QueryClassification {
        category: CATCH_ALL_CATEGORY.to_string(),
        confidence: DEGRADED_CONFIDENCE,
        reasoning: reason.to_string(),
        method,
        alternatives: Vec::new(),
    }
}

fn build_classification_prompt(query: &str, categories: &[String]) -> String {
    format!(
        "You are a query classifier. Assign the user query to exactly one of the \
         known categories.\n\
         \n\
         Known categories: {}\n\
         \n\
         Reply with a single JSON object and nothing else:\n\
         {{\"category\": \"<one of the known categories>\", \
         \"confidence\": <0.0 to 1.0>, \
         \"reasoning\": \"<one sentence>\", \
         \"alternatives\": [\"<up to three other plausible categories>\"]}}\n\
         \n\
         Query: {}",
        categories.join(", "),
        query
    )
}

/// Shape of the JSON object a classifier delegate is asked to produce.
#[derive(Debug, Deserialize)]
struct LlmReply {
    category: String,
    #[serde(default = "default_reply_confidence")]
    confidence: f32,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    alternatives: Vec<String>,
}

fn default_reply_confidence() -> f32 {
    0.5
}

fn parse_llm_reply(reply: &str) -> Result<QueryClassification, String> {
    let body = extract_json(reply);
    let parsed: LlmReply = serde_json::from_str(body)
        .map_err(|e| format!("unparseable classifier reply: {e}"))?;

    let category = parsed.category.trim().to_string();
    if category.is_empty() {
        return Err("classifier returned an empty category".to_string());
    }

    let mut alternatives = parsed.alternatives;
    alternatives.truncate(MAX_ALTERNATIVES);

    Ok(QueryClassification {
        category,
        confidence: parsed.confidence.clamp(0.0, 1.0),
        reasoning: parsed.reasoning,
        method: ClassificationMethod::Llm,
        alternatives,
    })
}

/// Strip a markdown code fence if the reply is wrapped in one.
fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}
