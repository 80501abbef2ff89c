// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the Switchboard framework.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies a responder by provider name and model name.
///
/// Displayed as `provider/model` in logs, attempt histories, and routing
/// results. This is the only identity a responder carries inside the
/// routing core; credentials live in the handle and are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderIdentity {
    /// Provider name (e.g. "anthropic", "openai", "ollama").
    pub provider: String,
    /// Model name within the provider.
    pub model: String,
}

impl ResponderIdentity {
    /// Create an identity from provider and model names.
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Whether `name` refers to this identity: matches the provider name,
    /// the model name, or the full `provider/model` form, case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.provider)
            || name.eq_ignore_ascii_case(&self.model)
            || name.eq_ignore_ascii_case(&self.to_string())
    }
}

impl std::fmt::Display for ResponderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Generation parameters passed through to a responder untouched.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Optional system prompt.
    pub system_prompt: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// The configured classification strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStrategy {
    /// Regex rules only. Near-zero cost, high precision for common phrasing.
    Pattern,
    /// Responder-backed semantic classification. Slow but handles ambiguity.
    Llm,
    /// Pattern first; fall through to llm when no confident match.
    Hybrid,
}

/// How a specific classification was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ClassificationMethod {
    /// A pattern rule matched.
    Pattern,
    /// The responder-backed classifier answered (or degraded).
    Llm,
    /// Served from the classification cache.
    Cache,
    /// Synthesized for forced routing.
    Manual,
}

/// How the executor attempts candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionMode {
    /// One invocation, then the fallback chain on failure.
    Single,
    /// Up to K matching candidates in priority order until one succeeds.
    TopK,
}

/// One failed responder invocation, accumulated for the aggregated
/// all-candidates-failed error and for fallback diagnostics.
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    /// The responder that was attempted.
    pub identity: ResponderIdentity,
    /// Why it failed.
    pub reason: String,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.identity, self.reason)
    }
}

/// A candidate presented to the relevance ranker, labeled by description.
#[derive(Debug, Clone)]
pub struct LabeledChoice {
    /// Position within the choice set handed to the ranker.
    pub index: usize,
    /// Human-readable label (the candidate's description).
    pub label: String,
}

/// A ranker's answer: which choice it picked and why.
#[derive(Debug, Clone)]
pub struct RankedSelection {
    /// Index into the choice set the ranker was given.
    pub index: usize,
    /// Ranker confidence in [0, 1].
    pub confidence: f32,
    /// Ranker reasoning.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn identity_displays_as_provider_slash_model() {
        let id = ResponderIdentity::new("anthropic", "claude-sonnet-4-20250514");
        assert_eq!(id.to_string(), "anthropic/claude-sonnet-4-20250514");
    }

    #[test]
    fn identity_matches_provider_model_or_full_form() {
        let id = ResponderIdentity::new("OpenAI", "gpt-4o");
        assert!(id.matches("openai"));
        assert!(id.matches("GPT-4o"));
        assert!(id.matches("openai/gpt-4o"));
        assert!(!id.matches("anthropic"));
    }

    #[test]
    fn strategy_round_trips_through_string_form() {
        for strategy in [
            ClassificationStrategy::Pattern,
            ClassificationStrategy::Llm,
            ClassificationStrategy::Hybrid,
        ] {
            let s = strategy.to_string();
            assert_eq!(ClassificationStrategy::from_str(&s).unwrap(), strategy);
        }
    }

    #[test]
    fn strategy_serializes_lowercase() {
        let json = serde_json::to_string(&ClassificationStrategy::Hybrid).unwrap();
        assert_eq!(json, "\"hybrid\"");
        let parsed: ClassificationStrategy = serde_json::from_str("\"pattern\"").unwrap();
        assert_eq!(parsed, ClassificationStrategy::Pattern);
    }

    #[test]
    fn method_display_is_lowercase() {
        assert_eq!(ClassificationMethod::Pattern.to_string(), "pattern");
        assert_eq!(ClassificationMethod::Llm.to_string(), "llm");
        assert_eq!(ClassificationMethod::Cache.to_string(), "cache");
        assert_eq!(ClassificationMethod::Manual.to_string(), "manual");
    }

    #[test]
    fn execution_mode_display() {
        assert_eq!(ExecutionMode::Single.to_string(), "single");
        assert_eq!(ExecutionMode::TopK.to_string(), "top_k");
    }

    #[test]
    fn attempt_failure_renders_identity_and_reason() {
        let attempt = AttemptFailure {
            identity: ResponderIdentity::new("ollama", "llama3"),
            reason: "connection refused".into(),
        };
        assert_eq!(attempt.to_string(), "ollama/llama3: connection refused");
    }

    #[test]
    fn generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!(opts.system_prompt.is_none());
        assert_eq!(opts.max_tokens, 1024);
    }
}
