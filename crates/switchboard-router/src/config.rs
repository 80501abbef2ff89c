// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the routing core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at load time. The persisted document (`RouterDocument`)
//! deliberately excludes responder handles and their credentials; handles
//! are re-injected positionally on load.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use switchboard_core::ClassificationStrategy;

use crate::registry::CandidateConfig;

/// Runtime settings for a router instance.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Classification strategy.
    pub strategy: ClassificationStrategy,
    /// Classification cache settings.
    pub cache: CacheSettings,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            cache: CacheSettings::default(),
        }
    }
}

/// Classification cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    /// Whether classifications are cached at all.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Entry time-to-live in seconds. Unset means entries never expire.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl CacheSettings {
    /// The TTL as a `Duration`, if one is configured.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: None,
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

/// One category's pattern rules in serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRuleSet {
    /// Category the rules classify into.
    pub category: String,
    /// Raw regex patterns, matched case-insensitively in order.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Top-level router section of the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterSection {
    /// Classification strategy.
    #[serde(default = "default_strategy")]
    pub strategy: ClassificationStrategy,

    /// Index of the default candidate tried when matching comes up empty
    /// and as the last fallback step.
    #[serde(default)]
    pub default_index: Option<usize>,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            default_index: None,
        }
    }
}

fn default_strategy() -> ClassificationStrategy {
    ClassificationStrategy::Hybrid
}

/// The persisted router configuration document.
///
/// Everything a router needs to be reconstructed except the live responder
/// handles, which the caller supplies again on load in the same order as
/// `candidates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterDocument {
    /// Strategy and default-candidate settings.
    #[serde(default)]
    pub router: RouterSection,

    /// Classification cache settings.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Candidate configurations, in registry index order.
    #[serde(default)]
    pub candidates: Vec<CandidateConfig>,

    /// Pattern rule table, in match order.
    #[serde(default)]
    pub patterns: Vec<PatternRuleSet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::ResponderIdentity;

    #[test]
    fn defaults_are_hybrid_with_cache_enabled() {
        let doc = RouterDocument::default();
        assert_eq!(doc.router.strategy, ClassificationStrategy::Hybrid);
        assert!(doc.router.default_index.is_none());
        assert!(doc.cache.enabled);
        assert!(doc.cache.ttl_secs.is_none());
    }

    #[test]
    fn cache_ttl_converts_to_duration() {
        let settings = CacheSettings {
            enabled: true,
            ttl_secs: Some(3600),
        };
        assert_eq!(settings.ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(CacheSettings::default().ttl(), None);
    }

    #[test]
    fn document_round_trips_through_toml() {
        let doc = RouterDocument {
            router: RouterSection {
                strategy: ClassificationStrategy::Pattern,
                default_index: Some(1),
            },
            cache: CacheSettings {
                enabled: false,
                ttl_secs: Some(60),
            },
            candidates: vec![CandidateConfig {
                identity: ResponderIdentity::new("openai", "gpt-4o"),
                specialties: vec!["sales".to_string()],
                description: "sales specialist".to_string(),
                priority: 7,
                enabled: true,
                fallback: Some(ResponderIdentity::new("ollama", "llama3")),
            }],
            patterns: vec![PatternRuleSet {
                category: "sales".to_string(),
                patterns: vec!["price".to_string(), "cost".to_string()],
            }],
        };

        let rendered = toml::to_string_pretty(&doc).unwrap();
        let parsed: RouterDocument = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.router.strategy, ClassificationStrategy::Pattern);
        assert_eq!(parsed.router.default_index, Some(1));
        assert_eq!(parsed.candidates, doc.candidates);
        assert_eq!(parsed.patterns, doc.patterns);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
[router]
strategy = "pattern"
defautl_index = 2
"#;
        let err = toml::from_str::<RouterDocument>(toml).unwrap_err();
        assert!(err.to_string().contains("defautl_index") || err.to_string().contains("unknown field"));
    }
}
