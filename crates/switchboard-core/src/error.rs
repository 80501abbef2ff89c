// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard routing framework.

use thiserror::Error;

use crate::types::AttemptFailure;

/// The primary error type used across Switchboard traits and routing operations.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// Configuration errors (invalid candidate pool, bad pattern rule,
    /// mismatched handle counts, unknown forced identity).
    #[error("configuration error: {0}")]
    Config(String),

    /// Responder errors (API failure, token limits, model not found).
    #[error("responder error: {message}")]
    Responder {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Relevance ranker errors. Always recovered by the selector's
    /// priority-order fallback; never reaches the routing caller.
    #[error("ranker error: {message}")]
    Ranker {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A forced responder identity matched nothing in the registry.
    #[error("responder not found: {identity}")]
    ResponderNotFound { identity: String },

    /// Every attempted responder failed and no fallback remains.
    #[error("all candidates failed ({} attempted): {}", .attempts.len(), list_attempts(.attempts))]
    AllCandidatesFailed { attempts: Vec<AttemptFailure> },

    /// Config persistence errors (file I/O, TOML serialization).
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

fn list_attempts(attempts: &[AttemptFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
