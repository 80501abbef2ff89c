// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard routing framework.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Switchboard workspace. The routing core
//! in `switchboard-router` consumes responders and rankers exclusively
//! through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use types::{
    AttemptFailure, ClassificationMethod, ClassificationStrategy, ExecutionMode,
    GenerationOptions, LabeledChoice, RankedSelection, ResponderIdentity,
};

// Re-export collaborator traits and handles at crate root.
pub use traits::{RankerHandle, RelevanceRanker, ResponderAdapter, ResponderHandle};
