// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the routing core.

pub mod ranker;
pub mod responder;

pub use ranker::{RankerHandle, RelevanceRanker};
pub use responder::{ResponderAdapter, ResponderHandle};
