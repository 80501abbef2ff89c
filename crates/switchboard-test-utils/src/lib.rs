// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchboard integration tests.

pub mod mock_ranker;
pub mod mock_responder;

pub use mock_ranker::MockRanker;
pub use mock_responder::{MockResponder, ScriptedReply};
