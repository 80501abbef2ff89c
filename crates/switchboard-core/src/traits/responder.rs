// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder trait for text-generation backends (Anthropic, OpenAI, etc.).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SwitchboardError;
use crate::types::{GenerationOptions, ResponderIdentity};

/// An external text-generation capability.
///
/// Responders handle all provider-specific concerns (request formatting,
/// wire protocol, output parsing, credentials); the routing core only sees
/// an identity and a `generate` call that either returns text or fails.
#[async_trait]
pub trait ResponderAdapter: Send + Sync {
    /// Identity of this responder (provider + model name).
    fn identity(&self) -> ResponderIdentity;

    /// Generate text for the given prompt.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, SwitchboardError>;
}

/// Shared handle to a live responder.
pub type ResponderHandle = Arc<dyn ResponderAdapter>;
