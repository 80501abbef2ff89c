// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock responder for deterministic testing.
//!
//! `MockResponder` implements `ResponderAdapter` with a scripted FIFO of
//! replies and failures, enabling fast, CI-runnable tests without external
//! API calls. A shared call counter lets tests assert that a responder was
//! (or was not) invoked at all.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchboard_core::error::SwitchboardError;
use switchboard_core::types::{GenerationOptions, ResponderIdentity};
use switchboard_core::ResponderAdapter;

/// One scripted outcome for a `generate` call.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Succeed with this text.
    Text(String),
    /// Fail with `SwitchboardError::Responder` carrying this message.
    Failure(String),
}

/// A mock responder driven by a scripted reply queue.
///
/// Replies are popped front-first. When the queue is empty, the configured
/// default outcome is returned: plain text for `new`, a failure for
/// `failing`. Clones share the script and call counter, so tests can keep
/// a clone for assertions after handing the responder to a router.
#[derive(Clone)]
pub struct MockResponder {
    identity: ResponderIdentity,
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
    default_reply: ScriptedReply,
    calls: Arc<AtomicUsize>,
}

impl MockResponder {
    /// Create a mock that answers "mock reply" once its script runs out.
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            identity: ResponderIdentity::new(provider, model),
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: ScriptedReply::Text("mock reply".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that fails every call with the given reason.
    pub fn failing(
        provider: impl Into<String>,
        model: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            identity: ResponderIdentity::new(provider, model),
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: ScriptedReply::Failure(reason.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock pre-loaded with successful text replies.
    pub fn with_replies(
        provider: impl Into<String>,
        model: impl Into<String>,
        replies: Vec<String>,
    ) -> Self {
        Self::with_script(
            provider,
            model,
            replies.into_iter().map(ScriptedReply::Text).collect(),
        )
    }

    /// Create a mock pre-loaded with arbitrary outcomes.
    pub fn with_script(
        provider: impl Into<String>,
        model: impl Into<String>,
        outcomes: Vec<ScriptedReply>,
    ) -> Self {
        Self {
            identity: ResponderIdentity::new(provider, model),
            script: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            default_reply: ScriptedReply::Text("mock reply".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Append a successful reply to the script.
    pub async fn add_reply(&self, text: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(ScriptedReply::Text(text.into()));
    }

    /// Append a failure to the script.
    pub async fn add_failure(&self, reason: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(ScriptedReply::Failure(reason.into()));
    }

    /// How many times `generate` has been called across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next_outcome(&self) -> ScriptedReply {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

#[async_trait]
impl ResponderAdapter for MockResponder {
    fn identity(&self) -> ResponderIdentity {
        self.identity.clone()
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, SwitchboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_outcome().await {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Failure(reason) => Err(SwitchboardError::Responder {
                message: reason,
                source: None,
            }),
        }
    }
}
