//! Ordered confirmation fallback chain.
//!
//! Each tier is tried in order; a tier that fails hands the question to the
//! next one. The chain always ends in a synchronous last-resort tier that
//! cannot fail, so a confirmation request always produces an answer.

use crate::backend::Host;
use async_trait::async_trait;
use jot_core::HostResult;
use std::sync::Arc;
use tracing::{debug, warn};

/// Question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
}

impl ConfirmRequest {
    /// Prompt shown when a previous session left unsaved content behind.
    pub fn recovery() -> Self {
        Self {
            title: "Recovery".to_string(),
            message: "We found unsaved changes from your previous session. \
                      Would you like to recover them?"
                .to_string(),
        }
    }
}

/// A fallible confirmation mechanism.
#[async_trait]
pub trait ConfirmationProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Ask the question.
    ///
    /// # Errors
    /// Any error hands the request to the next tier.
    async fn confirm(&self, request: &ConfirmRequest) -> HostResult<bool>;
}

/// The final tier. Blocks the calling thread and always answers.
pub trait LastResortConfirm: Send + Sync + 'static {
    fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Last resort that answers without asking.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl LastResortConfirm for FixedAnswer {
    fn confirm(&self, _request: &ConfirmRequest) -> bool {
        self.0
    }
}

/// Tier 1: the host's dedicated recovery dialog.
pub struct RecoveryDialogTier {
    host: Arc<dyn Host>,
}

#[async_trait]
impl ConfirmationProvider for RecoveryDialogTier {
    fn name(&self) -> &'static str {
        "show_recovery_dialog"
    }

    async fn confirm(&self, _request: &ConfirmRequest) -> HostResult<bool> {
        self.host.show_recovery_dialog().await
    }
}

/// Tier 2: a plain host-native yes/no question.
pub struct HostAskTier {
    host: Arc<dyn Host>,
}

#[async_trait]
impl ConfirmationProvider for HostAskTier {
    fn name(&self) -> &'static str {
        "ask_confirmation"
    }

    async fn confirm(&self, request: &ConfirmRequest) -> HostResult<bool> {
        self.host
            .ask_confirmation(&request.title, &request.message)
            .await
    }
}

/// Ordered list of confirmation tiers ending in an infallible one.
pub struct ConfirmationChain {
    tiers: Vec<Box<dyn ConfirmationProvider>>,
    last_resort: Arc<dyn LastResortConfirm>,
}

impl ConfirmationChain {
    /// Chain with no fallible tiers; every request goes to `last_resort`.
    pub fn new(last_resort: Arc<dyn LastResortConfirm>) -> Self {
        Self {
            tiers: Vec::new(),
            last_resort,
        }
    }

    /// Standard recovery chain: host dialog, then host question, then
    /// `last_resort`.
    pub fn for_host(host: Arc<dyn Host>, last_resort: Arc<dyn LastResortConfirm>) -> Self {
        Self::new(last_resort)
            .with_tier(RecoveryDialogTier {
                host: Arc::clone(&host),
            })
            .with_tier(HostAskTier { host })
    }

    /// Append a fallible tier, tried after the existing ones.
    pub fn with_tier(mut self, tier: impl ConfirmationProvider + 'static) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    /// Number of fallible tiers ahead of the last resort.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Ask `request`, falling through tiers on failure.
    ///
    /// # Returns
    /// The first answer any tier produced.
    pub async fn confirm(&self, request: &ConfirmRequest) -> bool {
        for tier in &self.tiers {
            match tier.confirm(request).await {
                Ok(answer) => {
                    debug!(tier = tier.name(), answer, "confirmation answered");
                    return answer;
                }
                Err(err) => {
                    warn!(tier = tier.name(), error = %err, "confirmation tier failed; falling back");
                }
            }
        }

        let last_resort = Arc::clone(&self.last_resort);
        let request = request.clone();
        match tokio::task::spawn_blocking(move || last_resort.confirm(&request)).await {
            Ok(answer) => answer,
            Err(err) => {
                // Declining would delete the snapshot; keep the user's content.
                warn!(error = %err, "last-resort confirmation aborted; keeping content");
                true
            }
        }
    }
}
