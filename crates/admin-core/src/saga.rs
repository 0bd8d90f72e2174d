//! Compensation list for multi-step remote mutations
//!
//! A saga records one undo step per forward step that already succeeded.
//! On failure the steps run in reverse order, each retried a bounded number
//! of times. Compensation failures are logged and never replace the original
//! error.

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, error, warn};

use admin_shared::config::SagaSettings;

use crate::error::DomainError;

type Compensation = Box<dyn Fn() -> BoxFuture<'static, Result<(), DomainError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &SagaSettings) -> Self {
        Self {
            attempts: settings.compensation_attempts.max(1),
            backoff: Duration::from_millis(settings.compensation_backoff_ms),
        }
    }

    /// Retries without waiting between attempts
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff: Duration::ZERO,
        }
    }
}

pub struct Saga {
    name: &'static str,
    policy: RetryPolicy,
    steps: Vec<(String, Compensation)>,
}

impl Saga {
    pub fn new(name: &'static str, policy: RetryPolicy) -> Self {
        Self {
            name,
            policy,
            steps: Vec::new(),
        }
    }

    /// Register the undo step for a forward step that just succeeded.
    /// The closure may run more than once and must be safe to repeat.
    pub fn on_rollback<F, Fut>(&mut self, label: impl Into<String>, step: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        self.steps
            .push((label.into(), Box::new(move || Box::pin(step()))));
    }

    /// All forward steps succeeded; drop the compensations
    pub fn commit(self) {
        debug!(saga = self.name, steps = self.steps.len(), "Saga committed");
    }

    /// Run compensations newest first. Returns the labels that still failed
    /// after every attempt.
    pub async fn rollback(self) -> Vec<String> {
        let mut failed = Vec::new();

        for (label, step) in self.steps.into_iter().rev() {
            let mut attempt = 0;
            loop {
                attempt += 1;
                match step().await {
                    Ok(()) => {
                        debug!(saga = self.name, step = %label, attempt, "Compensation applied");
                        break;
                    }
                    Err(e) if attempt < self.policy.attempts => {
                        warn!(saga = self.name, step = %label, attempt, "Compensation failed, retrying: {}", e);
                        if !self.policy.backoff.is_zero() {
                            tokio::time::sleep(self.policy.backoff).await;
                        }
                    }
                    Err(e) => {
                        error!(saga = self.name, step = %label, attempt, "Compensation gave up: {}", e);
                        failed.push(label);
                        break;
                    }
                }
            }
        }

        failed
    }

    /// Roll back, then return the error that triggered the rollback
    pub async fn abort<T>(self, cause: DomainError) -> Result<T, DomainError> {
        warn!(saga = self.name, "Saga aborted: {}", cause);
        self.rollback().await;
        Err(cause)
    }
}
