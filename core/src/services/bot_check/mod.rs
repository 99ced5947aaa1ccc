//! Bot-verification gate
//!
//! The external verifier is opaque: it gets the client-supplied token and
//! answers with an accept flag and, in one variant, a trust score. The
//! acceptance policy lives here so the flow service and the HTTP verifier
//! implementation both stay policy-free.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::VerificationResult;

/// External bot-verification service.
///
/// Implementations fail closed: a missing answer is a rejection, never an
/// acceptance, and the call must not outlive the external service's own
/// timeout.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> VerificationResult;
}

/// Acceptance policy for bot verification
#[derive(Debug, Clone, Default)]
pub struct BotCheckConfig {
    /// Minimum acceptable score. When `None`, the verifier's success flag
    /// alone decides.
    pub score_threshold: Option<f32>,
}

/// Applies the acceptance policy on top of a verifier
pub struct BotCheckService<B: BotVerifier> {
    verifier: Arc<B>,
    config: BotCheckConfig,
}

impl<B: BotVerifier> BotCheckService<B> {
    pub fn new(verifier: Arc<B>, config: BotCheckConfig) -> Self {
        Self { verifier, config }
    }

    /// Evaluate a client-supplied verification token.
    ///
    /// A submission passes when the verifier accepted it and, if a score
    /// threshold is configured, the score meets it. Absent tokens are
    /// rejected without calling the verifier.
    pub async fn check(&self, token: Option<&str>) -> bool {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => {
                debug!("Bot check rejected: no verification token supplied");
                return false;
            }
        };

        let result = self.verifier.verify(token).await;
        if !result.accepted {
            debug!("Bot check rejected by external verifier");
            return false;
        }

        match (self.config.score_threshold, result.score) {
            (None, _) => true,
            (Some(threshold), Some(score)) => {
                if score >= threshold {
                    true
                } else {
                    debug!(score, threshold, "Bot check rejected: score below threshold");
                    false
                }
            }
            (Some(threshold), None) => {
                // A threshold is configured but the verifier gave no score;
                // fail closed.
                warn!(threshold, "Bot check rejected: verifier returned no score");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubVerifier {
        result: VerificationResult,
    }

    #[async_trait]
    impl BotVerifier for StubVerifier {
        async fn verify(&self, _token: &str) -> VerificationResult {
            self.result
        }
    }

    fn service(result: VerificationResult, threshold: Option<f32>) -> BotCheckService<StubVerifier> {
        BotCheckService::new(
            Arc::new(StubVerifier { result }),
            BotCheckConfig {
                score_threshold: threshold,
            },
        )
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_calling_verifier() {
        let svc = service(VerificationResult::accepted(None), None);
        assert!(!svc.check(None).await);
        assert!(!svc.check(Some("")).await);
    }

    #[tokio::test]
    async fn test_success_flag_alone_when_no_threshold() {
        let svc = service(VerificationResult::accepted(None), None);
        assert!(svc.check(Some("tok")).await);

        let svc = service(VerificationResult::rejected(), None);
        assert!(!svc.check(Some("tok")).await);
    }

    #[tokio::test]
    async fn test_score_threshold_enforced() {
        let svc = service(VerificationResult::accepted(Some(0.9)), Some(0.5));
        assert!(svc.check(Some("tok")).await);

        let svc = service(VerificationResult::accepted(Some(0.3)), Some(0.5));
        assert!(!svc.check(Some("tok")).await);
    }

    #[tokio::test]
    async fn test_threshold_with_missing_score_fails_closed() {
        let svc = service(VerificationResult::accepted(None), Some(0.5));
        assert!(!svc.check(Some("tok")).await);
    }
}
