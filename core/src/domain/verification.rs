//! Result of a single bot-verification check

/// Outcome of one bot-verification submission. Produced per request and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationResult {
    /// Whether the external verifier accepted the token
    pub accepted: bool,
    /// Continuous trust score, when the verifier variant provides one
    pub score: Option<f32>,
}

impl VerificationResult {
    pub fn accepted(score: Option<f32>) -> Self {
        Self {
            accepted: true,
            score,
        }
    }

    /// The fail-closed outcome: network errors, malformed responses,
    /// timeouts, and missing tokens all land here.
    pub fn rejected() -> Self {
        Self {
            accepted: false,
            score: None,
        }
    }
}
