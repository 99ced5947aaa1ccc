//! Transient state of an in-progress authentication flow

use serde::{Deserialize, Serialize};

/// Which flow the browser is in the middle of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowKind {
    Register,
    Login,
}

/// Flow state parked in the session store between the credential step and
/// the OTP step.
///
/// Created when the identity API accepts credentials and dispatches an
/// OTP; destroyed on successful verification; overwritten by any new
/// credential submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAuthFlow {
    /// Email the OTP was dispatched to
    pub email: String,
    /// Flow the OTP belongs to
    pub kind: FlowKind,
    /// Whether the user asked to stay signed in across browser restarts
    pub remember_me: bool,
}

impl PendingAuthFlow {
    /// Pending state for a registration flow
    pub fn register(email: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            kind: FlowKind::Register,
            remember_me,
        }
    }

    /// Pending state for a login flow
    pub fn login(email: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            kind: FlowKind::Login,
            remember_me,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_flow_round_trips_through_json() {
        let flow = PendingAuthFlow::login("a@b.com", true);
        let json = serde_json::to_string(&flow).unwrap();
        let parsed: PendingAuthFlow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, flow);
        assert_eq!(parsed.kind, FlowKind::Login);
        assert!(parsed.remember_me);
    }
}
