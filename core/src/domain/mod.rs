//! Domain types for the authentication flow

pub mod auth_session;
pub mod credentials;
pub mod pending_flow;
pub mod verification;

pub use auth_session::AuthenticatedSession;
pub use credentials::Credentials;
pub use pending_flow::{FlowKind, PendingAuthFlow};
pub use verification::VerificationResult;
