//! # Core Layer
//!
//! Domain types and authentication flow logic for the HRMS gateway,
//! following Clean Architecture principles. Everything external — the
//! identity API, the bot verifier, the session store — sits behind a trait
//! so the flow can be exercised without I/O.
//!
//! ## Modules
//!
//! - `domain`: credentials, pending flow state, authenticated sessions
//! - `errors`: the flow error taxonomy and API error responses
//! - `clients`: the `IdentityClient` trait with tagged call outcomes
//! - `services`: bot-check policy, session context, identity cookie codec,
//!   and the `AuthFlowService` orchestrator

pub mod clients;
pub mod domain;
pub mod errors;
pub mod services;

// Re-export the most commonly used types
pub use clients::identity::{ApiOutcome, AuthResponse, IdentityClient, IdentityError};
pub use domain::{AuthenticatedSession, Credentials, FlowKind, PendingAuthFlow, VerificationResult};
pub use errors::{FlowError, FlowResult, SessionError, ValidationError};
pub use services::bot_check::{BotCheckConfig, BotCheckService, BotVerifier};
pub use services::cookie::{IdentityCookieClaims, IdentityCookieCodec};
pub use services::flow::{AuthFlowConfig, AuthFlowService, FlowAdvance};
pub use services::session::{SessionContext, SessionStore};
