//! Error taxonomy for the authentication flow

pub mod flow_error;

pub use flow_error::{ErrorResponse, FlowError, FlowResult, SessionError, ValidationError};
