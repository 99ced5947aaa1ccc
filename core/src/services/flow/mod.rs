//! Authentication flow orchestration
//!
//! One configurable flow service drives both the registration and login
//! state machines: credential submission → bot verification → OTP →
//! session/cookie establishment. Variants that historically lived in
//! parallel controllers (cookie persistence on/off, bot check on/off,
//! OTP bypass) are flags on [`AuthFlowConfig`].

pub mod config;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::AuthFlowConfig;
pub use service::{AuthFlowService, FlowAdvance};
