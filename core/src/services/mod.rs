//! Core services for the authentication flow

pub mod bot_check;
pub mod cookie;
pub mod flow;
pub mod session;
