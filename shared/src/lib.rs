//! # Shared Module
//!
//! Cross-cutting configuration and utilities shared by the gateway's
//! core, infrastructure, and API layers.

pub mod config;
pub mod utils;
