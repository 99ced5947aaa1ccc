//! # API Layer
//!
//! actix-web surface of the HRMS gateway: request/response DTOs, route
//! handlers generic over the core traits, session-id cookie management, and
//! the flow-error to HTTP mapping.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod session;
