//! Request and response DTOs

pub mod auth_dto;

pub use hrms_core::errors::ErrorResponse;
