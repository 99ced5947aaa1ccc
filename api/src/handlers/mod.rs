//! Response handlers shared across routes

pub mod error;
