//! HTTP infrastructure
//!
//! reqwest-based client for the remote identity API.

pub mod identity_client;

pub use identity_client::HttpIdentityClient;
