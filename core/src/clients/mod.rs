//! Client traits for external collaborators

pub mod identity;

pub use identity::{
    ApiOutcome, AuthResponse, IdentityClient, IdentityError, LoginAck, Profile, RegisterRequest,
};
