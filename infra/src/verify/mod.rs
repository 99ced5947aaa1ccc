//! Bot-verification infrastructure
//!
//! Client for Google's reCAPTCHA siteverify endpoint.

pub mod recaptcha;

pub use recaptcha::RecaptchaVerifier;
