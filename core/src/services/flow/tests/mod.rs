//! Tests for the authentication flow service
