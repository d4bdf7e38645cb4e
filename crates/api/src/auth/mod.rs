//! Admin token validation.
//!
//! Accounts and login live in the organization's identity service; this
//! server only verifies the HS256 access tokens it issues.

pub mod jwt;
