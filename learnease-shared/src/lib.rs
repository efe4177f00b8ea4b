//! # Learn-Ease Shared Library
//!
//! This crate contains the types and client-side rules shared by the
//! Learn-Ease HTTP client and the command-line front end.
//!
//! ## Module Organization
//!
//! - `models`: Wire models exchanged with the backend API
//! - `auth`: Password requirement checks and the session (bearer token) context
//! - `validation`: Form validation performed before any network call

pub mod auth;
pub mod models;
pub mod validation;

/// Current version of the Learn-Ease shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
