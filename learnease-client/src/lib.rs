//! # Learn-Ease Client Library
//!
//! Typed access to the Learn-Ease backend plus headless page controllers
//! that hold each page's local state.
//!
//! ## Modules
//!
//! - `client`: `ApiClient` and the request helpers shared by every endpoint
//! - `config`: Configuration management
//! - `error`: Error type and the HTTP error-body normalizer
//! - `services`: One method per backend endpoint
//! - `pages`: Login, signup, dashboard, settings and book viewer controllers

pub mod client;
pub mod config;
pub mod error;
pub mod pages;
pub mod services;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
