//! Core types and utilities for dialagent
//!
//! This crate provides the foundational pieces shared by the backend and
//! pipeline crates: the error taxonomy, configuration, logging setup, the
//! system prompt, and session storage.

pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod session;

pub use error::{Error, Result};
