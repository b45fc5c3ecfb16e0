//! Models Module - Configuration & Errors
//!
//! Single source of truth for startup configuration and the error type.

pub mod config;
pub mod errors;

pub use config::*;
pub use errors::*;
