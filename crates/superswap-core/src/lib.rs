//! Superswap-core: Shared types, errors, and configuration
//!
//! This crate provides the foundational types used across the Superswap workspace.

pub mod amount;
pub mod config;
pub mod errors;
pub mod types;

pub use amount::*;
pub use config::*;
pub use errors::*;
pub use types::*;
