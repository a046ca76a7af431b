//! Common types and utilities shared across textcache.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and latency models
//! - Error types
//! - The item identifier

pub mod config;
pub mod error;
mod item_id;

pub use error::{Error, Result};
pub use item_id::ItemId;
