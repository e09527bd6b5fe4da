// src/models/mod.rs

//! Domain models for the companion.
//!
//! This module contains the normalized task record, the builder parsers use
//! to assemble it, and the application configuration.

mod builder;
mod config;
mod task;

// Re-export all public types
pub use builder::TaskBuilder;
pub use config::{Config, DeliveryConfig, FetcherConfig, PermissionConfig};
pub use task::{Batch, Sendable, TestCase};
