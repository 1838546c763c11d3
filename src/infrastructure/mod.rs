//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Group settings storage
//! - Adapters: Transport integrations (HTTP bridge, console)

pub mod config;
pub mod storage;
pub mod adapters;
