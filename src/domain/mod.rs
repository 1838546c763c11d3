//! Domain layer - Core business objects and transport abstractions
//!
//! This layer contains:
//! - Entities: Commands, messages, navigation payloads
//! - Traits: Abstractions for infrastructure (Bot, SettingsStore)

pub mod entities;
pub mod traits;
