//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Context: Per-invocation handler context
//! - Services: Command dispatch and event processing
//! - Messaging: Message parsing, selection routing
//! - Menu: Category classification, menu aggregation, sub-menus

pub mod context;
pub mod errors;
pub mod menu;
pub mod messaging;
pub mod services;
