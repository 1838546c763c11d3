//! wabot - a command-driven chat bot with menu navigation, reaction
//! moderation and a world clock

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
