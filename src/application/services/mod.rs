//! Application services - Business logic orchestration

pub mod chat_workers;
pub mod command_service;
pub mod message_service;

pub use chat_workers::ChatWorkers;
pub use command_service::CommandService;
pub use message_service::MessageService;
