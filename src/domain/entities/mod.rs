//! Domain entities - Core business objects

pub mod user;
pub mod message;
pub mod command;
pub mod navigation;
pub mod outgoing;

pub use user::User;
pub use message::{Message, MessageType, Content, MembershipAction};
pub use command::{Command, CommandDescriptor, CommandHandler, CommandRegistry};
pub use navigation::{NavigationPayload, Row, Section};
pub use outgoing::{Attachment, OutgoingMessage};
