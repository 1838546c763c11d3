//! Message handling - Parsing and selection routing

pub mod parser;
pub mod router;

pub use parser::MessageParser;
pub use router::{run_handler, HandlerTable, InteractionRouter, RouteOutcome};
