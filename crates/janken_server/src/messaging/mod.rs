//! Wire protocol and inbound message dispatch.

pub mod dispatcher;
pub mod types;

pub use dispatcher::MessageDispatcher;
pub use types::{ClientMessage, RuleInfo, ServerMessage};
