//! Inbound message handling: intent, extraction, ledger, reply.

pub mod processor;
pub mod reply;


pub use processor::{MessageProcessor, ProcessorSettings};
pub use reply::{Reply, ReplyKind};
