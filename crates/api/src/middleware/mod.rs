//! Request middleware.

pub mod sender;

pub use sender::{SENDER_HEADER, Sender, sender_middleware};
