//! Inbound message dispatch
//!
//! Decides what to send back for each Messenger message and drives the
//! outbound providers.

mod handler;
pub mod keywords;

pub use handler::MessageHandler;
