//! Network layer - HTTP request execution
//!
//! The Network actor receives dispatch commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
