//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the input, console,
//! and network layers.

pub mod commands;
pub mod network;

pub use commands::{parse_command, ConsoleCommand, VoteCommand};
pub use network::{HttpRequest, NetworkCommand, NetworkResponse};
