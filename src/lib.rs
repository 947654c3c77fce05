//! # Blah Console
//!
//! A minimal terminal console for exercising a Blahgua-style social REST
//! API (users, channels, blahs, comments, votes, badges) by hand.
//!
//! ## Features
//! - One-command endpoint configuration with reference-data discovery
//! - Validated operation constructors for the full API surface
//! - Blah-type classification (simple / prediction / poll)
//! - Session state that remembers ids from earlier responses
//! - Uniform success/error rendering with pretty-printed JSON
//!
//! ## Architecture
//! Actor-based with channels:
//! - Input Layer (stdin lines) - synchronous
//! - Console Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod classify;
pub mod console;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use classify::{classify, parse_expiration, BlahVariant};
pub use console::{CommandOutcome, ConsoleActor, ConsoleState};
pub use error::ConsoleError;
pub use messages::{parse_command, ConsoleCommand, NetworkCommand, NetworkResponse, VoteCommand};
pub use models::{BlahTypeRecord, Extract, HttpMethod, Operation};
pub use network::NetworkActor;
pub use render::Rendered;
pub use session::{Identity, SessionState, TypeCache};
