//! Console layer - central state management and command processing
//!
//! The Console actor receives parsed commands and network responses,
//! updates session state, and emits network commands and rendered output.

pub mod actor;
pub mod ops;
pub mod state;

pub use actor::ConsoleActor;
pub use state::{CommandOutcome, ConsoleState};
