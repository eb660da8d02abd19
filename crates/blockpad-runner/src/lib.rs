//! Run coordination for blockpad.
//!
//! Owns the pieces around the generate → execute pipeline: the
//! [`OutputChannel`] the user watches, the [`RunController`] state machine
//! that drives one run at a time, and the one-time workspace initialization
//! (custom print block plus the seeded example graph).

pub mod channel;
pub mod controller;
pub mod init;

pub use channel::{EventId, OutputChannel, OutputEvent};
pub use controller::{RunConfig, RunController, RunState};
