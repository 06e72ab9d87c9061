//! Hand transcription model.
//!
//! This module provides the pieces a recorded hand is made of:
//! - Cards, chips and players ([`entities`])
//! - The seating chart with button and position bookkeeping ([`roster`])
//! - The ordered action history with turn rotation and undo ([`ledger`])
//! - The session aggregate the UI talks to ([`recorder`])

pub mod constants;
pub mod entities;
pub mod ledger;
pub mod recorder;
pub mod roster;

pub use recorder::{HandRecorder, RecorderError};
