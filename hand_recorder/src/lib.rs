//! # Hand Recorder
//!
//! Transcribe a no-limit hold'em hand action by action and export it in the
//! Poker Hand History (PHH) format.
//!
//! The library does not enforce betting rules. It keeps a ledger of what
//! happened, works out who is most likely to act next, and refuses only
//! things that can't be written down: a player dealing the board, a folded
//! player acting, two board deals in a row.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, roster, action ledger, and the [`HandRecorder`] session
//! - [`input`]: parsing and committing text typed into the recorder
//! - [`phh`]: building and encoding the export document
//!
//! ## Example
//!
//! ```
//! use hand_recorder::{HandRecorder, entities::Chips, ledger::ActionChoice};
//!
//! let mut recorder = HandRecorder::new(3, vec![Chips::from(1), Chips::from(2)]);
//! recorder.record(ActionChoice::BetRaise(Chips::from(6))).unwrap();
//! recorder.record(ActionChoice::Fold).unwrap();
//! recorder.record(ActionChoice::CheckCall).unwrap();
//!
//! let doc = recorder.export().unwrap();
//! assert_eq!(doc.actions[3..], ["p1 cbr 6", "p2 f", "p3 cc"]);
//! ```

/// Hand model and recording session.
pub mod game;
pub use game::{
    HandRecorder, RecorderError,
    constants::{self, DEALER_NAME, MIN_PLAYERS},
    entities::{self, Actor, Card, Chips, DEFAULT_STACK, Player, PlayerId, Position},
    ledger::{self, Action, ActionChoice, ActionId, ActionKind, Ledger, Street},
    roster::{self, PlayerUpdate, Roster},
};

/// Text input parsing with last-good-value semantics.
pub mod input;
pub use input::{CommittedInput, InputError};

/// PHH export.
pub mod phh;
pub use phh::{ExportError, PhhDocument};
