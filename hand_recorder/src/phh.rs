//! Poker Hand History export.
//!
//! A recorded hand is folded into a [`PhhDocument`], an ordered record of
//! table metadata plus one PHH line per dealt hand and per action, which is
//! then encoded as TOML.

/// The export document and its TOML encoding.
pub mod document;

/// Errors raised while exporting a hand.
pub mod errors;

/// Mapping from roster and ledger to PHH lines and the export document.
pub mod export;

pub use document::PhhDocument;
pub use errors::ExportError;
pub use export::{DEFAULT_FILE_NAME, PHH_EXTENSION, PhhLine, export, file_name};
