//! The export document. Field order is the key order of the encoded file.

use serde::{Deserialize, Serialize};

use super::errors::Result;
use crate::game::entities::{Chips, Position};

/// Variant code for no-limit Texas hold'em.
pub const PHH_VARIANT: &str = "NT";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PhhDocument {
    pub variant: String,
    pub ante_trimming_status: bool,
    pub antes: Vec<Chips>,
    pub blinds_or_straddles: Vec<Chips>,
    pub min_bet: Chips,
    pub starting_stacks: Vec<Chips>,
    pub actions: Vec<String>,
    pub players: Vec<String>,
    #[serde(rename = "_apm_hero")]
    pub hero: Position,
    #[serde(rename = "_apm_context")]
    pub context: String,
    #[serde(rename = "_apm_notes")]
    pub notes: String,
    #[serde(rename = "_apm_source")]
    pub source: String,
    #[serde(rename = "_apm_answers")]
    pub answers: Vec<String>,
}

impl PhhDocument {
    /// Encode as TOML text, one key per line in field order.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
