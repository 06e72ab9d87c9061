use log::debug;

use super::document::{PHH_VARIANT, PhhDocument};
use super::errors::{ExportError, Result};
use crate::game::{
    constants::MIN_PLAYERS,
    entities::{Chips, HandNotes, Player, card_codes},
    ledger::{ActionKind, Ledger},
    roster::Roster,
};

pub const DEFAULT_FILE_NAME: &str = "game.phh";
pub const PHH_EXTENSION: &str = ".phh";

/// Something that renders as a single line of a PHH `actions` list.
pub trait PhhLine {
    fn phh_line(&self) -> String;
}

impl PhhLine for ActionKind {
    fn phh_line(&self) -> String {
        match self {
            Self::Fold { position } => format!("p{position} f"),
            Self::CheckCall { position } => format!("p{position} cc"),
            Self::BetRaise { position, amount } => format!("p{position} cbr {amount}"),
            Self::Muck { position } => format!("p{position} sm"),
            Self::Show { position, cards } => format!("p{position} sm {}", card_codes(cards)),
            Self::DealBoard { board } => format!("d db {}", card_codes(board)),
        }
    }
}

/// The synthetic hole-card deal that opens every exported hand.
pub struct HoleDeal<'a>(pub &'a Player);

impl PhhLine for HoleDeal<'_> {
    fn phh_line(&self) -> String {
        format!("d dh p{} {}", self.0.position, card_codes(&self.0.cards))
    }
}

/// Fold a recorded hand into an export document.
///
/// Players are listed from the small blind around to the button. Each gets
/// a hole-card deal line, followed by one line per recorded action. Blinds
/// are fitted to the table: extra entries are dropped, missing seats post 0.
/// Every seat posts `ante`.
pub fn export(
    roster: &Roster,
    blinds: &[Chips],
    ante: Chips,
    ledger: &Ledger,
    notes: &HandNotes,
) -> Result<PhhDocument> {
    let num_seats = roster.len();
    if num_seats < MIN_PLAYERS {
        return Err(ExportError::NotEnoughPlayers {
            min: MIN_PLAYERS,
            actual: num_seats,
        });
    }
    let min_bet = Chips::max_of(blinds).ok_or(ExportError::MissingBlinds)?;
    let hero = roster.hero().ok_or(ExportError::MissingHero)?.position;

    let players = roster.in_position_order();
    let actions: Vec<String> = players
        .iter()
        .map(|player| HoleDeal(player).phh_line())
        .chain(ledger.iter().map(|action| action.kind().phh_line()))
        .collect();
    debug!("exporting {} seats, {} lines", num_seats, actions.len());

    Ok(PhhDocument {
        variant: PHH_VARIANT.to_string(),
        ante_trimming_status: true,
        antes: vec![ante; num_seats],
        blinds_or_straddles: (0..num_seats)
            .map(|seat| blinds.get(seat).copied().unwrap_or(Chips::ZERO))
            .collect(),
        min_bet,
        starting_stacks: players.iter().map(|player| player.initial_stack).collect(),
        actions,
        players: players.iter().map(|player| player.name.clone()).collect(),
        hero,
        context: notes.context.clone(),
        notes: notes.notes.clone(),
        source: notes.source.clone(),
        answers: ledger.study_answers().map(str::to_string).collect(),
    })
}

/// Output file name: `game.phh` when nothing was given, with the `.phh`
/// extension added if it is missing.
#[must_use]
pub fn file_name(requested: Option<&str>) -> String {
    let requested = requested.map(str::trim).unwrap_or_default();
    if requested.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else if requested.ends_with(PHH_EXTENSION) {
        requested.to_string()
    } else {
        format!("{requested}{PHH_EXTENSION}")
    }
}
