//! The ordered action history of a hand.
//!
//! Actions are immutable once recorded. The only thing that may change
//! afterwards is a study annotation, which lives in a separate map keyed by
//! action id. The last action can be undone, which also reverses the
//! activity change a fold or muck caused.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::{self},
};
use thiserror::Error;
use uuid::Uuid;

use super::constants::{FLOP_SIZE, MAX_BOARD_DEALS, STREET_SIZE};
use super::entities::{Actor, Card, Chips, HoleCards, PlayerId, Position, Role, card_codes};
use super::roster::Roster;

/// Contract violations when building an [`Action`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ActionError {
    #[error("the dealer can't {0}")]
    DealerCannotAct(String),
    #[error("only the dealer can deal the board")]
    PlayerCannotDeal,
    #[error("a board deal takes 1 or 3 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("player does not exist")]
    PlayerDoesNotExist,
}

/// Reasons the ledger refuses an operation. Nothing is mutated when one of
/// these is returned.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("player does not exist")]
    PlayerDoesNotExist,
    #[error("p{0} is no longer in the hand")]
    InactivePlayer(Position),
    #[error("the board was just dealt")]
    ConsecutiveDeal,
    #[error("the river has already been dealt")]
    BoardComplete,
    #[error("the {street} takes {expected} card(s), got {actual}")]
    WrongBoardSize {
        street: Street,
        expected: usize,
        actual: usize,
    },
    #[error("action does not exist")]
    ActionDoesNotExist,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ActionId(Uuid);

impl ActionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the user picked for the current actor, before it is tied to a
/// seat and recorded.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionChoice {
    Fold,
    CheckCall,
    BetRaise(Chips),
    Muck,
    Show(HoleCards),
    DealBoard(Vec<Card>),
}

/// Choice labels offered to a player, in menu order.
pub const PLAYER_CHOICES: [&str; 5] = ["fold", "check/call", "bet/raise to", "muck cards", "show cards"];

/// Choice labels offered to the dealer.
pub const DEALER_CHOICES: [&str; 1] = ["deal board"];

impl ActionChoice {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::DealBoard(_) => Role::Dealer,
            _ => Role::Player,
        }
    }

    /// Betting decisions, the only choices that can be study spots.
    #[must_use]
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Fold | Self::CheckCall | Self::BetRaise(_))
    }

    #[must_use]
    pub fn labels_for(role: Role) -> &'static [&'static str] {
        match role {
            Role::Player => &PLAYER_CHOICES,
            Role::Dealer => &DEALER_CHOICES,
        }
    }
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::CheckCall => write!(f, "check/call"),
            Self::BetRaise(amount) => write!(f, "bet/raise to {amount}"),
            Self::Muck => write!(f, "muck cards"),
            Self::Show(cards) => write!(f, "show cards {}", card_codes(cards)),
            Self::DealBoard(board) => write!(f, "deal board {}", card_codes(board)),
        }
    }
}

/// A recorded action. Player positions are snapshots taken when the action
/// was recorded, not live references into the roster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ActionKind {
    Fold {
        position: Position,
    },
    CheckCall {
        position: Position,
    },
    BetRaise {
        position: Position,
        amount: Chips,
    },
    Muck {
        position: Position,
    },
    Show {
        position: Position,
        cards: HoleCards,
    },
    DealBoard {
        board: Vec<Card>,
    },
}

impl ActionKind {
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Fold { position }
            | Self::CheckCall { position }
            | Self::BetRaise { position, .. }
            | Self::Muck { position }
            | Self::Show { position, .. } => Some(*position),
            Self::DealBoard { .. } => None,
        }
    }

    /// Folding and mucking take a player out of the hand.
    #[must_use]
    pub fn deactivates(&self) -> bool {
        matches!(self, Self::Fold { .. } | Self::Muck { .. })
    }

    #[must_use]
    pub fn is_deal(&self) -> bool {
        matches!(self, Self::DealBoard { .. })
    }

    #[must_use]
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            Self::Fold { .. } | Self::CheckCall { .. } | Self::BetRaise { .. }
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fold { .. } => write!(f, "fold"),
            Self::CheckCall { .. } => write!(f, "check/call"),
            Self::BetRaise { amount, .. } => write!(f, "bet/raise to {amount}"),
            Self::Muck { .. } => write!(f, "muck cards"),
            Self::Show { cards, .. } => write!(f, "show cards {}", card_codes(cards)),
            Self::DealBoard { board } => write!(f, "deal board {}", card_codes(board)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Action {
    id: ActionId,
    actor: Actor,
    kind: ActionKind,
}

impl Action {
    /// Tie `choice` to `actor`. Players can't deal and the dealer can only
    /// deal, so a mismatch fails here before anything is recorded.
    pub fn new(actor: Actor, choice: ActionChoice, roster: &Roster) -> Result<Self, ActionError> {
        let kind = match actor {
            Actor::Player(id) => {
                let position = roster
                    .get(id)
                    .ok_or(ActionError::PlayerDoesNotExist)?
                    .position;
                match choice {
                    ActionChoice::Fold => ActionKind::Fold { position },
                    ActionChoice::CheckCall => ActionKind::CheckCall { position },
                    ActionChoice::BetRaise(amount) => ActionKind::BetRaise { position, amount },
                    ActionChoice::Muck => ActionKind::Muck { position },
                    ActionChoice::Show(cards) => ActionKind::Show { position, cards },
                    ActionChoice::DealBoard(_) => return Err(ActionError::PlayerCannotDeal),
                }
            }
            Actor::Dealer => match choice {
                ActionChoice::DealBoard(board) => {
                    if board.len() != FLOP_SIZE && board.len() != STREET_SIZE {
                        return Err(ActionError::InvalidBoardSize(board.len()));
                    }
                    ActionKind::DealBoard { board }
                }
                other => return Err(ActionError::DealerCannotAct(other.to_string())),
            },
        };
        Ok(Self {
            id: ActionId::new(),
            actor,
            kind,
        })
    }

    #[must_use]
    pub fn id(&self) -> ActionId {
        self.id
    }

    #[must_use]
    pub fn actor(&self) -> Actor {
        self.actor
    }

    #[must_use]
    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Betting round, derived from how many board deals were recorded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    #[must_use]
    pub fn from_deals(deals: usize) -> Self {
        match deals {
            0 => Self::Preflop,
            1 => Self::Flop,
            2 => Self::Turn,
            _ => Self::River,
        }
    }

    /// Size of the deal that ends this street, if there is one.
    #[must_use]
    pub fn next_board_size(self) -> Option<usize> {
        match self {
            Self::Preflop => Some(FLOP_SIZE),
            Self::Flop | Self::Turn => Some(STREET_SIZE),
            Self::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    actions: Vec<Action>,
    // Study answers by action id. Presence marks a study spot.
    answers: HashMap<ActionId, String>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    #[must_use]
    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|action| action.id == id)
    }

    #[must_use]
    pub fn deals(&self) -> usize {
        self.actions.iter().filter(|action| action.kind.is_deal()).count()
    }

    #[must_use]
    pub fn street(&self) -> Street {
        Street::from_deals(self.deals())
    }

    /// Record `action` and return who acts next. Folds and mucks take the
    /// player out of the hand before the next actor is chosen.
    pub fn append(&mut self, action: Action, roster: &mut Roster) -> Result<Actor, LedgerError> {
        self.validate(&action, roster)?;

        let next = match action.actor {
            Actor::Player(id) => {
                if action.kind.deactivates() {
                    roster.set_active(id, false);
                }
                next_actor_after_player(roster, id)
            }
            Actor::Dealer => next_actor_after_dealer(roster),
        };
        debug!("recorded {} by {}, next: {next}", action.kind, action.actor);
        self.actions.push(action);
        Ok(next)
    }

    fn validate(&self, action: &Action, roster: &Roster) -> Result<(), LedgerError> {
        match (&action.actor, &action.kind) {
            (Actor::Player(_), ActionKind::DealBoard { .. }) => {
                Err(ActionError::PlayerCannotDeal.into())
            }
            (Actor::Player(id), _) => {
                let player = roster.get(*id).ok_or(LedgerError::PlayerDoesNotExist)?;
                if !player.is_active {
                    return Err(LedgerError::InactivePlayer(player.position));
                }
                Ok(())
            }
            (Actor::Dealer, ActionKind::DealBoard { board }) => {
                let street = self.street();
                let expected = match street.next_board_size() {
                    Some(expected) if self.deals() < MAX_BOARD_DEALS => expected,
                    _ => return Err(LedgerError::BoardComplete),
                };
                if self.last().is_some_and(|last| last.kind.is_deal()) {
                    return Err(LedgerError::ConsecutiveDeal);
                }
                if board.len() != expected {
                    return Err(LedgerError::WrongBoardSize {
                        street,
                        expected,
                        actual: board.len(),
                    });
                }
                Ok(())
            }
            (Actor::Dealer, kind) => Err(ActionError::DealerCannotAct(kind.to_string()).into()),
        }
    }

    /// Remove the most recent action, reactivating the player if it was a
    /// fold or muck. Its study answer goes with it.
    pub fn undo(&mut self, roster: &mut Roster) -> Option<Action> {
        let action = self.actions.pop()?;
        if let Actor::Player(id) = action.actor {
            if action.kind.deactivates() {
                roster.set_active(id, true);
            }
        }
        self.answers.remove(&action.id);
        debug!("undid {} by {}", action.kind, action.actor);
        Some(action)
    }

    /// Mark an action as a study spot with the given answer.
    pub fn set_answer(&mut self, id: ActionId, answer: impl Into<String>) -> Result<(), LedgerError> {
        if self.get(id).is_none() {
            return Err(LedgerError::ActionDoesNotExist);
        }
        self.answers.insert(id, answer.into());
        Ok(())
    }

    #[must_use]
    pub fn answer(&self, id: ActionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn is_study_spot(&self, id: ActionId) -> bool {
        self.answers.contains_key(&id)
    }

    /// Answers of all study spots, in ledger order.
    pub fn study_answers(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter_map(|action| self.answer(action.id))
    }
}

/// Next actor after `acting` moved: the first other active player clockwise
/// by position, or the dealer once nobody else is left to act.
#[must_use]
pub fn next_actor_after_player(roster: &Roster, acting: PlayerId) -> Actor {
    // The acting player stays in the sequence even if they just folded so
    // the scan has a starting point.
    let mut eligible: Vec<Actor> = roster
        .in_position_order()
        .into_iter()
        .filter(|player| player.is_active || player.id == acting)
        .map(|player| Actor::Player(player.id))
        .collect();
    eligible.push(Actor::Dealer);

    let Some(acting_idx) = eligible.iter().position(|actor| *actor == Actor::Player(acting)) else {
        return next_actor_after_dealer(roster);
    };
    let num_eligible = eligible.len();
    (1..=num_eligible)
        .map(|offset| eligible[(acting_idx + offset) % num_eligible])
        .find(|actor| matches!(actor, Actor::Player(id) if *id != acting))
        .unwrap_or(Actor::Dealer)
}

/// After a board deal the lowest active position acts first.
#[must_use]
pub fn next_actor_after_dealer(roster: &Roster) -> Actor {
    roster
        .in_position_order()
        .into_iter()
        .find(|player| player.is_active)
        .map_or(Actor::Dealer, |player| Actor::Player(player.id))
}
