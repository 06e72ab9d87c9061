//! The recording session: roster, ledger, blinds, and whoever is
//! currently selected to act. Front ends drive a hand exclusively through
//! [`HandRecorder`].

use log::{debug, warn};
use thiserror::Error;

use super::constants::{DEFAULT_NUM_PLAYERS, DEALER_NAME, MIN_PLAYERS, STACK_IN_BIG_BLINDS};
use super::entities::{Actor, Card, Chips, DEFAULT_STACK, HandNotes, HoleCards, PlayerId, Position, Role};
use super::ledger::{
    Action, ActionChoice, ActionError, ActionId, Ledger, LedgerError, next_actor_after_dealer,
};
use super::roster::{PlayerUpdate, Roster, RosterError};
use crate::phh::{self, ExportError, PhhDocument};

#[derive(Debug, Error, PartialEq)]
pub enum RecorderError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{actor} can't {choice}")]
    WrongRole { actor: String, choice: String },
    #[error("only the hero's fold, check/call or bet/raise can be studied")]
    NotStudySpot,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("{0} is no longer in the hand")]
    InactiveActor(String),
}

#[derive(Clone, Debug)]
pub struct HandRecorder {
    roster: Roster,
    ledger: Ledger,
    blinds: Vec<Chips>,
    ante: Chips,
    current: Actor,
    notes: HandNotes,
}

impl Default for HandRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_PLAYERS, Vec::new())
    }
}

impl HandRecorder {
    /// Start a hand with `num_players` unnamed seats (never fewer than two).
    /// Stacks start at 100 big blinds, or 100 chips when no blinds are set.
    #[must_use]
    pub fn new(num_players: usize, blinds: Vec<Chips>) -> Self {
        let roster = Roster::with_players(num_players.max(MIN_PLAYERS), default_stack(&blinds));
        let current = next_actor_after_dealer(&roster);
        Self {
            roster,
            ledger: Ledger::new(),
            blinds,
            ante: Chips::ZERO,
            current,
            notes: HandNotes::default(),
        }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn blinds(&self) -> &[Chips] {
        &self.blinds
    }

    #[must_use]
    pub fn ante(&self) -> Chips {
        self.ante
    }

    #[must_use]
    pub fn current_actor(&self) -> Actor {
        self.current
    }

    #[must_use]
    pub fn notes(&self) -> &HandNotes {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut HandNotes {
        &mut self.notes
    }

    /// Largest blind or straddle, if any are set.
    #[must_use]
    pub fn big_blind(&self) -> Option<Chips> {
        Chips::max_of(&self.blinds)
    }

    #[must_use]
    pub fn default_stack(&self) -> Chips {
        default_stack(&self.blinds)
    }

    /// Replace the blinds. Stacks follow the new big blind until the table
    /// is edited by hand.
    pub fn set_blinds(&mut self, blinds: Vec<Chips>) {
        self.blinds = blinds;
        if self.roster.sync_stacks_to_blinds(&self.blinds) {
            debug!("stacks follow blinds {:?}", self.blinds);
        }
    }

    pub fn set_ante(&mut self, ante: Chips) {
        self.ante = ante;
    }

    /// Seat a new player before the button. `None` uses the default stack.
    pub fn add_player(&mut self, name: impl Into<String>, stack: Option<Chips>) -> PlayerId {
        let stack = stack.unwrap_or_else(|| self.default_stack());
        self.roster.add_player(name, stack, [Card::UNKNOWN; 2])
    }

    /// Remove a player. If they were about to act the selection moves on.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if self.roster.remove_player(id).is_none() {
            return false;
        }
        if self.current == Actor::Player(id) {
            self.current = next_actor_after_dealer(&self.roster);
        }
        true
    }

    pub fn set_button(&mut self, id: PlayerId) -> Result<(), RecorderError> {
        Ok(self.roster.set_button(id)?)
    }

    pub fn set_hero(&mut self, id: PlayerId) -> Result<(), RecorderError> {
        Ok(self.roster.set_hero(id)?)
    }

    pub fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Result<(), RecorderError> {
        Ok(self.roster.update_player(id, update)?)
    }

    pub fn set_cards(&mut self, id: PlayerId, cards: HoleCards) -> Result<(), RecorderError> {
        self.update_player(
            id,
            PlayerUpdate {
                cards: Some(cards),
                ..Default::default()
            },
        )
    }

    pub fn player_at(&self, position: Position) -> Result<PlayerId, RecorderError> {
        Ok(self.roster.at_position(position)?.id)
    }

    /// Override the automatic rotation. Only the dealer or a player still
    /// in the hand can be selected.
    pub fn select_actor(&mut self, actor: Actor) -> Result<(), RecorderError> {
        if let Actor::Player(id) = actor {
            let player = self.roster.get(id).ok_or(RosterError::PlayerDoesNotExist)?;
            if !player.is_active {
                return Err(RecorderError::InactiveActor(player.display_name()));
            }
        }
        self.current = actor;
        Ok(())
    }

    /// Choice labels for the current actor.
    #[must_use]
    pub fn available_choices(&self) -> &'static [&'static str] {
        ActionChoice::labels_for(self.current.role())
    }

    /// Record `choice` for the current actor and advance to the next one.
    pub fn record(&mut self, choice: ActionChoice) -> Result<ActionId, RecorderError> {
        self.check_role(&choice)?;
        let action = Action::new(self.current, choice, &self.roster)?;
        let id = action.id();
        self.current = self.ledger.append(action, &mut self.roster)?;
        Ok(id)
    }

    /// Record `choice` as a study spot with `answer`. Only the hero's
    /// betting decisions qualify.
    pub fn record_study_spot(
        &mut self,
        choice: ActionChoice,
        answer: impl Into<String>,
    ) -> Result<ActionId, RecorderError> {
        self.check_role(&choice)?;
        if !choice.is_decision() || !self.is_hero(self.current) {
            return Err(RecorderError::NotStudySpot);
        }
        let id = self.record(choice)?;
        self.ledger.set_answer(id, answer)?;
        Ok(id)
    }

    /// Set or replace the answer on an already recorded action.
    pub fn set_answer(&mut self, id: ActionId, answer: impl Into<String>) -> Result<(), RecorderError> {
        let action = self.ledger.get(id).ok_or(LedgerError::ActionDoesNotExist)?;
        if !action.kind().is_decision() || !self.is_hero(action.actor()) {
            return Err(RecorderError::NotStudySpot);
        }
        Ok(self.ledger.set_answer(id, answer)?)
    }

    /// Revert the last action and hand the turn back to whoever took it.
    pub fn undo(&mut self) -> Result<Action, RecorderError> {
        let action = self
            .ledger
            .undo(&mut self.roster)
            .ok_or(RecorderError::NothingToUndo)?;
        self.current = action.actor();
        Ok(action)
    }

    /// Build the export document for the hand as recorded so far.
    pub fn export(&self) -> Result<PhhDocument, ExportError> {
        phh::export(
            &self.roster,
            &self.blinds,
            self.ante,
            &self.ledger,
            &self.notes,
        )
    }

    /// Display name of an actor: `Dealer`, or the player's display name.
    #[must_use]
    pub fn actor_name(&self, actor: Actor) -> String {
        match actor {
            Actor::Dealer => DEALER_NAME.to_string(),
            Actor::Player(id) => self
                .roster
                .get(id)
                .map_or_else(|| "unknown player".to_string(), |player| player.display_name()),
        }
    }

    fn is_hero(&self, actor: Actor) -> bool {
        actor.player_id().is_some_and(|id| self.roster.hero_id() == Some(id))
    }

    fn check_role(&self, choice: &ActionChoice) -> Result<(), RecorderError> {
        if self.current.role().allows(choice) {
            return Ok(());
        }
        let actor = self.actor_name(self.current);
        warn!("rejected {choice} for {actor}");
        Err(RecorderError::WrongRole {
            actor,
            choice: choice.to_string(),
        })
    }
}

fn default_stack(blinds: &[Chips]) -> Chips {
    Chips::max_of(blinds).map_or(DEFAULT_STACK, |big_blind| big_blind.times(STACK_IN_BIG_BLINDS))
}

impl Role {
    /// Whether an actor of this role may take `choice`.
    #[must_use]
    pub fn allows(self, choice: &ActionChoice) -> bool {
        choice.role() == self
    }
}
