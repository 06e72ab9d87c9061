//! Seating chart for a recorded hand.
//!
//! Players are stored in clockwise seat order. Positions are derived from
//! the button: position 1 is the first seat clockwise of the button (the
//! small blind) and the button itself holds position N. Every mutation that
//! can move the button or change the number of seats renumbers positions.

use log::debug;
use thiserror::Error;

use super::constants::{MIN_PLAYERS, STACK_IN_BIG_BLINDS};
use super::entities::{Card, Chips, HoleCards, Player, PlayerId, Position};

/// Errors that can occur while editing the roster
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RosterError {
    #[error("player does not exist")]
    PlayerDoesNotExist,
    #[error("no player at p{0}")]
    NoPlayerAtPosition(Position),
}

/// Partial player edit. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub initial_stack: Option<Chips>,
    pub stack: Option<Chips>,
    pub cards: Option<HoleCards>,
    pub is_active: Option<bool>,
}

impl PlayerUpdate {
    fn touches_stack(&self) -> bool {
        self.initial_stack.is_some() || self.stack.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Roster {
    seats: Vec<Player>,
    hero: Option<PlayerId>,
    /// Set once the user edits the table by hand. From then on stacks are
    /// no longer derived from the blinds.
    modified: bool,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table of `num_players` unnamed players with unknown cards. The
    /// button sits on the last seat so the first seat is the small blind
    /// and the hero.
    #[must_use]
    pub fn with_players(num_players: usize, stack: Chips) -> Self {
        let mut seats: Vec<Player> = (0..num_players)
            .map(|_| Player::new("", stack, [Card::UNKNOWN; 2]))
            .collect();
        if let Some(last) = seats.last_mut() {
            last.is_button = true;
        }
        let hero = seats.first().map(|player| player.id);
        let mut roster = Self {
            seats,
            hero,
            modified: false,
        };
        roster.renumber();
        roster
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Players in clockwise seat order.
    #[must_use]
    pub fn seats(&self) -> &[Player] {
        &self.seats
    }

    /// Players ordered by position, small blind first.
    #[must_use]
    pub fn in_position_order(&self) -> Vec<&Player> {
        let Some(button_idx) = self.button_index() else {
            return self.seats.iter().collect();
        };
        let num_seats = self.seats.len();
        (1..=num_seats)
            .map(|offset| &self.seats[(button_idx + offset) % num_seats])
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.seats.iter().find(|player| player.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player, RosterError> {
        self.seats
            .iter_mut()
            .find(|player| player.id == id)
            .ok_or(RosterError::PlayerDoesNotExist)
    }

    fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|player| player.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn at_position(&self, position: Position) -> Result<&Player, RosterError> {
        self.seats
            .iter()
            .find(|player| player.position == position)
            .ok_or(RosterError::NoPlayerAtPosition(position))
    }

    #[must_use]
    pub fn button_index(&self) -> Option<usize> {
        self.seats.iter().position(|player| player.is_button)
    }

    #[must_use]
    pub fn button(&self) -> Option<&Player> {
        self.seats.iter().find(|player| player.is_button)
    }

    #[must_use]
    pub fn hero(&self) -> Option<&Player> {
        self.hero.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn hero_id(&self) -> Option<PlayerId> {
        self.hero
    }

    pub fn set_hero(&mut self, id: PlayerId) -> Result<(), RosterError> {
        if !self.contains(id) {
            return Err(RosterError::PlayerDoesNotExist);
        }
        self.hero = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Seat a new player directly before the button, so they are the last
    /// to act on the next orbit. The first player at an empty table takes
    /// the button (and the hero role).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        initial_stack: Chips,
        cards: HoleCards,
    ) -> PlayerId {
        let mut player = Player::new(name, initial_stack, cards);
        let id = player.id;
        player.position = self.seats.len() + 1;
        match self.button_index() {
            Some(button_idx) => self.seats.insert(button_idx, player),
            None => {
                player.is_button = true;
                self.seats.push(player);
            }
        }
        if self.hero.is_none() {
            self.hero = Some(id);
        }
        self.modified = true;
        self.renumber();
        debug!("added player {id}, {} seated", self.seats.len());
        id
    }

    /// Remove a player. Does nothing at the minimum table size or for an
    /// unknown id. The button and hero roles pass to the next seat first.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        if self.seats.len() <= MIN_PLAYERS {
            debug!("not removing {id}: table at minimum size");
            return None;
        }
        let idx = self.index_of(id)?;
        let next_idx = (idx + 1) % self.seats.len();
        let next_id = self.seats[next_idx].id;
        if self.seats[idx].is_button {
            self.seats[next_idx].is_button = true;
        }
        if self.hero == Some(id) {
            self.hero = Some(next_id);
        }
        let mut removed = self.seats.remove(idx);
        removed.is_button = false;
        self.modified = true;
        self.renumber();
        debug!("removed player {id}, {} seated", self.seats.len());
        Some(removed)
    }

    pub fn set_button(&mut self, id: PlayerId) -> Result<(), RosterError> {
        if !self.contains(id) {
            return Err(RosterError::PlayerDoesNotExist);
        }
        for player in &mut self.seats {
            player.is_button = player.id == id;
        }
        self.renumber();
        Ok(())
    }

    /// Merge `update` into a player. Positions and the button are untouched.
    pub fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Result<(), RosterError> {
        let touches_stack = update.touches_stack();
        let player = self.get_mut(id)?;
        if let Some(name) = update.name {
            player.name = name;
        }
        if let Some(initial_stack) = update.initial_stack {
            player.initial_stack = initial_stack;
        }
        if let Some(stack) = update.stack {
            player.stack = stack;
        }
        if let Some(cards) = update.cards {
            player.cards = cards;
        }
        if let Some(is_active) = update.is_active {
            player.is_active = is_active;
        }
        if touches_stack {
            self.modified = true;
        }
        Ok(())
    }

    pub(crate) fn set_active(&mut self, id: PlayerId, is_active: bool) {
        if let Ok(player) = self.get_mut(id) {
            player.is_active = is_active;
        }
    }

    /// Re-derive every stack from the largest blind, unless the roster was
    /// edited by hand. Returns whether stacks were changed.
    pub fn sync_stacks_to_blinds(&mut self, blinds: &[Chips]) -> bool {
        if self.modified {
            return false;
        }
        let Some(big_blind) = Chips::max_of(blinds) else {
            return false;
        };
        let stack = big_blind.times(STACK_IN_BIG_BLINDS);
        for player in &mut self.seats {
            player.initial_stack = stack;
            player.stack = stack;
        }
        debug!("synced stacks to {stack}");
        true
    }

    fn renumber(&mut self) {
        let Some(button_idx) = self.button_index() else {
            return;
        };
        let num_seats = self.seats.len();
        for position in 1..=num_seats {
            self.seats[(button_idx + position) % num_seats].position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::DEFAULT_STACK;

    fn positions(roster: &Roster) -> Vec<Position> {
        roster.seats().iter().map(|player| player.position).collect()
    }

    // === Construction Tests ===

    #[test]
    fn test_with_players_button_on_last_seat() {
        let roster = Roster::with_players(3, DEFAULT_STACK);
        assert_eq!(roster.len(), 3);
        assert!(roster.seats()[2].is_button);
        assert_eq!(positions(&roster), vec![1, 2, 3]);
        assert_eq!(roster.hero_id(), Some(roster.seats()[0].id));
        assert!(!roster.is_modified());
    }

    #[test]
    fn test_first_added_player_takes_button() {
        let mut roster = Roster::new();
        let id = roster.add_player("alice", DEFAULT_STACK, [Card::UNKNOWN; 2]);
        assert_eq!(roster.button().map(|p| p.id), Some(id));
        assert_eq!(roster.hero_id(), Some(id));
        assert_eq!(roster.get(id).unwrap().position, 1);
    }

    // === Add Tests ===

    #[test]
    fn test_add_player_seats_before_button() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        let button = roster.button().unwrap().id;
        let id = roster.add_player("dave", DEFAULT_STACK, [Card::UNKNOWN; 2]);

        let seats = roster.seats();
        assert_eq!(seats[2].id, id);
        assert_eq!(seats[3].id, button);
        assert_eq!(positions(&roster), vec![1, 2, 3, 4]);
        assert!(roster.is_modified());
    }

    #[test]
    fn test_add_player_keeps_button_holder() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        let button = roster.button().unwrap().id;
        roster.add_player("", DEFAULT_STACK, [Card::UNKNOWN; 2]);
        assert_eq!(roster.button().unwrap().id, button);
        assert_eq!(roster.button().unwrap().position, 3);
    }

    // === Remove Tests ===

    #[test]
    fn test_remove_noop_at_minimum() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        let id = roster.seats()[0].id;
        assert!(roster.remove_player(id).is_none());
        assert_eq!(roster.len(), 2);
        assert!(!roster.is_modified());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        assert!(roster.remove_player(PlayerId::new()).is_none());
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_remove_button_moves_button_to_next_seat() {
        let mut roster = Roster::with_players(4, DEFAULT_STACK);
        roster.set_button(roster.seats()[1].id).unwrap();
        let next = roster.seats()[2].id;
        let removed = roster.remove_player(roster.seats()[1].id).unwrap();
        assert!(!removed.is_button);
        assert_eq!(roster.button().unwrap().id, next);
        assert_eq!(roster.button().unwrap().position, 3);
    }

    #[test]
    fn test_remove_last_seat_button_wraps() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        let first = roster.seats()[0].id;
        roster.remove_player(roster.seats()[2].id);
        assert_eq!(roster.button().unwrap().id, first);
    }

    #[test]
    fn test_remove_hero_moves_hero_to_next_seat() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        let hero = roster.hero_id().unwrap();
        let next = roster.seats()[1].id;
        roster.remove_player(hero);
        assert_eq!(roster.hero_id(), Some(next));
    }

    // === Button Tests ===

    #[test]
    fn test_set_button_renumbers() {
        let mut roster = Roster::with_players(4, DEFAULT_STACK);
        roster.set_button(roster.seats()[0].id).unwrap();
        assert_eq!(positions(&roster), vec![4, 1, 2, 3]);
        assert_eq!(roster.seats().iter().filter(|p| p.is_button).count(), 1);
    }

    #[test]
    fn test_set_button_unknown() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        assert_eq!(
            roster.set_button(PlayerId::new()),
            Err(RosterError::PlayerDoesNotExist)
        );
    }

    #[test]
    fn test_in_position_order_starts_after_button() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        roster.set_button(roster.seats()[0].id).unwrap();
        let order: Vec<Position> = roster.in_position_order().iter().map(|p| p.position).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(roster.in_position_order()[0].id, roster.seats()[1].id);
    }

    #[test]
    fn test_at_position() {
        let roster = Roster::with_players(3, DEFAULT_STACK);
        assert_eq!(roster.at_position(2).unwrap().id, roster.seats()[1].id);
        assert_eq!(
            roster.at_position(9).unwrap_err(),
            RosterError::NoPlayerAtPosition(9)
        );
    }

    // === Update Tests ===

    #[test]
    fn test_update_player_merges_fields() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        let id = roster.seats()[0].id;
        let cards = [Card::new('A', 'h').unwrap(), Card::new('K', 's').unwrap()];
        roster
            .update_player(
                id,
                PlayerUpdate {
                    name: Some("alice".to_string()),
                    cards: Some(cards),
                    ..Default::default()
                },
            )
            .unwrap();
        let player = roster.get(id).unwrap();
        assert_eq!(player.name, "alice");
        assert_eq!(player.cards, cards);
        assert_eq!(player.position, 1);
        assert!(!roster.is_modified());
    }

    #[test]
    fn test_update_stack_marks_modified() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        let id = roster.seats()[0].id;
        roster
            .update_player(
                id,
                PlayerUpdate {
                    initial_stack: Some(Chips::from(250)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(roster.is_modified());
        assert!(!roster.sync_stacks_to_blinds(&[Chips::from(1), Chips::from(2)]));
    }

    // === Stack Sync Tests ===

    #[test]
    fn test_sync_stacks_to_blinds() {
        let mut roster = Roster::with_players(3, DEFAULT_STACK);
        assert!(roster.sync_stacks_to_blinds(&[Chips::from(5), Chips::from(10)]));
        assert!(
            roster
                .seats()
                .iter()
                .all(|p| p.initial_stack == Chips::from(1000) && p.stack == Chips::from(1000))
        );
    }

    #[test]
    fn test_sync_stacks_without_blinds() {
        let mut roster = Roster::with_players(2, DEFAULT_STACK);
        assert!(!roster.sync_stacks_to_blinds(&[]));
        assert_eq!(roster.seats()[0].stack, DEFAULT_STACK);
    }
}
