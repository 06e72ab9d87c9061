//! Table-wide constants.

/// A hand needs at least a small blind and a big blind.
pub const MIN_PLAYERS: usize = 2;

/// Seats created for a fresh hand when nothing else is configured.
pub const DEFAULT_NUM_PLAYERS: usize = 2;

/// New stacks default to this many big blinds.
pub const STACK_IN_BIG_BLINDS: u32 = 100;

pub const DEALER_NAME: &str = "Dealer";

/// Cards in the first board deal.
pub const FLOP_SIZE: usize = 3;

/// Cards in each board deal after the flop.
pub const STREET_SIZE: usize = 1;

/// Flop, turn and river.
pub const MAX_BOARD_DEALS: usize = 3;
