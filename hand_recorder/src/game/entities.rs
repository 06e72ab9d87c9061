use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self},
    str::FromStr,
};
use thiserror::Error;
use uuid::Uuid;

use super::constants;

/// Errors raised while building a [`Card`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),
    #[error("Invalid suit: {0}")]
    InvalidSuit(char),
    #[error("Incomplete card: {0:?}")]
    Incomplete(String),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    // Not revealed (yet).
    Unknown,
}

impl Rank {
    pub const ALL: [Self; 14] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
        Self::Unknown,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
            Self::Unknown => '?',
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = CardError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let rank = match value.to_ascii_uppercase() {
            '2' => Self::Two,
            '3' => Self::Three,
            '4' => Self::Four,
            '5' => Self::Five,
            '6' => Self::Six,
            '7' => Self::Seven,
            '8' => Self::Eight,
            '9' => Self::Nine,
            'T' => Self::Ten,
            'J' => Self::Jack,
            'Q' => Self::Queen,
            'K' => Self::King,
            'A' => Self::Ace,
            '?' => Self::Unknown,
            _ => return Err(CardError::InvalidRank(value)),
        };
        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
    // Not revealed (yet).
    Unknown,
}

impl Suit {
    pub const ALL: [Self; 5] = [
        Self::Club,
        Self::Diamond,
        Self::Heart,
        Self::Spade,
        Self::Unknown,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Club => 'c',
            Self::Diamond => 'd',
            Self::Heart => 'h',
            Self::Spade => 's',
            Self::Unknown => '?',
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let suit = match value.to_ascii_lowercase() {
            'c' => Self::Club,
            'd' => Self::Diamond,
            'h' => Self::Heart,
            's' => Self::Spade,
            '?' => Self::Unknown,
            _ => return Err(CardError::InvalidSuit(value)),
        };
        Ok(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A card as written down by the user. Either half may be unknown
/// (`?`), so `??` is a face-down card and `A?` is "some ace".
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const UNKNOWN: Self = Self {
        rank: Rank::Unknown,
        suit: Suit::Unknown,
    };

    /// Build a card from its rank and suit characters, in any case.
    pub fn new(rank: char, suit: char) -> Result<Self, CardError> {
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }

    #[must_use]
    pub fn from_parts(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.rank != Rank::Unknown && self.suit != Suit::Unknown
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => Self::new(rank, suit),
            _ => Err(CardError::Incomplete(s.to_string())),
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A player's two hole cards.
pub type HoleCards = [Card; 2];

/// Concatenate card codes without a separator (`AhKs`).
#[must_use]
pub fn card_codes(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect()
}

/// Errors raised while reading a chip amount.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ChipsError {
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("amount can't be negative: {0}")]
    Negative(f64),
    #[error("amount must be finite")]
    NotFinite,
}

/// A chip amount. Hands are transcribed from real tables, so fractional
/// amounts (a 0.5 ante) are allowed, but negative and non-finite ones
/// are not.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Chips(f64);

// Largest integer a f64 represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Chips {
    pub const ZERO: Self = Self(0.0);

    pub fn new(amount: f64) -> Result<Self, ChipsError> {
        if !amount.is_finite() {
            return Err(ChipsError::NotFinite);
        }
        if amount < 0.0 {
            return Err(ChipsError::Negative(amount));
        }
        // Normalizes -0.0.
        Ok(Self(amount + 0.0))
    }

    #[must_use]
    pub fn amount(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER
    }

    #[must_use]
    pub fn times(self, factor: u32) -> Self {
        Self(self.0 * f64::from(factor))
    }

    /// Largest amount in `amounts`, if any.
    #[must_use]
    pub fn max_of(amounts: &[Self]) -> Option<Self> {
        amounts
            .iter()
            .copied()
            .reduce(|max, amount| if amount > max { amount } else { max })
    }
}

impl From<u32> for Chips {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Chips {
    type Err = ChipsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = trimmed
            .parse::<f64>()
            .map_err(|_| ChipsError::NotANumber(trimmed.to_string()))?;
        Self::new(amount)
    }
}

// Whole amounts are written as integers so exported documents read
// `min_bet = 2` rather than `min_bet = 2.0`.
impl Serialize for Chips {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_whole() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

pub const DEFAULT_STACK: Chips = Chips(100.0);

/// Seat number counted clockwise from the seat after the button,
/// so position 1 is the small blind.
pub type Position = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub initial_stack: Chips,
    pub stack: Chips,
    pub cards: HoleCards,
    pub is_button: bool,
    /// Cleared when the player folds or mucks.
    pub is_active: bool,
    pub position: Position,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, initial_stack: Chips, cards: HoleCards) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            initial_stack,
            stack: initial_stack,
            cards,
            is_button: false,
            is_active: true,
            position: 1,
        }
    }

    /// `Alice (p2)` for named players, `p2` otherwise.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("p{}", self.position)
        } else {
            format!("{} (p{})", self.name, self.position)
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which kind of actor an action belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Player,
    Dealer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Player => "player",
            Self::Dealer => "dealer",
        };
        write!(f, "{repr}")
    }
}

/// Whoever takes an action: a seated player, or the dealer putting out
/// board cards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Actor {
    Player(PlayerId),
    Dealer,
}

impl Actor {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Player(_) => Role::Player,
            Self::Dealer => Role::Dealer,
        }
    }

    #[must_use]
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Self::Player(id) => Some(*id),
            Self::Dealer => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(id) => write!(f, "player {id}"),
            Self::Dealer => write!(f, "{}", constants::DEALER_NAME),
        }
    }
}

/// Free text attached to the exported hand.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandNotes {
    pub context: String,
    pub notes: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Card Tests ===

    #[test]
    fn test_card_creation_normalizes_case() {
        let card = Card::new('a', 'H').unwrap();
        assert_eq!(card.rank(), Rank::Ace);
        assert_eq!(card.suit(), Suit::Heart);
        assert_eq!(card.to_string(), "Ah");
    }

    #[test]
    fn test_card_ten() {
        let card = Card::new('t', 'd').unwrap();
        assert_eq!(card.to_string(), "Td");
    }

    #[test]
    fn test_card_unknown_halves() {
        assert_eq!(Card::new('?', '?').unwrap(), Card::UNKNOWN);
        assert_eq!(Card::new('K', '?').unwrap().to_string(), "K?");
        assert_eq!(Card::new('?', 's').unwrap().to_string(), "?s");
        assert!(!Card::new('K', '?').unwrap().is_known());
        assert!(Card::new('K', 'c').unwrap().is_known());
    }

    #[test]
    fn test_card_invalid_rank() {
        assert_eq!(Card::new('1', 'h'), Err(CardError::InvalidRank('1')));
        assert_eq!(Card::new('X', 'h'), Err(CardError::InvalidRank('X')));
    }

    #[test]
    fn test_card_invalid_suit() {
        assert_eq!(Card::new('A', 'x'), Err(CardError::InvalidSuit('x')));
    }

    #[test]
    fn test_card_from_str() {
        assert_eq!("9c".parse::<Card>().unwrap().to_string(), "9c");
        assert!(matches!("9".parse::<Card>(), Err(CardError::Incomplete(_))));
        assert!(matches!("9cc".parse::<Card>(), Err(CardError::Incomplete(_))));
    }

    #[test]
    fn test_card_default_is_unknown() {
        assert_eq!(Card::default().to_string(), "??");
    }

    #[test]
    fn test_card_codes() {
        let cards = [
            Card::new('5', 'h').unwrap(),
            Card::new('6', 'd').unwrap(),
            Card::new('7', 's').unwrap(),
        ];
        assert_eq!(card_codes(&cards), "5h6d7s");
        assert_eq!(card_codes(&[]), "");
    }

    // === Chips Tests ===

    #[test]
    fn test_chips_display_whole_and_fractional() {
        assert_eq!(Chips::from(6).to_string(), "6");
        assert_eq!("0.5".parse::<Chips>().unwrap().to_string(), "0.5");
        assert_eq!("2.50".parse::<Chips>().unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_chips_rejects_garbage() {
        assert!(matches!("abc".parse::<Chips>(), Err(ChipsError::NotANumber(_))));
        assert!(matches!("-1".parse::<Chips>(), Err(ChipsError::Negative(_))));
        assert!(matches!("inf".parse::<Chips>(), Err(ChipsError::NotFinite)));
        assert!(matches!("NaN".parse::<Chips>(), Err(ChipsError::NotFinite)));
    }

    #[test]
    fn test_chips_trims_whitespace() {
        assert_eq!(" 20 ".parse::<Chips>().unwrap(), Chips::from(20));
    }

    #[test]
    fn test_chips_negative_zero_normalized() {
        assert_eq!(Chips::new(-0.0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_chips_max_of() {
        let blinds = [Chips::from(1), Chips::from(2), Chips::from(0)];
        assert_eq!(Chips::max_of(&blinds), Some(Chips::from(2)));
        assert_eq!(Chips::max_of(&[]), None);
    }

    #[test]
    fn test_chips_times() {
        assert_eq!(Chips::from(2).times(100), Chips::from(200));
    }

    // === Player Tests ===

    #[test]
    fn test_player_new_defaults() {
        let player = Player::new("alice", Chips::from(500), [Card::UNKNOWN; 2]);
        assert!(player.is_active);
        assert!(!player.is_button);
        assert_eq!(player.stack, player.initial_stack);
    }

    #[test]
    fn test_player_display_name() {
        let mut player = Player::new("", DEFAULT_STACK, [Card::UNKNOWN; 2]);
        player.position = 3;
        assert_eq!(player.display_name(), "p3");
        player.name = "Bob".to_string();
        assert_eq!(player.to_string(), "Bob (p3)");
    }

    #[test]
    fn test_player_ids_unique() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    // === Actor Tests ===

    #[test]
    fn test_actor_role() {
        assert_eq!(Actor::Player(PlayerId::new()).role(), Role::Player);
        assert_eq!(Actor::Dealer.role(), Role::Dealer);
        assert_eq!(Actor::Dealer.player_id(), None);
        assert_eq!(Actor::Dealer.to_string(), "Dealer");
    }
}
