//! Text entry for blinds, amounts and cards.
//!
//! Front ends hand raw text to a [`CommittedInput`] as it is typed and
//! commit it when the user is done (end of line, field blur). A commit that
//! fails to parse keeps the last good value and remembers the error so it
//! can be shown next to the field.

use std::fmt;
use thiserror::Error;

use crate::game::entities::{Card, CardError, Chips, ChipsError, HoleCards};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Please enter a valid comma-separated list of numbers.")]
    InvalidNumberList,
    #[error("Please enter some numbers.")]
    Empty,
    #[error("Please enter exactly {0} cards.")]
    WrongCardCount(usize),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Chips(#[from] ChipsError),
}

/// Parse `1, 2, 0.5`. Blank entries are skipped, so a trailing comma is
/// fine and blank input is an empty list.
pub fn parse_number_list(raw: &str) -> Result<Vec<Chips>, InputError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.parse::<Chips>().map_err(|_| InputError::InvalidNumberList))
        .collect()
}

/// Canonical form of a number list: `1, 2`.
#[must_use]
pub fn render_number_list(amounts: &[Chips]) -> String {
    amounts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse exactly `expected` cards written back to back (`5h6d7s`).
/// Whitespace is ignored and blank input means `expected` unknown cards.
pub fn parse_cards(raw: &str, expected: usize) -> Result<Vec<Card>, InputError> {
    let chars: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Ok(vec![Card::UNKNOWN; expected]);
    }
    if chars.len() != expected * 2 {
        return Err(InputError::WrongCardCount(expected));
    }
    chars
        .chunks(2)
        .map(|pair| Card::new(pair[0], pair[1]).map_err(InputError::from))
        .collect()
}

pub fn parse_hole_cards(raw: &str) -> Result<HoleCards, InputError> {
    let cards = parse_cards(raw, 2)?;
    Ok([cards[0], cards[1]])
}

/// A value that can be typed into a text field.
pub trait InputValue: Clone + Sized {
    fn parse_input(raw: &str) -> Result<Self, InputError>;

    fn render(&self) -> String;
}

impl InputValue for Vec<Chips> {
    fn parse_input(raw: &str) -> Result<Self, InputError> {
        parse_number_list(raw)
    }

    fn render(&self) -> String {
        render_number_list(self)
    }
}

impl InputValue for Chips {
    fn parse_input(raw: &str) -> Result<Self, InputError> {
        Ok(raw.parse()?)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl InputValue for HoleCards {
    fn parse_input(raw: &str) -> Result<Self, InputError> {
        parse_hole_cards(raw)
    }

    fn render(&self) -> String {
        crate::game::entities::card_codes(self)
    }
}

/// Raw text plus the last value that parsed.
#[derive(Clone, Debug)]
pub struct CommittedInput<T: InputValue> {
    raw: String,
    value: T,
    error: Option<InputError>,
    required: bool,
}

impl<T: InputValue> CommittedInput<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            raw: value.render(),
            value,
            error: None,
            required: false,
        }
    }

    /// Like [`CommittedInput::new`], but blank text is an error.
    #[must_use]
    pub fn required(value: T) -> Self {
        Self {
            required: true,
            ..Self::new(value)
        }
    }

    /// Replace the pending text. Nothing is parsed until [`Self::commit`].
    pub fn edit(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    /// Parse the pending text. On success the value and text are replaced
    /// by the parsed value and its canonical form; on failure the previous
    /// value stays and the error is kept.
    pub fn commit(&mut self) -> Result<&T, InputError> {
        let parsed = if self.required && self.raw.trim().is_empty() {
            Err(InputError::Empty)
        } else {
            T::parse_input(&self.raw)
        };
        match parsed {
            Ok(value) => {
                self.raw = value.render();
                self.value = value;
                self.error = None;
                Ok(&self.value)
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Edit and commit in one step.
    pub fn submit(&mut self, raw: impl Into<String>) -> Result<&T, InputError> {
        self.edit(raw);
        self.commit()
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn error(&self) -> Option<&InputError> {
        self.error.as_ref()
    }
}

impl<T: InputValue> fmt::Display for CommittedInput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(err) => write!(f, "{} ({err})", self.raw),
            None => write!(f, "{}", self.raw),
        }
    }
}
