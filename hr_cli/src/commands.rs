use hand_recorder::{Chips, Position};
use thiserror::Error;

/// Errors that can occur during command parsing.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Invalid chip amount.
    #[error("Invalid amount '{0}'. Must be a non-negative number (e.g., 'bet 6')")]
    InvalidAmount(String),
    /// Invalid seat reference.
    #[error("Invalid position '{0}'. Use a position like 'p2'")]
    InvalidPosition(String),
    /// Invalid history index.
    #[error("Invalid action number '{0}'. Use the number shown by 'history'")]
    InvalidIndex(String),
    /// Command is missing an argument.
    #[error("'{command}' needs {what} (e.g., '{example}')")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
        example: &'static str,
    },
    /// Study command without the `--` separator.
    #[error("Study needs an action and an answer (e.g., 'study call -- raise to 9')")]
    InvalidStudyCommand,
    /// Unrecognized command.
    #[error("Unrecognized command '{0}'. Type 'help' to see available commands")]
    UnrecognizedCommand(String),
}

/// Who a manual actor selection points at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActorTarget {
    Player(Position),
    Dealer,
}

/// An action for the current actor. Card text is parsed later, once the
/// expected number of cards is known.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionCommand {
    Fold,
    CheckCall,
    BetRaise(Chips),
    Muck,
    Show(String),
    Deal(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Help,
    Table,
    History,
    Undo,
    Quit,
    Blinds(String),
    Ante(String),
    AddPlayer { name: String, stack: Option<Chips> },
    RemovePlayer(Position),
    Button(Position),
    Hero(Position),
    Rename(Position, String),
    Stack(Position, Chips),
    Cards(Position, String),
    Actor(ActorTarget),
    Act(ActionCommand),
    Study(ActionCommand, String),
    Answer(usize, String),
    Context(String),
    Notes(String),
    Source(String),
    Export(Option<String>),
}

/// Parse a line of user input into a [`Command`].
///
/// # Examples
///
/// ```
/// use hr_cli::commands::{ActionCommand, Command, parse_command};
///
/// // Single-word commands
/// assert_eq!(parse_command("fold"), Ok(Command::Act(ActionCommand::Fold)));
/// assert_eq!(parse_command("undo"), Ok(Command::Undo));
///
/// // Multi-word commands
/// assert!(matches!(parse_command("bet 6"), Ok(Command::Act(ActionCommand::BetRaise(_)))));
/// assert_eq!(parse_command("button p3"), Ok(Command::Button(3)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "help" | "?" => return Ok(Command::Help),
        "table" => return Ok(Command::Table),
        "history" => return Ok(Command::History),
        "undo" => return Ok(Command::Undo),
        "quit" | "exit" => return Ok(Command::Quit),
        "export" => return Ok(Command::Export(None)),
        "add" => {
            return Ok(Command::AddPlayer {
                name: String::new(),
                stack: None,
            });
        }
        _ => {}
    }
    if let Some(action) = parse_action(trimmed)? {
        return Ok(Command::Act(action));
    }

    // Parse multi-word commands
    let (word, rest) = split_word(trimmed);
    match word {
        "blinds" => Ok(Command::Blinds(rest.to_string())),
        "ante" => Ok(Command::Ante(rest.to_string())),
        "add" => parse_add_command(rest),
        "remove" => Ok(Command::RemovePlayer(required_position(rest, "remove")?)),
        "button" => Ok(Command::Button(required_position(rest, "button")?)),
        "hero" => Ok(Command::Hero(required_position(rest, "hero")?)),
        "name" => {
            let (position, name) = split_word(rest);
            Ok(Command::Rename(required_position(position, "name")?, name.to_string()))
        }
        "stack" => {
            let (position, amount) = split_word(rest);
            let position = required_position(position, "stack")?;
            if amount.is_empty() {
                return Err(missing("stack", "an amount", "stack p2 150"));
            }
            Ok(Command::Stack(position, parse_amount(amount)?))
        }
        "cards" => {
            let (position, cards) = split_word(rest);
            Ok(Command::Cards(required_position(position, "cards")?, cards.to_string()))
        }
        "actor" => match rest {
            "dealer" | "d" => Ok(Command::Actor(ActorTarget::Dealer)),
            "" => Err(missing("actor", "a position or 'dealer'", "actor p2")),
            position => Ok(Command::Actor(ActorTarget::Player(parse_position(position)?))),
        },
        "study" => parse_study_command(rest),
        "answer" => {
            let (index, answer) = split_word(rest);
            if index.is_empty() {
                return Err(missing("answer", "an action number", "answer 3 fold"));
            }
            let index = index
                .parse::<usize>()
                .ok()
                .filter(|index| *index > 0)
                .ok_or_else(|| ParseError::InvalidIndex(index.to_string()))?;
            Ok(Command::Answer(index, answer.to_string()))
        }
        "context" => Ok(Command::Context(rest.to_string())),
        "notes" => Ok(Command::Notes(rest.to_string())),
        "source" => Ok(Command::Source(rest.to_string())),
        "export" => Ok(Command::Export(Some(rest.to_string()))),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse an action for the current actor, or `None` if `input` isn't one.
fn parse_action(input: &str) -> Result<Option<ActionCommand>, ParseError> {
    let (word, rest) = split_word(input);
    let action = match word {
        "fold" | "f" => ActionCommand::Fold,
        "check" | "call" | "cc" => ActionCommand::CheckCall,
        "bet" | "raise" | "cbr" => {
            if rest.is_empty() {
                return Err(missing("bet", "an amount", "bet 6"));
            }
            ActionCommand::BetRaise(parse_amount(rest)?)
        }
        "muck" => ActionCommand::Muck,
        "show" => ActionCommand::Show(rest.to_string()),
        "deal" => ActionCommand::Deal(rest.to_string()),
        _ => return Ok(None),
    };
    Ok(Some(action))
}

/// Parse "add [NAME [STACK]]"
fn parse_add_command(rest: &str) -> Result<Command, ParseError> {
    let (name, stack) = match rest.rsplit_once(char::is_whitespace) {
        Some((name, last)) if last.parse::<f64>().is_ok() => (name.trim(), Some(parse_amount(last)?)),
        None if rest.parse::<f64>().is_ok() => ("", Some(parse_amount(rest)?)),
        _ => (rest, None),
    };
    Ok(Command::AddPlayer {
        name: name.to_string(),
        stack,
    })
}

/// Parse "study ACTION -- ANSWER"
fn parse_study_command(rest: &str) -> Result<Command, ParseError> {
    let (action, answer) = rest
        .split_once("--")
        .ok_or(ParseError::InvalidStudyCommand)?;
    match parse_action(action.trim())? {
        Some(action) => Ok(Command::Study(action, answer.trim().to_string())),
        None => Err(ParseError::InvalidStudyCommand),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_amount(value: &str) -> Result<Chips, ParseError> {
    value
        .parse::<Chips>()
        .map_err(|_| ParseError::InvalidAmount(value.to_string()))
}

/// Accepts `p3` or `3`.
fn parse_position(value: &str) -> Result<Position, ParseError> {
    let digits = value
        .strip_prefix('p')
        .or_else(|| value.strip_prefix('P'))
        .unwrap_or(value);
    digits
        .parse::<Position>()
        .ok()
        .filter(|position| *position > 0)
        .ok_or_else(|| ParseError::InvalidPosition(value.to_string()))
}

fn required_position(value: &str, command: &'static str) -> Result<Position, ParseError> {
    if value.is_empty() {
        return Err(missing(command, "a position", "button p3"));
    }
    parse_position(value)
}

fn missing(command: &'static str, what: &'static str, example: &'static str) -> ParseError {
    ParseError::MissingArgument {
        command,
        what,
        example,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Single-word command tests ===

    #[test]
    fn test_parse_fold() {
        assert_eq!(parse_command("fold"), Ok(Command::Act(ActionCommand::Fold)));
    }

    #[test]
    fn test_parse_check_call_aliases() {
        for input in ["check", "call", "cc"] {
            assert_eq!(
                parse_command(input),
                Ok(Command::Act(ActionCommand::CheckCall))
            );
        }
    }

    #[test]
    fn test_parse_muck() {
        assert_eq!(parse_command("muck"), Ok(Command::Act(ActionCommand::Muck)));
    }

    #[test]
    fn test_parse_show_without_cards() {
        assert_eq!(
            parse_command("show"),
            Ok(Command::Act(ActionCommand::Show(String::new())))
        );
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("table"), Ok(Command::Table));
        assert_eq!(parse_command("history"), Ok(Command::History));
        assert_eq!(parse_command("undo"), Ok(Command::Undo));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("export"), Ok(Command::Export(None)));
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_command("  fold  "), Ok(Command::Act(ActionCommand::Fold)));
    }

    // === Action tests ===

    #[test]
    fn test_parse_bet() {
        assert_eq!(
            parse_command("bet 6"),
            Ok(Command::Act(ActionCommand::BetRaise(Chips::from(6))))
        );
        assert_eq!(
            parse_command("raise 2.5"),
            Ok(Command::Act(ActionCommand::BetRaise("2.5".parse().unwrap())))
        );
    }

    #[test]
    fn test_parse_bet_invalid_amount() {
        assert_eq!(
            parse_command("bet lots"),
            Err(ParseError::InvalidAmount("lots".to_string()))
        );
        assert_eq!(
            parse_command("raise -5"),
            Err(ParseError::InvalidAmount("-5".to_string()))
        );
    }

    #[test]
    fn test_parse_bet_missing_amount() {
        assert!(matches!(
            parse_command("bet"),
            Err(ParseError::MissingArgument { command: "bet", .. })
        ));
    }

    #[test]
    fn test_parse_deal_keeps_card_text() {
        assert_eq!(
            parse_command("deal 5h 6d 7s"),
            Ok(Command::Act(ActionCommand::Deal("5h 6d 7s".to_string())))
        );
    }

    // === Roster tests ===

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse_command("add"),
            Ok(Command::AddPlayer {
                name: String::new(),
                stack: None
            })
        );
        assert_eq!(
            parse_command("add Big Al 250"),
            Ok(Command::AddPlayer {
                name: "Big Al".to_string(),
                stack: Some(Chips::from(250))
            })
        );
        assert_eq!(
            parse_command("add Alice"),
            Ok(Command::AddPlayer {
                name: "Alice".to_string(),
                stack: None
            })
        );
        assert_eq!(
            parse_command("add 80"),
            Ok(Command::AddPlayer {
                name: String::new(),
                stack: Some(Chips::from(80))
            })
        );
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(parse_command("button p3"), Ok(Command::Button(3)));
        assert_eq!(parse_command("hero 2"), Ok(Command::Hero(2)));
        assert_eq!(parse_command("remove P4"), Ok(Command::RemovePlayer(4)));
        assert_eq!(
            parse_command("button p0"),
            Err(ParseError::InvalidPosition("p0".to_string()))
        );
        assert!(matches!(
            parse_command("remove"),
            Err(ParseError::MissingArgument { command: "remove", .. })
        ));
    }

    #[test]
    fn test_parse_rename_keeps_spaces() {
        assert_eq!(
            parse_command("name p1 Daniel N"),
            Ok(Command::Rename(1, "Daniel N".to_string()))
        );
    }

    #[test]
    fn test_parse_stack_and_cards() {
        assert_eq!(
            parse_command("stack p2 150"),
            Ok(Command::Stack(2, Chips::from(150)))
        );
        assert_eq!(
            parse_command("cards p1 AhKd"),
            Ok(Command::Cards(1, "AhKd".to_string()))
        );
    }

    #[test]
    fn test_parse_actor() {
        assert_eq!(
            parse_command("actor dealer"),
            Ok(Command::Actor(ActorTarget::Dealer))
        );
        assert_eq!(
            parse_command("actor p2"),
            Ok(Command::Actor(ActorTarget::Player(2)))
        );
    }

    // === Study tests ===

    #[test]
    fn test_parse_study() {
        assert_eq!(
            parse_command("study call -- raise to 9"),
            Ok(Command::Study(ActionCommand::CheckCall, "raise to 9".to_string()))
        );
        assert_eq!(
            parse_command("study bet 6 --"),
            Ok(Command::Study(ActionCommand::BetRaise(Chips::from(6)), String::new()))
        );
    }

    #[test]
    fn test_parse_study_without_separator() {
        assert_eq!(
            parse_command("study call"),
            Err(ParseError::InvalidStudyCommand)
        );
        assert_eq!(
            parse_command("study nonsense -- x"),
            Err(ParseError::InvalidStudyCommand)
        );
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_command("answer 3 fold, he has it"),
            Ok(Command::Answer(3, "fold, he has it".to_string()))
        );
        assert_eq!(
            parse_command("answer x fold"),
            Err(ParseError::InvalidIndex("x".to_string()))
        );
    }

    // === Metadata tests ===

    #[test]
    fn test_parse_notes() {
        assert_eq!(
            parse_command("context 1/2 home game"),
            Ok(Command::Context("1/2 home game".to_string()))
        );
        assert_eq!(parse_command("notes"), Ok(Command::Notes(String::new())));
        assert_eq!(
            parse_command("export river.phh"),
            Ok(Command::Export(Some("river.phh".to_string())))
        );
    }

    // === Error tests ===

    #[test]
    fn test_parse_unrecognized_command() {
        assert_eq!(
            parse_command("shove"),
            Err(ParseError::UnrecognizedCommand("shove".to_string()))
        );
    }

    #[test]
    fn test_parse_error_messages() {
        let err = parse_command("bet lots").unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));
        let err = parse_command("shove").unwrap_err();
        assert!(err.to_string().contains("help"));
    }
}
