//! Command execution against a recording session.

use hand_recorder::{
    Actor, ActionChoice, Chips, CommittedInput, ExportError, HandRecorder, InputError,
    PlayerUpdate, RecorderError,
    input::{parse_cards, parse_hole_cards},
    phh,
};
use log::info;
use std::{fmt::Write as _, fs, io, path::PathBuf};
use thiserror::Error;

use crate::{
    commands::{ActionCommand, ActorTarget, Command},
    config::RecorderConfig,
};

/// Longest study answer shown in the history before it is cut off.
const ANSWER_PREVIEW_LEN: usize = 20;

pub const HELP: &str = "\
TABLE:
  table                  Show seats, stacks, blinds and who acts next
  blinds LIST            Set blinds and straddles (e.g. 'blinds 1, 2')
  ante N                 Set the ante every seat posts
  add [NAME [STACK]]     Seat a player before the button
  remove pN              Remove a player
  button pN              Move the button
  hero pN                Record the hand from this player's view
  name pN NAME           Rename a player
  stack pN N             Set a player's starting stack
  cards pN CARDS         Set hole cards (e.g. 'cards p1 AhKd', '??' for unknown)

ACTIONS:
  actor pN|dealer        Choose who acts next
  fold | check | call    Record an action for the current actor
  bet N | raise N
  muck | show [CARDS]
  deal CARDS             Deal the flop (3 cards), turn or river (1 card)
  study ACTION -- TEXT   Record a hero decision with the correct answer
  answer N TEXT          Set the answer on action N of the history
  undo                   Remove the last action
  history                List recorded actions

EXPORT:
  context TEXT | notes TEXT | source TEXT
  export [FILE]          Write the hand as PHH (default game.phh)
  quit
";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("No action number {0} in the history")]
    NoSuchAction(usize),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct App {
    recorder: HandRecorder,
    blinds: CommittedInput<Vec<Chips>>,
    ante: CommittedInput<Chips>,
    output: Option<String>,
}

impl App {
    #[must_use]
    pub fn new(config: RecorderConfig) -> Self {
        let mut recorder = HandRecorder::new(config.num_players, config.blinds.clone());
        recorder.set_ante(config.ante);
        Self {
            recorder,
            blinds: CommittedInput::required(config.blinds),
            ante: CommittedInput::new(config.ante),
            output: config.output,
        }
    }

    #[must_use]
    pub fn recorder(&self) -> &HandRecorder {
        &self.recorder
    }

    /// Run one command and return the text to show the user.
    pub fn execute(&mut self, command: Command) -> Result<String, AppError> {
        match command {
            Command::Help => Ok(HELP.to_string()),
            Command::Table => Ok(self.render_table()),
            Command::History => Ok(self.render_history()),
            Command::Quit => Ok("Bye.".to_string()),
            Command::Undo => {
                let action = self.recorder.undo()?;
                Ok(format!(
                    "Undid {} {}. {}",
                    self.recorder.actor_name(action.actor()),
                    action,
                    self.next_prompt()
                ))
            }
            Command::Blinds(raw) => {
                let blinds = self.blinds.submit(raw)?.clone();
                self.recorder.set_blinds(blinds);
                Ok(format!("Blinds: {}", self.blinds.raw()))
            }
            Command::Ante(raw) => {
                let ante = *self.ante.submit(raw)?;
                self.recorder.set_ante(ante);
                Ok(format!("Ante: {ante}"))
            }
            Command::AddPlayer { name, stack } => {
                let id = self.recorder.add_player(name, stack);
                Ok(format!("Seated {}", self.recorder.actor_name(Actor::Player(id))))
            }
            Command::RemovePlayer(position) => {
                let id = self.recorder.player_at(position)?;
                let name = self.recorder.actor_name(Actor::Player(id));
                if self.recorder.remove_player(id) {
                    Ok(format!("Removed {name}"))
                } else {
                    Ok(format!("Kept {name}: a hand needs at least two players"))
                }
            }
            Command::Button(position) => {
                let id = self.recorder.player_at(position)?;
                self.recorder.set_button(id)?;
                Ok(format!("Button: {}", self.recorder.actor_name(Actor::Player(id))))
            }
            Command::Hero(position) => {
                let id = self.recorder.player_at(position)?;
                self.recorder.set_hero(id)?;
                Ok(format!("Hero: {}", self.recorder.actor_name(Actor::Player(id))))
            }
            Command::Rename(position, name) => {
                let id = self.recorder.player_at(position)?;
                self.recorder.update_player(
                    id,
                    PlayerUpdate {
                        name: Some(name),
                        ..Default::default()
                    },
                )?;
                Ok(format!("Renamed {}", self.recorder.actor_name(Actor::Player(id))))
            }
            Command::Stack(position, stack) => {
                let id = self.recorder.player_at(position)?;
                self.recorder.update_player(
                    id,
                    PlayerUpdate {
                        initial_stack: Some(stack),
                        stack: Some(stack),
                        ..Default::default()
                    },
                )?;
                Ok(format!("{} starts with {stack}", self.recorder.actor_name(Actor::Player(id))))
            }
            Command::Cards(position, raw) => {
                let id = self.recorder.player_at(position)?;
                let cards = parse_hole_cards(&raw)?;
                self.recorder.set_cards(id, cards)?;
                Ok(format!(
                    "{} holds {}{}",
                    self.recorder.actor_name(Actor::Player(id)),
                    cards[0],
                    cards[1]
                ))
            }
            Command::Actor(target) => {
                let actor = match target {
                    ActorTarget::Dealer => Actor::Dealer,
                    ActorTarget::Player(position) => Actor::Player(self.recorder.player_at(position)?),
                };
                self.recorder.select_actor(actor)?;
                Ok(self.next_prompt())
            }
            Command::Act(action) => {
                let actor = self.recorder.current_actor();
                let choice = self.choice(action)?;
                let description = choice.to_string();
                self.recorder.record(choice)?;
                Ok(format!(
                    "{} {description}. {}",
                    self.recorder.actor_name(actor),
                    self.next_prompt()
                ))
            }
            Command::Study(action, answer) => {
                let actor = self.recorder.current_actor();
                let choice = self.choice(action)?;
                let description = choice.to_string();
                self.recorder.record_study_spot(choice, answer)?;
                Ok(format!(
                    "{} {description} (study spot). {}",
                    self.recorder.actor_name(actor),
                    self.next_prompt()
                ))
            }
            Command::Answer(index, answer) => {
                let id = self
                    .recorder
                    .ledger()
                    .actions()
                    .get(index.wrapping_sub(1))
                    .map(|action| action.id())
                    .ok_or(AppError::NoSuchAction(index))?;
                self.recorder.set_answer(id, answer)?;
                Ok(format!("Answer saved for action {index}"))
            }
            Command::Context(text) => {
                self.recorder.notes_mut().context = text;
                Ok("Context saved".to_string())
            }
            Command::Notes(text) => {
                self.recorder.notes_mut().notes = text;
                Ok("Notes saved".to_string())
            }
            Command::Source(text) => {
                self.recorder.notes_mut().source = text;
                Ok("Source saved".to_string())
            }
            Command::Export(name) => {
                let path = self.export(name.as_deref())?;
                Ok(format!("Wrote {}", path.display()))
            }
        }
    }

    /// Encode the hand and write it to disk. Returns the path written.
    pub fn export(&self, name: Option<&str>) -> Result<PathBuf, AppError> {
        let requested = name
            .filter(|name| !name.trim().is_empty())
            .or(self.output.as_deref());
        let path = PathBuf::from(phh::file_name(requested));
        let text = self.recorder.export()?.to_toml()?;
        fs::write(&path, text).map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;
        info!("exported hand to {}", path.display());
        Ok(path)
    }

    /// Turn a parsed action into a ledger choice. Board cards are checked
    /// against the street, and a bare `show` reveals the cards already
    /// entered for the player.
    fn choice(&self, action: ActionCommand) -> Result<ActionChoice, AppError> {
        let choice = match action {
            ActionCommand::Fold => ActionChoice::Fold,
            ActionCommand::CheckCall => ActionChoice::CheckCall,
            ActionCommand::BetRaise(amount) => ActionChoice::BetRaise(amount),
            ActionCommand::Muck => ActionChoice::Muck,
            ActionCommand::Show(raw) if raw.trim().is_empty() => {
                let cards = self
                    .recorder
                    .current_actor()
                    .player_id()
                    .and_then(|id| self.recorder.roster().get(id))
                    .map(|player| player.cards)
                    .unwrap_or_default();
                ActionChoice::Show(cards)
            }
            ActionCommand::Show(raw) => ActionChoice::Show(parse_hole_cards(&raw)?),
            ActionCommand::Deal(raw) => {
                let expected = self.recorder.ledger().street().next_board_size().unwrap_or(1);
                ActionChoice::DealBoard(parse_cards(&raw, expected)?)
            }
        };
        Ok(choice)
    }

    fn next_prompt(&self) -> String {
        let actor = self.recorder.current_actor();
        format!(
            "Next: {} ({})",
            self.recorder.actor_name(actor),
            self.recorder.available_choices().join(", ")
        )
    }

    #[must_use]
    pub fn render_table(&self) -> String {
        let roster = self.recorder.roster();
        let hero = roster.hero_id();
        let mut out = String::new();
        for player in roster.in_position_order() {
            let mut tags = Vec::new();
            if player.is_button {
                tags.push("button");
            }
            if Some(player.id) == hero {
                tags.push("hero");
            }
            if !player.is_active {
                tags.push("folded");
            }
            let _ = writeln!(
                out,
                "{:<20} stack {:<8} {}{}{}",
                player.display_name(),
                player.initial_stack.to_string(),
                player.cards[0],
                player.cards[1],
                if tags.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", tags.join(", "))
                }
            );
        }
        let _ = writeln!(out, "Blinds: {}  Ante: {}", self.blinds, self.ante);
        let _ = writeln!(out, "Street: {}", self.recorder.ledger().street());
        out.push_str(&self.next_prompt());
        out
    }

    #[must_use]
    pub fn render_history(&self) -> String {
        let ledger = self.recorder.ledger();
        if ledger.is_empty() {
            return "No actions yet".to_string();
        }
        let mut out = String::new();
        for (idx, action) in ledger.iter().enumerate() {
            let _ = write!(
                out,
                "{:>3}. {} {}",
                idx + 1,
                self.recorder.actor_name(action.actor()),
                action
            );
            if let Some(answer) = ledger.answer(action.id()) {
                let _ = write!(out, "  [study: {}]", preview(answer));
            }
            out.push('\n');
        }
        out
    }
}

fn preview(answer: &str) -> String {
    if answer.chars().count() > ANSWER_PREVIEW_LEN {
        let cut: String = answer.chars().take(ANSWER_PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        answer.to_string()
    }
}
