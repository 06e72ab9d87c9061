//! A line-oriented terminal front end for recording poker hands.
//!
//! Each line is one command. The hand is kept in memory until `export`
//! writes it as a PHH file.

use anyhow::{Context, Result};
use hr_cli::{
    app::App,
    commands::{Command, parse_command},
    config::{ConfigOverrides, RecorderConfig},
};
use log::{debug, warn};
use pico_args::Arguments;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Record a poker hand action by action and export it as PHH

USAGE:
  hr_cli [OPTIONS]

OPTIONS:
  --output FILE         Default export file  [default: env HR_OUTPUT or game.phh]
  --players N           Number of seats  [default: env HR_PLAYERS or 2]
  --blinds LIST         Blinds and straddles  [default: env HR_BLINDS or \"1, 2\"]
  --ante AMOUNT         Ante per seat  [default: env HR_ANTE or 0]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  HR_OUTPUT, HR_PLAYERS, HR_BLINDS, HR_ANTE
  RUST_LOG              Log level (e.g., debug)
  (A .env file in the working directory is loaded if present)

Type 'help' at the prompt for the list of commands.
";

fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    env_logger::builder().format_target(false).init();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = ConfigOverrides {
        output: pargs.opt_value_from_str("--output")?,
        num_players: pargs.opt_value_from_str("--players")?,
        blinds: pargs.opt_value_from_str("--blinds")?,
        ante: pargs.opt_value_from_str("--ante")?,
    };
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("ignoring unexpected arguments: {remaining:?}");
    }

    let config = RecorderConfig::from_env(overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    debug!("starting with {config:?}");

    run(App::new(config))
}

fn run(mut app: App) -> Result<()> {
    println!("{}", app.render_table());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let quit = matches!(command, Command::Quit);
        match app.execute(command) {
            Ok(reply) => println!("{reply}"),
            Err(err) => {
                warn!("command failed: {err}");
                println!("{err}");
            }
        }
        if quit {
            break;
        }
    }

    Ok(())
}
