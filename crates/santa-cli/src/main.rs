mod commands;
mod store;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use santa_core::DEFAULT_MAX_ATTEMPTS;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "santa", version, about = "Run and check Secret Santa draws")]
struct Cli {
    /// Roster file [default: $SANTA_ROSTER or santa_roster.json in the config dir]
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Assignments file [default: $SANTA_DATA or santa_assignments.json in the data dir]
    #[arg(long, global = true)]
    assignments: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a sample roster to edit
    Init {
        /// Overwrite an existing roster
        #[arg(long)]
        force: bool,
    },
    /// Draw assignments for the roster and save them
    Draw {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Random cycle attempts before the exhaustive search
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,
        /// Print who gives to whom
        #[arg(long)]
        reveal: bool,
    },
    /// Re-validate saved assignments against the roster
    Check {
        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show who a participant gives to
    Lookup {
        /// Participant identity (email)
        identity: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let roster = cli.roster.unwrap_or_else(store::default_roster_path);
    let assignments = cli
        .assignments
        .unwrap_or_else(store::default_assignments_path);

    match cli.command {
        Command::Init { force } => commands::init(&roster, force),
        Command::Draw {
            seed,
            max_attempts,
            reveal,
        } => commands::draw(&roster, &assignments, seed, max_attempts, reveal),
        Command::Check { json } => commands::check(&roster, &assignments, json),
        Command::Lookup { identity } => commands::lookup(&roster, &assignments, &identity),
    }
}
