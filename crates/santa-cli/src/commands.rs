use crate::store::AssignmentRecord;
use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use santa_core::{validate, AssignmentSet, Generator, GeneratorConfig, Outcome, Roster, Validation};
use std::path::Path;
use std::process::ExitCode;

/// Exit code for a roster that admits no valid draw
pub const EXIT_INFEASIBLE: u8 = 2;

fn load_roster(path: &Path) -> Result<Roster> {
    Roster::load(path).with_context(|| format!("failed to load roster {}", path.display()))
}

pub fn init(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    Roster::sample()
        .save(path)
        .with_context(|| format!("failed to write roster {}", path.display()))?;
    println!("Wrote sample roster to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Run a draw and store the result.
///
/// The draw has already passed validation inside the generator; an
/// inconsistency surfaces here as an error.
pub fn draw(
    roster_path: &Path,
    out: &Path,
    seed: Option<u64>,
    max_attempts: usize,
    reveal: bool,
) -> Result<ExitCode> {
    let roster = load_roster(roster_path)?;
    let config = GeneratorConfig::with_max_attempts(max_attempts);
    let mut generator = match seed {
        Some(seed) => Generator::with_rng(config, StdRng::seed_from_u64(seed)),
        None => Generator::with_config(config),
    };

    let set = match roster.draw(&mut generator)? {
        Outcome::Assigned(set) => set,
        Outcome::Infeasible => {
            eprintln!(
                "Could not generate valid assignments. \
                 Please check the participants and couples in {}.",
                roster_path.display()
            );
            return Ok(ExitCode::from(EXIT_INFEASIBLE));
        }
    };

    if reveal {
        print_assignments(&set);
    }

    let count = set.len();
    AssignmentRecord::new(set, seed).save(out)?;
    log::info!("saved {} assignments to {}", count, out.display());
    println!(
        "Generated {} Secret Santa assignments, saved to {}",
        count,
        out.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Validate the stored draw in `assignments_path` against the roster
fn check_report(roster_path: &Path, assignments_path: &Path) -> Result<(Roster, Validation)> {
    let roster = load_roster(roster_path)?;
    let record = AssignmentRecord::load(assignments_path)?;
    let result = validate(
        roster.participants(),
        &roster.forbidden(),
        &record.assignment_set(),
    );
    Ok((roster, result))
}

/// Re-validate a stored draw. Any violation gives a failing exit code, in
/// text and JSON mode alike.
pub fn check(roster_path: &Path, assignments_path: &Path, json: bool) -> Result<ExitCode> {
    let (roster, result) = check_report(roster_path, assignments_path)?;
    let code = if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_valid {
        println!(
            "Assignments are valid for {} participants",
            roster.participants().len()
        );
    } else {
        eprintln!("Assignments in {} are invalid:", assignments_path.display());
        for message in result.messages() {
            eprintln!("  - {}", message);
        }
    }
    Ok(code)
}

pub fn lookup(roster_path: &Path, assignments_path: &Path, identity: &str) -> Result<ExitCode> {
    let roster = load_roster(roster_path)?;
    let Some(person) = roster.find(identity) else {
        bail!("{} is not on the roster", identity);
    };
    let record = AssignmentRecord::load(assignments_path)?;
    let set = record.assignment_set();

    match set.receiver_of(identity) {
        Some(receiver) => println!("{} gives to {}", person.name(), receiver),
        None => println!("{} has no assignment yet", person.name()),
    }

    if let Some(partner) = roster.forbidden().partner_of(identity) {
        let name = roster.find(partner).map(|p| p.name()).unwrap_or(partner);
        println!("Partner: {}", name);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_assignments(set: &AssignmentSet) {
    let width = set
        .iter()
        .map(|a| a.giver.name().chars().count())
        .max()
        .unwrap_or(0);
    for a in set {
        println!("{:width$} -> {}", a.giver.name(), a.receiver.name(), width = width);
    }
}
