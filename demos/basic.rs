//! Basic example of using the Secret Santa engine

use santa_core::{validate, ForbiddenPair, Generator, Outcome, Participant, Roster, Solver};

fn main() {
    // Draw for the sample roster
    println!("Drawing for the sample roster...\n");
    let roster = Roster::sample();
    let mut generator = Generator::new();

    match roster.draw(&mut generator) {
        Ok(Outcome::Assigned(set)) => {
            for a in &set {
                println!("{} -> {}", a.giver.name(), a.receiver.name());
            }

            // Check it the way a caller would before saving
            let check = validate(roster.participants(), &roster.forbidden(), &set);
            println!("\nValid: {}", check.is_valid);
        }
        Ok(Outcome::Infeasible) => println!("No valid draw exists"),
        Err(e) => println!("Error: {}", e),
    }

    // A roster where every single cycle is blocked
    println!("\n--- Forcing the exhaustive search ---\n");
    let people = vec![
        Participant::new("a@example.com", "Ana"),
        Participant::new("b@example.com", "Ben"),
        Participant::new("c@example.com", "Cat"),
        Participant::new("d@example.com", "Dan"),
    ];
    let couples = vec![
        ForbiddenPair::new("a@example.com", "b@example.com"),
        ForbiddenPair::new("b@example.com", "c@example.com"),
        ForbiddenPair::new("c@example.com", "d@example.com"),
        ForbiddenPair::new("d@example.com", "a@example.com"),
    ];
    let roster = Roster::new(people, couples).expect("identities are unique");

    let (solution, stats) = Solver::new().solve_with_stats(
        roster.participants(),
        roster.participants(),
        &roster.forbidden(),
    );
    println!("Search explored {} nodes", stats.nodes);
    if let Some(set) = solution {
        for a in &set {
            println!("{} -> {}", a.giver.name(), a.receiver.name());
        }
    }

    // Two partners on their own can never draw
    println!("\n--- An impossible roster ---\n");
    let pair = vec![
        Participant::new("x@example.com", "Xia"),
        Participant::new("y@example.com", "Yan"),
    ];
    let couple = [ForbiddenPair::new("x@example.com", "y@example.com")];
    let outcome = santa_core::generate(&pair, &couple, 100);
    println!("Outcome: {:?}", outcome);
}
