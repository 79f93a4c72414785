//! Post-hoc checking of a draw, independent of how it was produced.

use crate::{AssignmentSet, ForbiddenPairs, Participant};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    CountMismatch { expected: usize, actual: usize },
    NotGiving { name: String },
    NotReceiving { name: String },
    GivesMultiple { name: String, count: usize },
    ReceivesMultiple { name: String, count: usize },
    UnknownParticipant { identity: String },
    SelfAssignment { name: String },
    ForbiddenPair { giver: String, receiver: String },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CountMismatch { expected, actual } => write!(
                f,
                "Assignment count mismatch: expected {}, got {}",
                expected, actual
            ),
            Self::NotGiving { name } => write!(f, "{} is not giving to anyone", name),
            Self::NotReceiving { name } => write!(f, "{} is not receiving from anyone", name),
            Self::GivesMultiple { name, count } => {
                write!(f, "{} is giving to {} people", name, count)
            }
            Self::ReceivesMultiple { name, count } => {
                write!(f, "{} is receiving from {} people", name, count)
            }
            Self::UnknownParticipant { identity } => {
                write!(f, "{} is not a participant", identity)
            }
            Self::SelfAssignment { name } => {
                write!(f, "Invalid assignment: {} cannot give to themselves", name)
            }
            Self::ForbiddenPair { giver, receiver } => write!(
                f,
                "Invalid assignment: {} cannot give to {}",
                giver, receiver
            ),
        }
    }
}

/// Result of checking a draw, serialized for `santa check --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl Validation {
    /// Human-readable descriptions, one per violation
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Check `assignments` against every draw invariant, reporting all failures.
///
/// Checks run in a fixed order: edge count, giver/receiver coverage,
/// self-assignment, forbidden pairs.
pub fn validate(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
    assignments: &AssignmentSet,
) -> Validation {
    let mut violations = Vec::new();

    if assignments.len() != participants.len() {
        violations.push(Violation::CountMismatch {
            expected: participants.len(),
            actual: assignments.len(),
        });
    }

    let mut gives: HashMap<&str, usize> = HashMap::new();
    let mut receives: HashMap<&str, usize> = HashMap::new();
    for edge in assignments {
        *gives.entry(edge.giver.identity()).or_default() += 1;
        *receives.entry(edge.receiver.identity()).or_default() += 1;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for participant in participants {
        if !seen.insert(participant.identity()) {
            continue;
        }
        let name = participant.name().to_string();
        match gives.get(participant.identity()).copied().unwrap_or(0) {
            0 => violations.push(Violation::NotGiving { name: name.clone() }),
            1 => {}
            count => violations.push(Violation::GivesMultiple {
                name: name.clone(),
                count,
            }),
        }
        match receives.get(participant.identity()).copied().unwrap_or(0) {
            0 => violations.push(Violation::NotReceiving { name }),
            1 => {}
            count => violations.push(Violation::ReceivesMultiple { name, count }),
        }
    }

    let mut strangers: Vec<&str> = Vec::new();
    for edge in assignments {
        for identity in [edge.giver.identity(), edge.receiver.identity()] {
            if !seen.contains(identity) && !strangers.contains(&identity) {
                strangers.push(identity);
            }
        }
    }
    violations.extend(strangers.into_iter().map(|identity| Violation::UnknownParticipant {
        identity: identity.to_string(),
    }));

    for edge in assignments {
        if edge.giver == edge.receiver {
            violations.push(Violation::SelfAssignment {
                name: edge.giver.name().to_string(),
            });
        }
    }

    for edge in assignments {
        if forbidden.contains(edge.giver.identity(), edge.receiver.identity()) {
            violations.push(Violation::ForbiddenPair {
                giver: edge.giver.name().to_string(),
                receiver: edge.receiver.name().to_string(),
            });
        }
    }

    Validation {
        is_valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assignment, ForbiddenPair};

    fn people() -> Vec<Participant> {
        vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Carol"),
            Participant::new("d", "David"),
        ]
    }

    fn edge(people: &[Participant], giver: usize, receiver: usize) -> Assignment {
        Assignment::new(people[giver].clone(), people[receiver].clone())
    }

    #[test]
    fn test_valid_cycle() {
        let p = people();
        let order = [p[0].clone(), p[2].clone(), p[1].clone(), p[3].clone()];
        let set = AssignmentSet::from_cycle(&order);
        let forbidden = ForbiddenPairs::new(&[ForbiddenPair::new("a", "b")]);

        let result = validate(&p, &forbidden, &set);
        assert!(result.is_valid);
        assert!(result.violations.is_empty());
        assert!(result.messages().is_empty());
    }

    #[test]
    fn test_missing_receiver() {
        let p = people();
        // Alice receives twice, nobody gives to David
        let set = AssignmentSet::new(vec![
            edge(&p, 0, 1),
            edge(&p, 1, 2),
            edge(&p, 2, 0),
            edge(&p, 3, 0),
        ]);

        let result = validate(&p, &ForbiddenPairs::empty(), &set);
        assert!(!result.is_valid);
        assert!(result
            .violations
            .contains(&Violation::NotReceiving { name: "David".into() }));
        assert!(result.violations.contains(&Violation::ReceivesMultiple {
            name: "Alice".into(),
            count: 2
        }));
        assert!(result
            .messages()
            .contains(&"David is not receiving from anyone".to_string()));
    }

    #[test]
    fn test_injected_forbidden_pair() {
        let p = people();
        let set = AssignmentSet::from_cycle(&p);
        let forbidden = ForbiddenPairs::new(&[ForbiddenPair::new("b", "a")]);

        let result = validate(&p, &forbidden, &set);
        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![Violation::ForbiddenPair {
                giver: "Alice".into(),
                receiver: "Bob".into()
            }]
        );
        assert_eq!(result.messages(), vec!["Invalid assignment: Alice cannot give to Bob"]);
    }

    #[test]
    fn test_self_assignment_and_count() {
        let p = people();
        let set = AssignmentSet::new(vec![edge(&p, 0, 0), edge(&p, 1, 2), edge(&p, 2, 1)]);

        let result = validate(&p, &ForbiddenPairs::empty(), &set);
        assert!(!result.is_valid);
        assert_eq!(
            result.violations[0],
            Violation::CountMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(result.violations.contains(&Violation::NotGiving { name: "David".into() }));
        assert!(result
            .violations
            .contains(&Violation::SelfAssignment { name: "Alice".into() }));
    }

    #[test]
    fn test_unknown_participant() {
        let p = people();
        let mallory = Participant::new("m", "Mallory");
        let set = AssignmentSet::new(vec![
            edge(&p, 0, 1),
            edge(&p, 1, 2),
            edge(&p, 2, 3),
            Assignment::new(mallory, p[0].clone()),
        ]);

        let result = validate(&p, &ForbiddenPairs::empty(), &set);
        assert!(!result.is_valid);
        assert!(result.violations.contains(&Violation::NotGiving { name: "David".into() }));
        assert!(result.violations.contains(&Violation::UnknownParticipant {
            identity: "m".into()
        }));
    }

    #[test]
    fn test_empty_set_against_empty_roster() {
        let result = validate(&[], &ForbiddenPairs::empty(), &AssignmentSet::default());
        assert!(result.is_valid);
    }

    #[test]
    fn test_report_as_json() {
        let p = people();
        let set = AssignmentSet::new(vec![edge(&p, 0, 1), edge(&p, 1, 0)]);
        let forbidden = ForbiddenPairs::new(&[ForbiddenPair::new("a", "b")]);

        let result = validate(&p[..2], &forbidden, &set);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["violations"][0]["kind"], "forbidden_pair");
        assert_eq!(json["violations"][0]["giver"], "Alice");
        assert_eq!(json["violations"][0]["receiver"], "Bob");
    }
}
