//! Roster configuration: who takes part and which couples must be kept apart.
//!
//! Stored as JSON:
//!
//! ```json
//! {
//!   "participants": [{ "identity": "alice@example.com", "name": "Alice Johnson" }],
//!   "couples": [["alice@example.com", "bob@example.com"]]
//! }
//! ```

use crate::{
    ForbiddenPair, ForbiddenPairs, GenerateError, Generator, Outcome, Participant, RosterError,
    RosterResult,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    participants: Vec<Participant>,
    couples: Vec<ForbiddenPair>,
}

#[derive(Deserialize)]
struct RosterFile {
    participants: Vec<Participant>,
    #[serde(default)]
    couples: Vec<ForbiddenPair>,
}

impl Roster {
    /// Build a roster, rejecting repeated identities
    pub fn new(participants: Vec<Participant>, couples: Vec<ForbiddenPair>) -> RosterResult<Self> {
        let mut seen = HashSet::with_capacity(participants.len());
        for p in &participants {
            if !seen.insert(p.identity()) {
                return Err(RosterError::DuplicateParticipant {
                    identity: p.identity().to_string(),
                });
            }
        }

        Ok(Self {
            participants,
            couples,
        })
    }

    /// The six-person, two-couple roster written by `santa init`
    pub fn sample() -> Self {
        let participants = vec![
            Participant::new("alice@example.com", "Alice Johnson"),
            Participant::new("bob@example.com", "Bob Smith"),
            Participant::new("carol@example.com", "Carol Williams"),
            Participant::new("david@example.com", "David Brown"),
            Participant::new("eve@example.com", "Eve Davis"),
            Participant::new("frank@example.com", "Frank Miller"),
        ];
        let couples = vec![
            ForbiddenPair::new("alice@example.com", "bob@example.com"),
            ForbiddenPair::new("carol@example.com", "david@example.com"),
        ];
        Self {
            participants,
            couples,
        }
    }

    pub fn from_json(json: &str) -> RosterResult<Self> {
        let file: RosterFile = serde_json::from_str(json)?;
        Self::new(file.participants, file.couples)
    }

    pub fn to_json(&self) -> RosterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a roster file. Couples naming unknown identities are kept as
    /// written and reported with a warning.
    pub fn load(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let roster = Self::from_json(&std::fs::read_to_string(path)?)?;

        for couple in roster.inert_couples() {
            log::warn!(
                "couple [{:?}, {:?}] in {} names someone who is not a participant \
                 and will not constrain the draw",
                couple.first(),
                couple.second(),
                path.display()
            );
        }

        Ok(roster)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RosterResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn couples(&self) -> &[ForbiddenPair] {
        &self.couples
    }

    pub fn find(&self, identity: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.identity() == identity)
    }

    /// Lookup index over the couples
    pub fn forbidden(&self) -> ForbiddenPairs {
        self.couples.iter().cloned().collect()
    }

    /// Couples with at least one side missing from the participant list.
    ///
    /// These never match a real edge, usually because of a typo in an
    /// address.
    pub fn inert_couples(&self) -> Vec<&ForbiddenPair> {
        self.couples
            .iter()
            .filter(|c| self.find(c.first()).is_none() || self.find(c.second()).is_none())
            .collect()
    }

    /// Run a draw for this roster
    pub fn draw<R: Rng>(&self, generator: &mut Generator<R>) -> Result<Outcome, GenerateError> {
        generator.generate(&self.participants, &self.forbidden())
    }
}
