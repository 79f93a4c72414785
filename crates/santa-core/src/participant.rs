use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A member of the draw.
///
/// Two participants are the same person when their identities match; the
/// display name plays no part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Stable unique identity, usually an email address
    #[serde(alias = "email")]
    identity: String,
    /// Display name
    name: String,
}

impl Participant {
    pub fn new(identity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            name: name.into(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.identity)
    }
}

/// One giver→receiver edge of a draw
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: Participant,
    pub receiver: Participant,
}

impl Assignment {
    pub fn new(giver: Participant, receiver: Participant) -> Self {
        Self { giver, receiver }
    }
}

/// Ordered list of edges produced by a draw.
///
/// Construction does not check anything; run [`crate::validate`] before
/// trusting a set that did not come straight out of a [`crate::Generator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet {
    edges: Vec<Assignment>,
}

impl AssignmentSet {
    pub fn new(edges: Vec<Assignment>) -> Self {
        Self { edges }
    }

    /// Build the single cycle perm[0] → perm[1] → ... → perm[n-1] → perm[0]
    pub fn from_cycle(order: &[Participant]) -> Self {
        let n = order.len();
        let edges = (0..n)
            .map(|i| Assignment::new(order[i].clone(), order[(i + 1) % n].clone()))
            .collect();
        Self { edges }
    }

    pub fn edges(&self) -> &[Assignment] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.edges.iter()
    }

    /// Who the given identity buys a gift for
    pub fn receiver_of(&self, giver: &str) -> Option<&Participant> {
        self.edges
            .iter()
            .find(|a| a.giver.identity() == giver)
            .map(|a| &a.receiver)
    }

    /// Who buys a gift for the given identity
    pub fn giver_of(&self, receiver: &str) -> Option<&Participant> {
        self.edges
            .iter()
            .find(|a| a.receiver.identity() == receiver)
            .map(|a| &a.giver)
    }

    pub fn into_edges(self) -> Vec<Assignment> {
        self.edges
    }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
