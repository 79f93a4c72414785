use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Two identities that must never be matched, in either direction.
///
/// Serialized as a two element array: `["alice@example.com", "bob@example.com"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForbiddenPair(pub String, pub String);

impl ForbiddenPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self(first.into(), second.into())
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// Read-only lookup table of forbidden pairs.
///
/// Every pair is indexed under both of its identities, so
/// `contains(a, b) == contains(b, a)` and a lookup is two hash probes.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPairs {
    pairs: Vec<ForbiddenPair>,
    index: HashMap<String, HashSet<String>>,
}

impl ForbiddenPairs {
    pub fn new(pairs: &[ForbiddenPair]) -> Self {
        let mut index: HashMap<String, HashSet<String>> = HashMap::new();
        let mut kept = Vec::with_capacity(pairs.len());

        for pair in pairs {
            // Self-assignment is already ruled out, a self-pair adds nothing
            if pair.0 == pair.1 {
                continue;
            }
            index.entry(pair.0.clone()).or_default().insert(pair.1.clone());
            index.entry(pair.1.clone()).or_default().insert(pair.0.clone());
            kept.push(pair.clone());
        }

        Self { pairs: kept, index }
    }

    /// An index that forbids nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `a` and `b` form a forbidden pair, regardless of order
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.index.get(a).is_some_and(|others| others.contains(b))
    }

    /// First declared partner of `identity`, if any
    pub fn partner_of(&self, identity: &str) -> Option<&str> {
        self.pairs.iter().find_map(|pair| {
            if pair.0 == identity {
                Some(pair.1.as_str())
            } else if pair.1 == identity {
                Some(pair.0.as_str())
            } else {
                None
            }
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<ForbiddenPair> for ForbiddenPairs {
    fn from_iter<I: IntoIterator<Item = ForbiddenPair>>(iter: I) -> Self {
        let pairs: Vec<ForbiddenPair> = iter.into_iter().collect();
        Self::new(&pairs)
    }
}
