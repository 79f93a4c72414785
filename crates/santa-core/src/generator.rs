use crate::{
    validate, AssignmentSet, ForbiddenPair, ForbiddenPairs, GenerateError, Participant, Solver,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Random cycle attempts made before falling back to exhaustive search
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Configuration for a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Random cycle attempts before giving up on the fast path
    pub max_attempts: usize,
    /// Shuffle the giver order handed to the fallback search, so repeated
    /// infeasible-looking rosters still get varied results
    pub shuffle_fallback: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            shuffle_fallback: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }
}

/// What a draw produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A validated assignment for every participant
    Assigned(AssignmentSet),
    /// No assignment can satisfy the constraints
    Infeasible,
}

impl Outcome {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Outcome::Infeasible)
    }

    pub fn assignments(&self) -> Option<&AssignmentSet> {
        match self {
            Outcome::Assigned(set) => Some(set),
            Outcome::Infeasible => None,
        }
    }

    pub fn into_assignments(self) -> Option<AssignmentSet> {
        match self {
            Outcome::Assigned(set) => Some(set),
            Outcome::Infeasible => None,
        }
    }
}

/// Secret Santa draw generator.
///
/// Tries cheap random single-cycle draws first and falls back to
/// [`Solver`] when they keep hitting forbidden pairs. Holds nothing between
/// calls except its random source.
pub struct Generator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<StdRng> {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Generator<R> {
    /// Create a generator drawing from a caller-supplied random source
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// Draw an assignment for `participants` that avoids `forbidden`.
    ///
    /// Every returned set has passed [`validate`]. `Ok(Outcome::Infeasible)`
    /// means the exhaustive search proved there is no valid draw.
    pub fn generate(
        &mut self,
        participants: &[Participant],
        forbidden: &ForbiddenPairs,
    ) -> Result<Outcome, GenerateError> {
        if participants.len() < 2 {
            return Err(GenerateError::InsufficientParticipants {
                found: participants.len(),
            });
        }
        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(dup) = participants.iter().find(|p| !seen.insert(p.identity())) {
            return Err(GenerateError::DuplicateParticipant {
                identity: dup.identity().to_string(),
            });
        }

        let drawn = match self.random_cycle(participants, forbidden) {
            Some(set) => Some(set),
            None => {
                log::debug!(
                    "no valid cycle in {} attempts, falling back to exhaustive search",
                    self.config.max_attempts
                );
                self.exhaustive(participants, forbidden)
            }
        };

        let Some(set) = drawn else {
            log::warn!(
                "no valid assignment exists for {} participants and {} forbidden pairs",
                participants.len(),
                forbidden.len()
            );
            return Ok(Outcome::Infeasible);
        };

        let validation = validate(participants, forbidden, &set);
        if !validation.is_valid {
            let violations = validation.messages();
            log::error!("generated assignments failed validation: {:?}", violations);
            return Err(GenerateError::InternalInconsistency { violations });
        }

        Ok(Outcome::Assigned(set))
    }

    /// Fast path: shuffle, close the order into one cycle, check every edge.
    fn random_cycle(
        &mut self,
        participants: &[Participant],
        forbidden: &ForbiddenPairs,
    ) -> Option<AssignmentSet> {
        let n = participants.len();
        let mut order = participants.to_vec();

        for _ in 0..self.config.max_attempts {
            order.shuffle(&mut self.rng);

            let valid = (0..n).all(|i| {
                let giver = &order[i];
                let receiver = &order[(i + 1) % n];
                giver != receiver && !forbidden.contains(giver.identity(), receiver.identity())
            });

            if valid {
                return Some(AssignmentSet::from_cycle(&order));
            }
        }

        None
    }

    /// Fallback: complete search, optionally over a shuffled giver order
    fn exhaustive(
        &mut self,
        participants: &[Participant],
        forbidden: &ForbiddenPairs,
    ) -> Option<AssignmentSet> {
        let mut givers = participants.to_vec();
        if self.config.shuffle_fallback {
            givers.shuffle(&mut self.rng);
        }
        Solver::new().solve(&givers, participants, forbidden)
    }
}

/// Draw with a fresh entropy-seeded generator.
///
/// Convenience wrapper over [`Generator::generate`] taking the forbidden pairs
/// as a plain list.
pub fn generate(
    participants: &[Participant],
    forbidden_pairs: &[ForbiddenPair],
    max_attempts: usize,
) -> Result<Outcome, GenerateError> {
    let forbidden = ForbiddenPairs::new(forbidden_pairs);
    Generator::with_config(GeneratorConfig::with_max_attempts(max_attempts))
        .generate(participants, &forbidden)
}
