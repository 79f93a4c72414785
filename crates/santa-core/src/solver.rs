//! Exhaustive backtracking search for a draw.
//!
//! Used when the random cycle attempts run out. Either finds a valid
//! assignment or proves that none exists.

use crate::{Assignment, AssignmentSet, ForbiddenPairs, Participant};
use std::collections::HashSet;

/// Counters from one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Tentative edges committed
    pub nodes: u64,
    /// Edges undone after their subtree failed
    pub backtracks: u64,
}

/// Unit struct solver, stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Find the first valid draw where `givers[i]` is assigned in order.
    ///
    /// `receivers` is the candidate order tried at each position. Returns
    /// `None` when no valid draw exists.
    pub fn solve(
        &self,
        givers: &[Participant],
        receivers: &[Participant],
        forbidden: &ForbiddenPairs,
    ) -> Option<AssignmentSet> {
        self.solve_with_stats(givers, receivers, forbidden).0
    }

    /// Like [`Solver::solve`], also reporting how much searching was done
    pub fn solve_with_stats(
        &self,
        givers: &[Participant],
        receivers: &[Participant],
        forbidden: &ForbiddenPairs,
    ) -> (Option<AssignmentSet>, SolveStats) {
        if let Some(stuck) = dead_end(givers, receivers, forbidden) {
            log::debug!("{} has no allowed match, skipping search", stuck);
            return (None, SolveStats::default());
        }

        let mut search = Search {
            givers,
            receivers,
            forbidden,
            stats: SolveStats::default(),
        };
        let mut consumed = HashSet::with_capacity(receivers.len());
        let mut edges = Vec::with_capacity(givers.len());

        let found = search.assign(0, &mut consumed, &mut edges);
        let stats = search.stats;
        log::debug!(
            "backtracking search over {} givers: {} nodes, {} backtracks, solution {}",
            givers.len(),
            stats.nodes,
            stats.backtracks,
            if found { "found" } else { "not found" }
        );

        (found.then(|| AssignmentSet::new(edges)), stats)
    }

    /// Whether any valid draw exists for these participants
    pub fn is_feasible(&self, participants: &[Participant], forbidden: &ForbiddenPairs) -> bool {
        self.solve(participants, participants, forbidden).is_some()
    }
}

fn allowed(forbidden: &ForbiddenPairs, giver: &Participant, receiver: &Participant) -> bool {
    giver != receiver && !forbidden.contains(giver.identity(), receiver.identity())
}

/// A giver with no allowed receiver, or a receiver with no allowed giver.
///
/// Either one makes the search fail, but only after exhausting every
/// ordering of the givers placed before it.
fn dead_end<'a>(
    givers: &'a [Participant],
    receivers: &'a [Participant],
    forbidden: &ForbiddenPairs,
) -> Option<&'a Participant> {
    givers
        .iter()
        .find(|g| !receivers.iter().any(|r| allowed(forbidden, g, r)))
        .or_else(|| {
            receivers
                .iter()
                .find(|r| !givers.iter().any(|g| allowed(forbidden, g, r)))
        })
}

struct Search<'a> {
    givers: &'a [Participant],
    receivers: &'a [Participant],
    forbidden: &'a ForbiddenPairs,
    stats: SolveStats,
}

impl<'a> Search<'a> {
    fn assign(
        &mut self,
        index: usize,
        consumed: &mut HashSet<&'a str>,
        edges: &mut Vec<Assignment>,
    ) -> bool {
        let (givers, receivers) = (self.givers, self.receivers);
        if index == givers.len() {
            return true;
        }

        let giver = &givers[index];
        for receiver in receivers {
            if consumed.contains(receiver.identity()) {
                continue;
            }
            if !allowed(self.forbidden, giver, receiver) {
                continue;
            }

            consumed.insert(receiver.identity());
            edges.push(Assignment::new(giver.clone(), receiver.clone()));
            self.stats.nodes += 1;

            if self.assign(index + 1, consumed, edges) {
                return true;
            }

            edges.pop();
            consumed.remove(receiver.identity());
            self.stats.backtracks += 1;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate, ForbiddenPair};

    fn people(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("p{}@example.com", i), format!("Person {}", i)))
            .collect()
    }

    fn pair(people: &[Participant], a: usize, b: usize) -> ForbiddenPair {
        ForbiddenPair::new(people[a].identity(), people[b].identity())
    }

    #[test]
    fn test_solve_unconstrained() {
        let p = people(5);
        let forbidden = ForbiddenPairs::empty();
        let set = Solver::new().solve(&p, &p, &forbidden).unwrap();

        assert_eq!(set.len(), 5);
        assert!(validate(&p, &forbidden, &set).is_valid);
    }

    #[test]
    fn test_solve_keeps_giver_order() {
        let p = people(4);
        let mut givers = p.clone();
        givers.reverse();

        let set = Solver::new().solve(&givers, &p, &ForbiddenPairs::empty()).unwrap();
        let order: Vec<&Participant> = set.iter().map(|a| &a.giver).collect();
        assert_eq!(order, givers.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_two_swaps_only_solution() {
        // Everything but the diagonals is forbidden: only 0<->2, 1<->3 remains
        let p = people(4);
        let forbidden = ForbiddenPairs::new(&[
            pair(&p, 0, 1),
            pair(&p, 1, 2),
            pair(&p, 2, 3),
            pair(&p, 3, 0),
        ]);

        let set = Solver::new().solve(&p, &p, &forbidden).unwrap();
        assert!(validate(&p, &forbidden, &set).is_valid);
        assert_eq!(set.receiver_of(p[0].identity()), Some(&p[2]));
        assert_eq!(set.receiver_of(p[2].identity()), Some(&p[0]));
        assert_eq!(set.receiver_of(p[1].identity()), Some(&p[3]));
        assert_eq!(set.receiver_of(p[3].identity()), Some(&p[1]));
    }

    #[test]
    fn test_three_with_one_pair_infeasible() {
        // Both 3-cycles use the forbidden edge in one direction or the other
        let p = people(3);
        let forbidden = ForbiddenPairs::new(&[pair(&p, 0, 1)]);

        let (result, stats) = Solver::new().solve_with_stats(&p, &p, &forbidden);
        assert!(result.is_none());
        assert!(stats.nodes > 0);
        assert_eq!(stats.nodes, stats.backtracks);
        assert!(!Solver::new().is_feasible(&p, &forbidden));
    }

    #[test]
    fn test_isolated_participant_infeasible() {
        // p0 is forbidden from everyone
        let p = people(5);
        let pairs: Vec<ForbiddenPair> = (1..5).map(|i| pair(&p, 0, i)).collect();
        let forbidden = ForbiddenPairs::new(&pairs);

        assert!(Solver::new().solve(&p, &p, &forbidden).is_none());
    }

    #[test]
    fn test_unmatchable_last_giver_fails_fast() {
        // Without the up-front check this walks every ordering of the first 11 givers
        let p = people(12);
        let pairs: Vec<ForbiddenPair> = (1..12).map(|i| pair(&p, 0, i)).collect();
        let forbidden = ForbiddenPairs::new(&pairs);
        let mut givers = p.clone();
        givers.rotate_left(1);

        let (result, stats) = Solver::new().solve_with_stats(&givers, &p, &forbidden);
        assert!(result.is_none());
        assert_eq!(stats, SolveStats::default());
    }

    #[test]
    fn test_unreachable_receiver_fails_fast() {
        // Everyone may receive except outsider, who is not among the givers
        let p = people(4);
        let outsider = Participant::new("outsider@example.com", "Outsider");
        let mut receivers = p.clone();
        receivers.push(outsider.clone());
        let pairs: Vec<ForbiddenPair> = p
            .iter()
            .map(|g| ForbiddenPair::new(g.identity(), outsider.identity()))
            .collect();
        let forbidden = ForbiddenPairs::new(&pairs);

        let (result, stats) = Solver::new().solve_with_stats(&p, &receivers, &forbidden);
        assert!(result.is_none());
        assert_eq!(stats.nodes, 0);
    }

    #[test]
    fn test_pair_of_two_infeasible() {
        let p = people(2);
        let forbidden = ForbiddenPairs::new(&[pair(&p, 0, 1)]);
        assert!(Solver::new().solve(&p, &p, &forbidden).is_none());
        assert!(Solver::new().is_feasible(&p, &ForbiddenPairs::empty()));
    }
}
