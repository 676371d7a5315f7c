// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::conflict::ConflictSets;
use crate::engine::operators::{self, OperatorKind};
use crate::engine::params::SearchParams;
use crate::engine::stats::OperatorStats;
use crate::err::NotFreeError;
use crate::state::SolverState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roster_model::problem::prob::Problem;
use roster_model::solution::roster::{Roster, RosterCost};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Final per-operator telemetry of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorReport {
    pub name: &'static str,
    pub attempts: u64,
    pub accepts: u64,
    pub improvements: u64,
    pub weight: f64,
}

/// The result of one refinement run: the best roster seen, and how the run
/// ended. A run cut short by the budget or the caller's flag still returns a
/// fully feasible best-so-far.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub roster: Roster,
    pub cost: RosterCost,
    pub iterations: u64,
    pub cancelled: bool,
    pub budget_exhausted: bool,
    pub operators: Vec<OperatorReport>,
}

/// Large Neighborhood Search with adaptive operator selection and simulated
/// annealing over the roster's driver count.
///
/// All randomness of a run is drawn from one ChaCha stream seeded by
/// `params.seed`, so two runs with equal seed, input and iteration cap are
/// identical.
#[derive(Debug, Clone)]
pub struct LnsRefiner {
    params: SearchParams,
}

impl LnsRefiner {
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn refine(
        &self,
        problem: &Problem,
        conflicts: &ConflictSets,
        initial: Roster,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchOutcome, NotFreeError> {
        let start = Instant::now();
        let deadline = start + self.params.time_budget;
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);

        let mut state = SolverState::from_roster(problem, conflicts, initial)?;
        let mut best = state.roster().clone();
        let mut best_cost = best.cost();

        let mut stats: Vec<OperatorStats> = OperatorKind::ALL
            .iter()
            .map(|_| OperatorStats::new(self.params.reward_smoothing))
            .collect();

        let mut temperature = self.params.initial_temperature;
        let mut iterations: u64 = 0;
        let mut stagnation: u64 = 0;
        let mut cancelled = false;
        let mut budget_exhausted = false;

        tracing::info!(
            drivers = best_cost.drivers(),
            seed = self.params.seed,
            "starting refinement"
        );

        while !problem.is_empty() {
            if let Some(flag) = cancel
                && flag.load(Ordering::Relaxed)
            {
                cancelled = true;
                break;
            }
            if Instant::now() >= deadline {
                budget_exhausted = true;
                break;
            }
            if let Some(cap) = self.params.max_iterations
                && iterations >= cap
            {
                break;
            }
            if stagnation >= self.params.stagnation_limit {
                break;
            }
            iterations += 1;

            let op_idx = roulette(&stats, &mut rng);
            let kind = OperatorKind::ALL[op_idx];

            let mut candidate = state.clone();
            let produced = operators::apply(kind, &mut candidate, &mut rng).is_some();

            let mut accepted = false;
            let mut improved_best = false;
            if produced {
                let current_cost = state.cost();
                let candidate_cost = candidate.cost();
                accepted = if candidate_cost < current_cost {
                    true
                } else {
                    let delta =
                        candidate_cost.drivers() as f64 - current_cost.drivers() as f64;
                    temperature > 0.0 && rng.random::<f64>() < (-delta / temperature).exp()
                };

                if accepted {
                    state = candidate;
                    let cost = state.cost();
                    if cost < best_cost {
                        best = state.roster().clone();
                        best_cost = cost;
                        improved_best = true;
                        tracing::info!(
                            iteration = iterations,
                            drivers = cost.drivers(),
                            operator = %kind,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "new best roster"
                        );
                    }
                }
            }

            let reward = if improved_best {
                self.params.reward_improved
            } else if accepted {
                self.params.reward_accepted
            } else {
                0.0
            };
            stats[op_idx].record(reward, accepted, improved_best);

            if improved_best {
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            temperature *= self.params.cooling_rate;

            if self.params.consolidation_period > 0
                && iterations % self.params.consolidation_period == 0
                && consolidate(&mut state, &mut rng)
            {
                tracing::debug!(
                    iteration = iterations,
                    drivers = state.driver_count(),
                    "consolidation shrank the current roster"
                );
                let cost = state.cost();
                if cost < best_cost {
                    best = state.roster().clone();
                    best_cost = cost;
                    stagnation = 0;
                }
            }
        }

        tracing::info!(
            iterations,
            drivers = best_cost.drivers(),
            cancelled,
            budget_exhausted,
            "refinement finished"
        );

        Ok(SearchOutcome {
            roster: best,
            cost: best_cost,
            iterations,
            cancelled,
            budget_exhausted,
            operators: OperatorKind::ALL
                .iter()
                .zip(&stats)
                .map(|(kind, s)| OperatorReport {
                    name: kind.name(),
                    attempts: s.attempts(),
                    accepts: s.accepts(),
                    improvements: s.improvements(),
                    weight: s.weight(),
                })
                .collect(),
        })
    }
}

/// Roulette-wheel pick over the smoothed operator weights.
fn roulette(stats: &[OperatorStats], rng: &mut ChaCha8Rng) -> usize {
    let weights: Vec<f64> = stats.iter().map(|s| s.weight().max(1e-9)).collect();
    let total: f64 = weights.iter().sum();
    let mut r = rng.random::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        r -= w;
        if r <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}

/// Greedy fleet consolidation: keep dropping the least-loaded driver while
/// each drop strictly shrinks the fleet.
fn consolidate(state: &mut SolverState<'_>, rng: &mut ChaCha8Rng) -> bool {
    let mut improved = false;
    loop {
        let mut candidate = state.clone();
        if operators::apply(OperatorKind::DropDriver, &mut candidate, rng).is_some() {
            *state = candidate;
            improved = true;
        } else {
            return improved;
        }
    }
}
