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
use crate::engine::params::SearchParams;
use crate::engine::search::{LnsRefiner, SearchOutcome};
use roster_model::problem::prob::Problem;
use roster_model::solution::roster::Roster;
use std::sync::atomic::AtomicBool;

/// Runs one independent refinement per seed, each on its own OS thread with
/// its own roster copy, sharing only the read-only problem and conflict
/// sets. The winner is the lowest (driver count, total minutes) cost; the
/// seed id breaks exact ties so the selection is deterministic.
pub fn refine_multistart(
    problem: &Problem,
    conflicts: &ConflictSets,
    initial: &Roster,
    params: &SearchParams,
    seeds: &[u64],
    cancel: Option<&AtomicBool>,
) -> Option<(u64, SearchOutcome)> {
    let mut runs: Vec<(u64, SearchOutcome)> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let run_params = params.clone().with_seed(seed);
                let run_initial = initial.clone();
                scope.spawn(move || {
                    let refiner = LnsRefiner::new(run_params);
                    (
                        seed,
                        refiner.refine(problem, conflicts, run_initial, cancel),
                    )
                })
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|handle| match handle.join() {
                Ok((seed, Ok(outcome))) => Some((seed, outcome)),
                Ok((seed, Err(err))) => {
                    tracing::error!(seed, %err, "multi-start run failed");
                    None
                }
                Err(_) => None,
            })
            .collect()
    });

    runs.sort_by_key(|(seed, outcome)| (outcome.cost, *seed));
    runs.into_iter().next()
}
