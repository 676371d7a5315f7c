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

use std::time::Duration;

/// Tuning knobs of one refinement run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Wall-clock budget of the run.
    pub time_budget: Duration,
    /// Simulated-annealing start temperature.
    pub initial_temperature: f64,
    /// Multiplicative temperature decay per iteration, in (0, 1).
    pub cooling_rate: f64,
    /// Every this many iterations a greedy drop-driver consolidation pass
    /// runs on the current solution.
    pub consolidation_period: u64,
    /// Stop after this many iterations without a new best.
    pub stagnation_limit: u64,
    /// Optional hard iteration cap, mainly for reproducible tests.
    pub max_iterations: Option<u64>,
    /// Seed of the run's single PRNG stream.
    pub seed: u64,
    /// Operator reward when the best-so-far was beaten.
    pub reward_improved: f64,
    /// Operator reward for an accepted move that is not a new best.
    pub reward_accepted: f64,
    /// Smoothing factor of the adaptive operator weights.
    pub reward_smoothing: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(600),
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            consolidation_period: 50,
            stagnation_limit: 1000,
            max_iterations: None,
            seed: 0,
            reward_improved: 1.0,
            reward_accepted: 0.4,
            reward_smoothing: 0.1,
        }
    }
}

impl SearchParams {
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    #[inline]
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
}
