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

use roster_core::math::ewma::Ewma;

/// Adaptive bookkeeping of one destroy operator: raw counters plus the
/// smoothed roulette weight.
///
/// The weight starts at 1.0 for every operator and blends in the observed
/// reward after each attempt, so a streak of rejections starves an operator
/// and a streak of improvements feeds it.
#[derive(Debug, Clone)]
pub struct OperatorStats {
    attempts: u64,
    accepts: u64,
    improvements: u64,
    weight: Ewma<f64>,
}

impl OperatorStats {
    pub fn new(smoothing: f64) -> Self {
        let alpha = if smoothing.is_finite() {
            smoothing.clamp(1e-6, 1.0)
        } else {
            0.1
        };
        Self {
            attempts: 0,
            accepts: 0,
            improvements: 0,
            weight: Ewma::with_initial(alpha, 1.0).expect("sanitized alpha is valid"),
        }
    }

    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[inline]
    pub fn accepts(&self) -> u64 {
        self.accepts
    }

    #[inline]
    pub fn improvements(&self) -> u64 {
        self.improvements
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight.value_or(1.0)
    }

    /// Records one attempt and its reward.
    pub fn record(&mut self, reward: f64, accepted: bool, improved: bool) {
        self.attempts += 1;
        if accepted {
            self.accepts += 1;
        }
        if improved {
            self.improvements += 1;
        }
        self.weight.observe(reward);
    }

    #[inline]
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepts as f64 / self.attempts as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_weight_is_one() {
        let stats = OperatorStats::new(0.1);
        assert_eq!(stats.weight(), 1.0);
        assert_eq!(stats.attempts(), 0);
    }

    #[test]
    fn test_rejection_starves_weight() {
        let mut stats = OperatorStats::new(0.1);
        stats.record(0.0, false, false);
        assert!((stats.weight() - 0.9).abs() < 1e-12);
        assert_eq!(stats.attempts(), 1);
        assert_eq!(stats.accepts(), 0);
    }

    #[test]
    fn test_improvement_feeds_weight() {
        let mut stats = OperatorStats::new(0.1);
        stats.record(0.0, false, false);
        let starved = stats.weight();
        stats.record(1.0, true, true);
        assert!(stats.weight() > starved);
        assert_eq!(stats.accepts(), 1);
        assert_eq!(stats.improvements(), 1);
    }

    #[test]
    fn test_acceptance_ratio() {
        let mut stats = OperatorStats::new(0.1);
        assert_eq!(stats.acceptance_ratio(), 0.0);
        stats.record(0.4, true, false);
        stats.record(0.0, false, false);
        assert!((stats.acceptance_ratio() - 0.5).abs() < 1e-12);
    }
}
