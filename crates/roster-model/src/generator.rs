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

use crate::problem::shift::ServiceType;
use crate::problem::spec::{Frequency, ServiceRecord, ShiftSpec};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use roster_core::prelude::{MinuteOfDay, Minutes};

/// Configuration of the synthetic instance generator used by tests and the
/// demonstration binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceGenConfig {
    pub services: usize,
    pub shifts_per_service: usize,
    pub vehicles_min: u16,
    pub vehicles_max: u16,
    pub earliest_start: MinuteOfDay,
    pub latest_start: MinuteOfDay,
    pub duration_min: Minutes,
    pub duration_max: Minutes,
    pub seed: u64,
}

impl Default for InstanceGenConfig {
    fn default() -> Self {
        Self {
            services: 4,
            shifts_per_service: 2,
            vehicles_min: 1,
            vehicles_max: 2,
            earliest_start: MinuteOfDay::new(5 * 60),
            latest_start: MinuteOfDay::new(15 * 60),
            duration_min: Minutes::from_hours(6),
            duration_max: Minutes::from_hours(10),
            seed: 0,
        }
    }
}

/// Produces daily-frequency template services, deterministic under the seed.
pub struct InstanceGenerator {
    config: InstanceGenConfig,
    rng: SmallRng,
}

impl InstanceGenerator {
    pub fn new(config: InstanceGenConfig) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn config(&self) -> &InstanceGenConfig {
        &self.config
    }

    /// Generates the full set of service records for one instance.
    pub fn services(&mut self) -> Vec<ServiceRecord> {
        (0..self.config.services)
            .map(|i| self.service(i))
            .collect()
    }

    fn service(&mut self, index: usize) -> ServiceRecord {
        let vehicles = self
            .rng
            .random_range(self.config.vehicles_min..=self.config.vehicles_max.max(self.config.vehicles_min));
        let specs = (0..self.config.shifts_per_service)
            .map(|n| {
                ShiftSpec::template(
                    (n + 1) as u16,
                    self.sample_start(),
                    self.sample_duration(),
                )
            })
            .collect();
        ServiceRecord::new(
            format!("SVC-{:02}", index + 1),
            Some(format!("G{}", index % 2 + 1)),
            ServiceType::Industrial,
            vehicles,
            Frequency::daily(),
            specs,
        )
    }

    // Starts snap to a 15-minute grid.
    fn sample_start(&mut self) -> MinuteOfDay {
        let lo = self.config.earliest_start.value() / 15;
        let hi = (self.config.latest_start.value() / 15).max(lo);
        MinuteOfDay::new(self.rng.random_range(lo..=hi) * 15)
    }

    // Durations snap to a 30-minute grid.
    fn sample_duration(&mut self) -> Minutes {
        let lo = self.config.duration_min.value() / 30;
        let hi = (self.config.duration_max.value() / 30).max(lo);
        Minutes::new(self.rng.random_range(lo..=hi) * 30)
    }
}
