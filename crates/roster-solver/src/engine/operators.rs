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

use crate::state::SolverState;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use roster_model::common::ShiftId;
use std::cmp::Reverse;

/// The destroy operators of the neighborhood search. Each dissolves part of
/// the current roster and rebuilds it through repair; an operator either
/// leaves the state fully feasible or signals failure so the caller can
/// discard the speculative copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Remove the least-loaded driver and spread its shifts elsewhere.
    DropDriver,
    /// Dissolve all assignments inside a random 3-4 day window.
    DestroyWindow,
    /// Dissolve all assignments of one random service.
    DestroyService,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 3] = [
        OperatorKind::DropDriver,
        OperatorKind::DestroyWindow,
        OperatorKind::DestroyService,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::DropDriver => "drop-driver",
            OperatorKind::DestroyWindow => "destroy-window",
            OperatorKind::DestroyService => "destroy-service",
        }
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Applies one destroy-and-repair move in place. Returns `None` when the
/// operator could not produce a candidate (nothing to destroy, a repair
/// failure, or drop-driver failing to shrink the fleet); the caller then
/// rolls back by discarding the state copy.
pub fn apply(kind: OperatorKind, state: &mut SolverState<'_>, rng: &mut ChaCha8Rng) -> Option<()> {
    match kind {
        OperatorKind::DropDriver => drop_driver(state),
        OperatorKind::DestroyWindow => destroy_window(state, rng),
        OperatorKind::DestroyService => destroy_service(state, rng),
    }
}

/// Removes the least-loaded driver and reinserts its shifts, longest first.
/// Only kept when the fleet actually shrinks.
fn drop_driver(state: &mut SolverState<'_>) -> Option<()> {
    let victim = state.roster().least_loaded_driver()?;
    let before = state.driver_count();

    let mut freed = state.remove_driver(victim).ok()?;
    sort_by_difficulty(state, &mut freed);
    for shift in freed {
        state.repair(shift).ok()?;
    }
    state.remove_idle_drivers();

    if state.driver_count() < before { Some(()) } else { None }
}

/// Dissolves a random 3-4 day window and repairs it in difficulty order.
fn destroy_window(state: &mut SolverState<'_>, rng: &mut ChaCha8Rng) -> Option<()> {
    let dates: Vec<_> = state.problem().dates().collect();
    if dates.is_empty() {
        return None;
    }

    let window = (rng.random_range(3..=4usize)).min(dates.len());
    let start = rng.random_range(0..=dates.len() - window);
    let mut removed: Vec<ShiftId> = Vec::new();
    for &date in &dates[start..start + window] {
        for &shift in state.problem().shifts_on(date) {
            if state.unassign(shift).is_ok() {
                removed.push(shift);
            }
        }
    }
    if removed.is_empty() {
        return None;
    }

    repair_all(state, removed)
}

/// Dissolves every assignment of one random service and repairs.
fn destroy_service(state: &mut SolverState<'_>, rng: &mut ChaCha8Rng) -> Option<()> {
    let services = state.problem().services();
    if services.is_empty() {
        return None;
    }
    let target = services[rng.random_range(0..services.len())].to_owned();

    let mut removed: Vec<ShiftId> = Vec::new();
    for shift in state.problem().shifts() {
        if shift.service() == target && state.unassign(shift.id()).is_ok() {
            removed.push(shift.id());
        }
    }
    if removed.is_empty() {
        return None;
    }

    repair_all(state, removed)
}

fn repair_all(state: &mut SolverState<'_>, mut shifts: Vec<ShiftId>) -> Option<()> {
    sort_by_difficulty(state, &mut shifts);
    for shift in shifts {
        state.repair(shift).ok()?;
    }
    state.remove_idle_drivers();
    Some(())
}

/// Hardest first: longest duration, then largest conflict set; id keeps the
/// order total.
fn sort_by_difficulty(state: &SolverState<'_>, shifts: &mut [ShiftId]) {
    shifts.sort_by_key(|id| {
        (
            Reverse(state.problem().shift(*id).duration()),
            Reverse(state.conflicts().of(*id).len()),
            *id,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictSets;
    use crate::greedy::build_initial;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use roster_core::prelude::{MinuteOfDay, Minutes};
    use roster_model::problem::expand::expand_month;
    use roster_model::problem::prob::Problem;
    use roster_model::problem::regime::RegimeRules;
    use roster_model::problem::shift::ServiceType;
    use roster_model::problem::spec::{Frequency, ServiceRecord, ShiftSpec};
    use roster_model::validation::RosterValidator;

    fn month_problem() -> Problem {
        let rules = RegimeRules::mining_faena();
        let services: Vec<ServiceRecord> = [(360, 480), (900, 420), (600, 360)]
            .iter()
            .enumerate()
            .map(|(i, (start, duration))| {
                ServiceRecord::new(
                    format!("SVC-{}", i + 1),
                    None,
                    ServiceType::Industrial,
                    1,
                    Frequency::daily(),
                    vec![ShiftSpec::template(
                        1,
                        MinuteOfDay::new(*start),
                        Minutes::new(*duration),
                    )],
                )
            })
            .collect();
        let shifts = expand_month(2025, 2, &services, &rules).unwrap();
        Problem::new(shifts, rules).unwrap()
    }

    #[test]
    fn test_operators_preserve_feasibility() {
        let problem = month_problem();
        let conflicts = ConflictSets::build(&problem);
        let state = build_initial(&problem, &conflicts).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for kind in OperatorKind::ALL {
            let mut candidate = state.clone();
            if apply(kind, &mut candidate, &mut rng).is_some() {
                assert_eq!(candidate.roster().assigned_count(), problem.len());
                assert!(
                    RosterValidator::validate_all(&problem, candidate.roster()).is_ok(),
                    "{kind} left an infeasible roster"
                );
            }
        }
    }

    #[test]
    fn test_drop_driver_rejects_when_fleet_cannot_shrink() {
        // A single daily shift: two drivers are provably minimal, so
        // drop-driver must fail and leave the clone discarded.
        let rules = RegimeRules::mining_faena();
        let services = [ServiceRecord::new(
            "S1",
            None,
            ServiceType::Industrial,
            1,
            Frequency::daily(),
            vec![ShiftSpec::template(1, MinuteOfDay::new(360), Minutes::new(480))],
        )];
        let shifts = expand_month(2025, 2, &services, &rules).unwrap();
        let problem = Problem::new(shifts, rules).unwrap();
        let conflicts = ConflictSets::build(&problem);
        let state = build_initial(&problem, &conflicts).unwrap();
        assert_eq!(state.driver_count(), 2);

        let mut candidate = state.clone();
        assert!(drop_driver(&mut candidate).is_none());
    }

    #[test]
    fn test_drop_driver_removes_removable_driver() {
        // One driver carries a lone isolated evening shift that fits the
        // morning drivers' schedule; dropping it must succeed.
        let rules = RegimeRules::mining_faena();
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let shifts = vec![
            roster_model::problem::shift::Shift::new(
                roster_model::common::ShiftId::new(0),
                "S1",
                None,
                ServiceType::Industrial,
                1,
                0,
                date,
                MinuteOfDay::new(360),
                Minutes::new(480),
                &rules,
            )
            .unwrap(),
            roster_model::problem::shift::Shift::new(
                roster_model::common::ShiftId::new(1),
                "S2",
                None,
                ServiceType::Industrial,
                1,
                0,
                date,
                MinuteOfDay::new(1140),
                Minutes::new(240),
                &rules,
            )
            .unwrap(),
        ];
        let problem = Problem::new(shifts, rules).unwrap();
        let conflicts = ConflictSets::build(&problem);

        // Build a wasteful roster by hand: one driver per shift.
        let mut state = crate::state::SolverState::new(&problem, &conflicts);
        let d0 = state.spawn_driver(date);
        let d1 = state.spawn_driver(date);
        state.assign(roster_model::common::ShiftId::new(0), d0).unwrap();
        state.assign(roster_model::common::ShiftId::new(1), d1).unwrap();

        let mut candidate = state.clone();
        assert!(drop_driver(&mut candidate).is_some());
        assert_eq!(candidate.driver_count(), 1);
        assert!(RosterValidator::validate_all(&problem, candidate.roster()).is_ok());
    }

    #[test]
    fn test_destroy_window_roundtrip_keeps_coverage() {
        let problem = month_problem();
        let conflicts = ConflictSets::build(&problem);
        let state = build_initial(&problem, &conflicts).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut candidate = state.clone();
        assert!(destroy_window(&mut candidate, &mut rng).is_some());
        assert_eq!(candidate.roster().assigned_count(), problem.len());
        assert!(RosterValidator::validate_all(&problem, candidate.roster()).is_ok());
    }

    #[test]
    fn test_destroy_service_keeps_coverage() {
        let problem = month_problem();
        let conflicts = ConflictSets::build(&problem);
        let state = build_initial(&problem, &conflicts).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut candidate = state.clone();
        assert!(destroy_service(&mut candidate, &mut rng).is_some());
        assert_eq!(candidate.roster().assigned_count(), problem.len());
        assert!(RosterValidator::validate_all(&problem, candidate.roster()).is_ok());
    }

    #[test]
    fn test_rollback_by_discarding_clone_is_exact() {
        let problem = month_problem();
        let conflicts = ConflictSets::build(&problem);
        let state = build_initial(&problem, &conflicts).unwrap();
        let before = state.roster().clone();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut candidate = state.clone();
        let _ = destroy_window(&mut candidate, &mut rng);
        drop(candidate);

        assert_eq!(state.roster(), &before);
    }
}
