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
use crate::err::UnreachableShiftError;
use crate::state::SolverState;
use roster_model::problem::prob::Problem;

/// Builds an initial feasible roster by walking the month day by day.
///
/// Per date, shifts are taken in ascending start order; each goes to the
/// first existing driver that can legally host it, scanning drivers in
/// creation order, or to a fresh driver whose cycle starts that day. The
/// cycle length comes from the problem's regime rules. Fully deterministic:
/// replaying the same problem yields an identical roster.
pub fn build_initial<'p>(
    problem: &'p Problem,
    conflicts: &'p ConflictSets,
) -> Result<SolverState<'p>, UnreachableShiftError> {
    let mut state = SolverState::new(problem, conflicts);

    for date in problem.dates() {
        for &shift in problem.shifts_on(date) {
            state.repair(shift)?;
        }
    }

    tracing::info!(
        drivers = state.driver_count(),
        shifts = problem.len(),
        cycle = %problem.rules().cycle(),
        "greedy construction complete"
    );
    Ok(state)
}
