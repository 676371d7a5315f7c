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

use chrono::{DateTime, Utc};
use roster_model::generator::{InstanceGenConfig, InstanceGenerator};
use roster_model::problem::expand::expand_month;
use roster_model::problem::prob::Problem;
use roster_model::problem::regime::RegimeRules;
use roster_model::solution::summary::driver_summaries;
use roster_model::validation::RosterValidator;
use roster_solver::conflict::ConflictSets;
use roster_solver::engine::SearchParams;
use roster_solver::greedy::build_initial;
use roster_solver::multistart::refine_multistart;
use roster_solver::replicate::replicate_month;
use serde::Serialize;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const YEAR: i32 = 2025;
const SOURCE_MONTH: u32 = 2;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    shifts: usize,
    total_hours: f64,
    lower_bound_drivers: u32,
    greedy_drivers: usize,
    refined_drivers: usize,
    winning_seed: u64,
    refine_iterations: u64,
    replicated_months: usize,
    replication_gaps: usize,
}

fn month_problem(year: i32, month: u32, rules: RegimeRules) -> Result<Problem, Box<dyn Error>> {
    let mut generator = InstanceGenerator::new(InstanceGenConfig {
        seed: 2025,
        ..InstanceGenConfig::default()
    });
    let services = generator.services();
    let shifts = expand_month(year, month, &services, &rules)?;
    Ok(Problem::new(shifts, rules)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let rules = RegimeRules::mining_faena();

    let problem = month_problem(YEAR, SOURCE_MONTH, rules)?;
    tracing::info!(
        shifts = problem.len(),
        services = problem.services().len(),
        total_hours = problem.total_minutes().as_hours_f64(),
        "expanded source month"
    );

    let conflicts = ConflictSets::build(&problem);
    tracing::info!(average_degree = conflicts.average_degree(), "conflicts ready");

    let greedy = build_initial(&problem, &conflicts)?.into_roster();
    let greedy_drivers = greedy.driver_count();

    let params = SearchParams::default().with_time_budget(Duration::from_secs(30));
    let (winning_seed, outcome) =
        refine_multistart(&problem, &conflicts, &greedy, &params, &[1, 2, 3, 4], None)
            .ok_or("no refinement run finished")?;

    RosterValidator::validate_all(&problem, &outcome.roster)?;
    for report in &outcome.operators {
        tracing::info!(
            operator = report.name,
            attempts = report.attempts,
            accepts = report.accepts,
            improvements = report.improvements,
            weight = report.weight,
            "operator telemetry"
        );
    }
    for summary in driver_summaries(&problem, &outcome.roster) {
        tracing::debug!(
            driver = summary.driver_id,
            shifts = summary.total_shifts,
            days = summary.days_worked,
            utilization_pct = summary.utilization_pct,
            "driver load"
        );
    }

    let mut replicated_months = 0usize;
    let mut replication_gaps = 0usize;
    for month in 1..=12u32 {
        if month == SOURCE_MONTH {
            continue;
        }
        let target = month_problem(YEAR, month, rules)?;
        let replica = replicate_month(&problem, &outcome.roster, &target);
        replication_gaps += replica.gaps.len();
        if replica.gaps.is_empty() {
            RosterValidator::validate_all(&target, &replica.roster)?;
            replicated_months += 1;
        } else {
            tracing::warn!(month, gaps = replica.gaps.len(), "month needs re-optimization");
        }
    }

    let record = RunRecord {
        start_ts,
        end_ts: Utc::now(),
        runtime_ms: t0.elapsed().as_millis(),
        shifts: problem.len(),
        total_hours: problem.total_minutes().as_hours_f64(),
        lower_bound_drivers: problem.lower_bound_drivers(12),
        greedy_drivers,
        refined_drivers: outcome.cost.drivers(),
        winning_seed,
        refine_iterations: outcome.iterations,
        replicated_months,
        replication_gaps,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
