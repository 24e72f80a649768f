/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::aggregator::{YieldAggregator, YieldReport};
use crate::control::{Granularity, JobKey};
use crate::error::SimulationError;
use crate::output::OutputSeries;
use crate::world::World;
use crate::yield_run::YieldRun;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs a whole simulation in one call, sampling the same instants as
/// the [`Scheduler`](crate::Scheduler) does.
///
/// Elements are never re-oriented between samples, so this is refused when
/// anything in the world tracks the sun. The date of the world is not modified.
/// With the `parallel` feature, the days of yearly simulations are
/// simulated in parallel.
pub fn run_static(world: &World, key: JobKey) -> Result<YieldReport, SimulationError> {
    world.check_static()?;
    let run = YieldRun::new(world, key)?;
    match key.granularity {
        Granularity::Daily => Ok(run.run_to_end(world)),
        Granularity::Yearly => Ok(run_days(world, run)),
    }
}

fn run_days(world: &World, run: YieldRun) -> YieldReport {
    let evaluator = run.evaluator();
    let days = run.days();

    #[cfg(feature = "parallel")]
    let per_day: Vec<Vec<OutputSeries>> = days
        .par_iter()
        .map(|day| evaluator.simulate_day(world, *day))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_day: Vec<Vec<OutputSeries>> = days
        .iter()
        .map(|day| evaluator.simulate_day(world, *day))
        .collect();

    let ids = evaluator.element_ids();
    let mut raw = vec![OutputSeries::new(Granularity::Yearly, days.len()); ids.len()];
    for (slot, daily) in per_day.iter().enumerate() {
        for (series, day_values) in raw.iter_mut().zip(daily.iter()) {
            series.set(slot, day_values.sum());
        }
    }
    tracing::info!(job = %run.key(), n_days = days.len(), "finished static simulation");
    YieldAggregator::aggregate(
        world,
        run.key(),
        days,
        ids,
        raw,
        evaluator.diagnostics().to_vec(),
    )
}
