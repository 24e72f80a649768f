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
use crate::clock::{hour_bucket, sampled_days, SimulatedClock};
use crate::collectors::{calculator, StepContext, YieldCalculator};
use crate::control::{Granularity, JobKey};
use crate::error::SimulationError;
use crate::output::OutputSeries;
use crate::sampler::SampleGrid;
use crate::world::{Placement, World};
use crate::Float;
use calendar::Date;
use geometry::Vector3D;
use model::CollectorFamily;
use rendering::OcclusionTester;
use solar::{RadiationModel, Solar, SunMinutes};
use std::sync::Arc;

/// Days shorter than this (in minutes) receive no direct radiation
pub const MIN_DAYLIGHT: Float = 1e-6;

/// An element being simulated
#[derive(Debug, Clone)]
pub(crate) struct ElementSlot {
    /// The index of the element within the collectors of the model
    pub index: usize,
    /// The id of the element
    pub id: String,
    /// Where it is. `None` if it cannot be placed.
    placement: Option<Placement>,
    self_owner: Option<usize>,
    target_owner: Option<usize>,
}

/// Evaluates the irradiance over the elements of a family at
/// certain instants
pub(crate) struct Evaluator {
    calculator: &'static dyn YieldCalculator,
    radiation: Arc<dyn RadiationModel>,
    solar: Solar,
    tester: OcclusionTester,
    elements: Vec<ElementSlot>,
    diagnostics: Vec<String>,
    refresh: bool,
}

impl Evaluator {
    /// Takes the snapshot of the shadow casters and places the elements
    /// of `family`. Elements that cannot be placed are reported once and skipped.
    pub fn new(world: &World, family: CollectorFamily, first_day: usize) -> Self {
        let solar = world.solar();
        let sun = solar.sun_direction(first_day, crate::clock::NOON);
        let tester = OcclusionTester::snapshot(&world.scene(sun));

        let mut diagnostics = Vec::new();
        let elements = world
            .model
            .collectors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.family() == family)
            .map(|(index, c)| {
                let placement = match world.placement(c) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        let msg = format!("{}... skipping it", e);
                        tracing::warn!("{}", msg);
                        diagnostics.push(msg);
                        None
                    }
                };
                let target_owner = placement
                    .as_ref()
                    .and_then(|p| p.receiver.as_ref())
                    .and_then(|r| tester.owner_of(&r.foundation));
                ElementSlot {
                    index,
                    id: c.id.clone(),
                    placement,
                    self_owner: tester.owner_of(&c.id),
                    target_owner,
                }
            })
            .collect();

        Self {
            calculator: calculator(family),
            radiation: Arc::clone(&world.radiation),
            solar,
            tester,
            elements,
            diagnostics,
            refresh: world.has_moving_elements(),
        }
    }

    pub fn elements(&self) -> &[ElementSlot] {
        &self.elements
    }

    /// The index within the collectors of the model, and the id, of each element
    pub fn element_ids(&self) -> Vec<(usize, String)> {
        self.elements
            .iter()
            .map(|e| (e.index, e.id.clone()))
            .collect()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Allocates one sample grid per element
    pub fn allocate_memory(&self, world: &World) -> Vec<SampleGrid> {
        let cell_size = world.model.options.cell_size;
        self.elements
            .iter()
            .map(|e| {
                self.calculator
                    .allocate_memory(&world.model.collectors[e.index], cell_size)
            })
            .collect()
    }

    /// Sunrise and sunset of a day
    pub fn sun_minutes(&self, day: usize) -> SunMinutes {
        self.solar.sunrise_sunset(day)
    }

    /// Adds the irradiance collected by each element at `minute` of `day`
    /// into the corresponding hour of `daily`. The geometry of moving
    /// elements is refreshed first.
    pub fn evaluate(
        &mut self,
        world: &World,
        day: usize,
        minute: Float,
        memory: &mut [SampleGrid],
        daily: &mut [OutputSeries],
    ) {
        let sun = self.solar.sun_direction(day, minute);
        if sun.z <= 0. {
            return;
        }
        if self.refresh {
            self.tester.refresh(&world.scene(sun));
        }
        self.accumulate(world, day, minute, sun, memory, daily)
    }

    fn accumulate(
        &self,
        world: &World,
        day: usize,
        minute: Float,
        sun: Vector3D,
        memory: &mut [SampleGrid],
        daily: &mut [OutputSeries],
    ) {
        let options = &world.model.options;
        let sky = self
            .radiation
            .sky_state(sun, day, world.elevation(), options.air_mass);
        let hour = hour_bucket(minute);
        for (i, slot) in self.elements.iter().enumerate() {
            let placement = match &slot.placement {
                Some(p) => p,
                None => continue,
            };
            let ctx = StepContext {
                sky,
                albedo: world.model.site_details.ground_albedo,
                radiation: self.radiation.as_ref(),
                tester: &self.tester,
                self_owner: slot.self_owner,
                target_owner: slot.target_owner,
            };
            let element = &world.model.collectors[slot.index];
            let v = self
                .calculator
                .yield_contribution(&ctx, element, placement, &mut memory[i]);
            daily[i].add(hour, v);
        }
    }

    /// Simulates a whole day at once. Only valid for scenes in which
    /// nothing moves.
    pub fn simulate_day(&self, world: &World, day: usize) -> Vec<OutputSeries> {
        let mut memory = self.allocate_memory(world);
        let mut daily =
            vec![OutputSeries::new(Granularity::Daily, 0); self.elements.len()];
        let sun_minutes = self.sun_minutes(day);
        if sun_minutes.daylight() <= MIN_DAYLIGHT {
            return daily;
        }
        let mut clock = SimulatedClock::new(day, world.model.options.interval_minutes);
        clock.start_day(day, sun_minutes);
        while !clock.day_is_over(sun_minutes) {
            let minute = clock.minute();
            let sun = self.solar.sun_direction(day, minute);
            if sun.z > 0. {
                self.accumulate(world, day, minute, sun, &mut memory, &mut daily);
            }
            clock.advance();
        }
        daily
    }
}

/// The data of a running simulation: the clock, the shadow snapshot, the
/// sample grids and the raw series.
pub struct YieldRun {
    key: JobKey,
    evaluator: Evaluator,
    memory: Vec<SampleGrid>,
    days: Vec<usize>,
    day_index: usize,
    sun_minutes: SunMinutes,
    clock: SimulatedClock,
    daily: Vec<OutputSeries>,
    raw: Vec<OutputSeries>,
    steps: usize,
}

impl YieldRun {
    /// Initializes a run. Daily runs simulate the day of the world's date;
    /// yearly runs simulate the sampled days.
    pub fn new(world: &World, key: JobKey) -> Result<Self, SimulationError> {
        world.model.options.validate()?;
        let days = match key.granularity {
            Granularity::Daily => vec![world.date.ordinal()],
            Granularity::Yearly => sampled_days(world.model.options.days_per_year),
        };
        let evaluator = Evaluator::new(world, key.family, days[0]);
        let memory = evaluator.allocate_memory(world);
        let n = evaluator.elements().len();
        let interval = world.model.options.interval_minutes;
        let mut ret = Self {
            key,
            memory,
            daily: vec![OutputSeries::new(Granularity::Daily, 0); n],
            raw: vec![OutputSeries::new(key.granularity, days.len()); n],
            clock: SimulatedClock::new(days[0], interval),
            sun_minutes: SunMinutes::degenerate(),
            days,
            day_index: 0,
            evaluator,
            steps: 0,
        };
        ret.start_day();
        tracing::info!(
            job = %key,
            n_elements = n,
            n_days = ret.days.len(),
            n_casters = ret.evaluator.tester.n_casters(),
            "initialized simulation"
        );
        Ok(ret)
    }

    /// Moves to the first sample of the current day, skipping
    /// days without daylight
    fn start_day(&mut self) {
        while let Some(&day) = self.days.get(self.day_index) {
            self.sun_minutes = self.evaluator.sun_minutes(day);
            if self.sun_minutes.daylight() > MIN_DAYLIGHT {
                self.clock.start_day(day, self.sun_minutes);
                self.daily.iter_mut().for_each(|s| s.reset());
                return;
            }
            tracing::debug!(day, "no daylight");
            self.day_index += 1;
        }
    }

    fn close_day(&mut self) {
        for (raw, daily) in self.raw.iter_mut().zip(self.daily.iter()) {
            match self.key.granularity {
                Granularity::Daily => {
                    for (hour, v) in daily.values().iter().enumerate() {
                        raw.set(hour, *v);
                    }
                }
                Granularity::Yearly => raw.set(self.day_index, daily.sum()),
            }
        }
        if self.key.granularity == Granularity::Yearly {
            tracing::info!(
                job = %self.key,
                "simulated day {} of {}",
                self.day_index + 1,
                self.days.len()
            );
        }
        self.day_index += 1;
        self.start_day();
    }

    /// The job this run belongs to
    pub fn key(&self) -> JobKey {
        self.key
    }

    /// Checks whether all the days have been simulated
    pub fn is_done(&self) -> bool {
        self.day_index >= self.days.len()
    }

    /// The number of steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The date of the current sample
    pub fn date(&self) -> Date {
        self.clock.date()
    }

    /// Evaluates the current sample and advances the clock. Returns
    /// whether the run is done.
    pub fn step(&mut self, world: &World) -> bool {
        if self.is_done() {
            return true;
        }
        let day = self.days[self.day_index];
        self.evaluator.evaluate(
            world,
            day,
            self.clock.minute(),
            &mut self.memory,
            &mut self.daily,
        );
        self.steps += 1;
        self.clock.advance();
        if self.clock.day_is_over(self.sun_minutes) {
            self.close_day();
        }
        self.is_done()
    }

    /// Scales the raw series and builds the report
    pub fn finish(self, world: &World) -> YieldReport {
        YieldAggregator::aggregate(
            world,
            self.key,
            &self.days,
            self.evaluator.element_ids(),
            self.raw,
            self.evaluator.diagnostics().to_vec(),
        )
    }

    /// Runs the whole simulation without stopping
    pub fn run_to_end(mut self, world: &World) -> YieldReport {
        while !self.step(world) {}
        self.finish(world)
    }

    pub(crate) fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub(crate) fn days(&self) -> &[usize] {
        &self.days
    }
}
