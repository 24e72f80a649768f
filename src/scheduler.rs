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

use crate::aggregator::ResultStore;
use crate::control::{ControlPanel, JobKey, Notification};
use crate::error::SimulationError;
use crate::world::World;
use crate::yield_run::YieldRun;
use calendar::Date;

/// The states of a [`SimulationJob`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Nothing is running
    Idle,
    /// Taking the snapshots and allocating memory
    Initializing,
    /// Advancing one sample per pump
    Stepping,
    /// Holding the partial results and the clock
    Paused,
    /// Scaling and publishing the results
    Finishing,
    /// Cancelled before finishing
    Aborted,
}

/// A simulation being driven by the [`Scheduler`]
pub struct SimulationJob {
    key: JobKey,
    state: JobState,
    run: YieldRun,
    saved_date: Date,
}

impl SimulationJob {
    /// What is being simulated
    pub fn key(&self) -> JobKey {
        self.key
    }

    /// The current state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// The number of steps taken so far
    pub fn steps(&self) -> usize {
        self.run.steps()
    }
}

enum Outcome {
    Continue,
    Abort,
    Finish,
}

/// Drives simulations one step at a time.
///
/// The host calls [`Scheduler::pump`] once per frame (or in a loop). Each call
/// reacts to the flags of the [`ControlPanel`] and advances the active job
/// by one sample, so the host can re-draw moving elements between steps.
/// Only one job is active at a time, as they all write the date of the [`World`].
#[derive(Default)]
pub struct Scheduler {
    active: Option<SimulationJob>,
}

impl Scheduler {
    /// Creates an idle scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// The job being run, if any
    pub fn active(&self) -> Option<&SimulationJob> {
        self.active.as_ref()
    }

    /// Checks whether no job is running
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// The state of a job
    pub fn state(&self, key: JobKey) -> JobState {
        match &self.active {
            Some(job) if job.key == key => job.state,
            _ => JobState::Idle,
        }
    }

    /// Initializes a job, which will start stepping at the next pump.
    ///
    /// The pump only steps jobs whose run flag is raised in the
    /// [`ControlPanel`], so callers starting a job directly must also call
    /// [`ControlPanel::start`] with the same key. Otherwise the job is
    /// aborted at the next pump. Raising the flag alone is enough: the
    /// pump starts requested jobs by itself.
    pub fn start(&mut self, key: JobKey, world: &mut World) -> Result<(), SimulationError> {
        if let Some(job) = &self.active {
            return Err(SimulationError::Busy {
                requested: key,
                running: job.key,
            });
        }
        let saved_date = world.date;
        let run = YieldRun::new(world, key)?;
        world.date = run.date();
        self.active = Some(SimulationJob {
            key,
            state: JobState::Initializing,
            run,
            saved_date,
        });
        Ok(())
    }

    /// Reacts to the flags of the panel and advances the active job by one step
    pub fn pump(
        &mut self,
        world: &mut World,
        panel: &mut ControlPanel,
        store: &mut dyn ResultStore,
    ) -> Vec<Notification> {
        let mut notifications = Vec::new();

        let outcome = match self.active.as_mut() {
            None => Outcome::Continue,
            Some(job) => {
                if !panel.is_running(job.key) {
                    Outcome::Abort
                } else if panel.is_paused(job.key) {
                    if job.state != JobState::Paused {
                        tracing::debug!(job = %job.key, "paused");
                    }
                    job.state = JobState::Paused;
                    Outcome::Continue
                } else {
                    job.state = JobState::Stepping;
                    if job.run.step(world) {
                        Outcome::Finish
                    } else {
                        world.date = job.run.date();
                        Outcome::Continue
                    }
                }
            }
        };

        match outcome {
            Outcome::Continue => {}
            Outcome::Abort => {
                if let Some(mut job) = self.active.take() {
                    job.state = JobState::Aborted;
                    world.date = job.saved_date;
                    tracing::info!(job = %job.key, steps = job.steps(), "aborted simulation");
                    notifications.push(Notification::Aborted(job.key));
                }
            }
            Outcome::Finish => {
                if let Some(mut job) = self.active.take() {
                    job.state = JobState::Finishing;
                    world.date = job.saved_date;
                    let key = job.key;
                    let steps = job.steps();
                    let report = job.run.finish(world);
                    store.publish(report);
                    panel.mark_finished(key);
                    tracing::info!(job = %key, steps, "finished simulation");
                    notifications.push(Notification::Completed(key));
                }
            }
        }

        for key in panel.requested() {
            if self.active.as_ref().map(|j| j.key) == Some(key) {
                continue;
            }
            match self.start(key, world) {
                Ok(()) => notifications.push(Notification::Started(key)),
                Err(e) => {
                    tracing::warn!(job = %key, "{}", e);
                    panel.clear(key);
                    notifications.push(Notification::Refused {
                        key,
                        reason: e.to_string(),
                    });
                }
            }
        }

        notifications
    }
}
