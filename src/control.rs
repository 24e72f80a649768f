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

use model::CollectorFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// The time resolution of a simulation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    /// One value per hour of a single day
    Daily,
    /// One value per sampled day of the year
    Yearly,
}

impl Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(format!(
                "Unknown granularity '{}'... expecting 'daily' or 'yearly'",
                s
            )),
        }
    }
}

/// Identifies a simulation: which family of collectors, and at what
/// time resolution
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    /// The family of collectors being simulated
    pub family: CollectorFamily,
    /// The time resolution
    pub granularity: Granularity,
}

impl JobKey {
    /// Builds a new key
    pub fn new(family: CollectorFamily, granularity: Granularity) -> Self {
        Self {
            family,
            granularity,
        }
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} simulation", self.granularity, self.family)
    }
}

/// The flags controlling a job
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ControlFlags {
    /// The job should be running
    pub run: bool,
    /// The job should not advance
    pub pause: bool,
    /// The last run of this job finished and published its results
    pub results_ready: bool,
}

/// Something that happened to a job, reported by the [`Scheduler`](crate::Scheduler)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The job was initialized and will start stepping
    Started(JobKey),
    /// The job finished and its results were published
    Completed(JobKey),
    /// The job was cancelled before finishing. Nothing was published.
    Aborted(JobKey),
    /// The job could not be started
    Refused {
        /// The job
        key: JobKey,
        /// Why it was refused
        reason: String,
    },
}

/// The control surface shared by the host and the [`Scheduler`](crate::Scheduler).
///
/// The host raises and clears flags; the scheduler only reacts to
/// them between steps.
#[derive(Debug, Default, Clone)]
pub struct ControlPanel {
    flags: BTreeMap<JobKey, ControlFlags>,
}

impl ControlPanel {
    /// Creates an empty panel
    pub fn new() -> Self {
        Self::default()
    }

    /// The flags of a job
    pub fn flags(&self, key: JobKey) -> ControlFlags {
        self.flags.get(&key).copied().unwrap_or_default()
    }

    fn flags_mut(&mut self, key: JobKey) -> &mut ControlFlags {
        self.flags.entry(key).or_default()
    }

    /// Requests a job to run
    pub fn start(&mut self, key: JobKey) {
        let f = self.flags_mut(key);
        f.run = true;
        f.pause = false;
        f.results_ready = false;
    }

    /// Requests a job to stop. If it had not finished, it is aborted.
    pub fn cancel(&mut self, key: JobKey) {
        self.flags_mut(key).run = false;
    }

    /// Requests a job to hold at the next step boundary
    pub fn pause(&mut self, key: JobKey) {
        self.flags_mut(key).pause = true;
    }

    /// Lets a paused job continue
    pub fn resume(&mut self, key: JobKey) {
        self.flags_mut(key).pause = false;
    }

    /// Whether the job is meant to be running
    pub fn is_running(&self, key: JobKey) -> bool {
        self.flags(key).run
    }

    /// Whether the job is meant to be paused
    pub fn is_paused(&self, key: JobKey) -> bool {
        self.flags(key).pause
    }

    /// Whether the job finished and published its results
    pub fn results_ready(&self, key: JobKey) -> bool {
        self.flags(key).results_ready
    }

    /// The jobs whose run flag is raised
    pub fn requested(&self) -> Vec<JobKey> {
        self.flags
            .iter()
            .filter(|(_, f)| f.run)
            .map(|(k, _)| *k)
            .collect()
    }

    pub(crate) fn mark_finished(&mut self, key: JobKey) {
        let f = self.flags_mut(key);
        f.run = false;
        f.pause = false;
        f.results_ready = true;
    }

    pub(crate) fn clear(&mut self, key: JobKey) {
        let f = self.flags_mut(key);
        f.run = false;
        f.pause = false;
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Granularity::from_str("Daily"), Ok(Granularity::Daily));
        assert_eq!(Granularity::from_str("yearly"), Ok(Granularity::Yearly));
        assert!(Granularity::from_str("weekly").is_err());
    }

    #[test]
    fn test_flags() {
        let key = JobKey::new(CollectorFamily::Heliostat, Granularity::Daily);
        let other = JobKey::new(CollectorFamily::Heliostat, Granularity::Yearly);
        let mut panel = ControlPanel::new();
        assert_eq!(panel.flags(key), ControlFlags::default());

        panel.start(key);
        assert!(panel.is_running(key));
        assert!(!panel.is_running(other));
        assert_eq!(panel.requested(), vec![key]);

        panel.pause(key);
        assert!(panel.is_paused(key));
        panel.resume(key);
        assert!(!panel.is_paused(key));

        panel.mark_finished(key);
        assert!(!panel.is_running(key));
        assert!(panel.results_ready(key));
        assert!(panel.requested().is_empty());

        // starting again clears the results flag
        panel.start(key);
        assert!(!panel.results_ready(key));
        panel.cancel(key);
        assert!(!panel.is_running(key));
    }
}
