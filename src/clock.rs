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

use crate::Float;
use calendar::Date;
use solar::SunMinutes;

/// Solar noon, in minutes from midnight
pub const NOON: Float = 720.;

/// The hour (`0..24`) into which a sample taken at `minute` falls. Samples
/// in the second half of an hour roll into the next one.
pub fn hour_bucket(minute: Float) -> usize {
    let minute = minute.max(0.);
    let mut hour = (minute / 60.).floor() as usize;
    if minute % 60. >= 30. {
        hour += 1;
    }
    hour.min(23)
}

/// The (1-based) days of the year sampled by yearly simulations: `n` days
/// evenly spread over the year
pub fn sampled_days(n: usize) -> Vec<usize> {
    let offset = 365 / (2 * n.max(1));
    (0..n).map(|k| 365 * k / n + offset + 1).collect()
}

/// The logical time of a simulation job.
///
/// It is owned by the job that advances it, and samples times on a lattice
/// of `interval` minutes that is symmetric about solar noon
/// (i.e., `NOON ± (k + 1/2) interval`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimulatedClock {
    ordinal: usize,
    minute: Float,
    interval: Float,
}

impl SimulatedClock {
    /// Creates a clock at midnight of the (1-based) `ordinal` day
    pub fn new(ordinal: usize, interval: Float) -> Self {
        Self {
            ordinal,
            minute: 0.,
            interval,
        }
    }

    /// The latest time of the lattice that is at or before sunrise
    pub fn first_sample(sun: SunMinutes, interval: Float) -> Float {
        let k = ((sun.sunrise - NOON) / interval - 0.5).floor();
        NOON + (k + 0.5) * interval
    }

    /// Moves the clock to the first sample of a day
    pub fn start_day(&mut self, ordinal: usize, sun: SunMinutes) {
        self.ordinal = ordinal;
        self.minute = Self::first_sample(sun, self.interval);
    }

    /// Advances the clock by one interval
    pub fn advance(&mut self) {
        self.minute += self.interval;
    }

    /// Checks whether the clock has gone past the last sample of the day
    pub fn day_is_over(&self, sun: SunMinutes) -> bool {
        self.minute > sun.sunset + self.interval
    }

    /// The current minute of the day
    pub fn minute(&self) -> Float {
        self.minute
    }

    /// The (1-based) day of the year
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The interval between samples, in minutes
    pub fn interval(&self) -> Float {
        self.interval
    }

    /// The date this clock is at. Samples falling outside of the day are
    /// clamped to it.
    pub fn date(&self) -> Date {
        Date::from_ordinal(self.ordinal).at_minute(self.minute.clamp(0., 1439.))
    }
}
