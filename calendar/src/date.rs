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

use crate::{Float, MINUTES_PER_DAY};
use std::cmp::{Ordering, PartialOrd};
use std::fmt;
use std::ops::Sub;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of days in each month of a (non-leap) year
const N_DAYS_PER_MONTH: [u8; 12] = [
    31, // Jan
    28, // Feb
    31, // Mar
    30, // Apr
    31, // May
    30, // Jun
    31, // Jul
    31, // Aug
    30, // Sept
    31, // Oct
    30, // Nov
    31, // Dec
];

/// Days elapsed in the year before the first day of each month
const CUMULATED_DAYS_BEFORE_MONTH: [usize; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A year-less date. Simulations in this workspace always
/// run in solar time, so the `hour` is the local solar hour.
///
/// Days and Months are counted from 1 (e.g. January is 1, not 0)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Date {
    /// Months of the year, from 1 to 12
    pub month: u8,

    /// Day of the month, from 1 to N
    pub day: u8,

    /// Hour of the day, from 0.0 to 23.999999
    pub hour: Float,
}

impl std::default::Default for Date {
    fn default() -> Self {
        Self {
            month: 1,
            day: 1,
            hour: 0.0,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hour = self.hour.floor();
        let mut minute = ((self.hour - hour) * 60.0).round();
        if minute >= 60.0 {
            hour += 1.0;
            minute = 0.0
        }
        write!(
            f,
            "{:02}/{:02} - {:02}:{:02}",
            self.month, self.day, hour, minute
        )
    }
}

impl Sub for Date {
    type Output = Float;

    fn sub(self, other: Self) -> Float {
        self.day_of_year() - other.day_of_year()
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.month
            .cmp(&other.month)
            .then(self.day.cmp(&other.day))
            .then(
                self.hour
                    .partial_cmp(&other.hour)
                    .unwrap_or(Ordering::Equal),
            )
    }
}

impl Date {
    /// Creates a new date at midnight
    pub fn new(month: u8, day: u8) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Impossible month '{}'", month));
        }
        let max_day = days_in_month(month);
        if day == 0 || day > max_day {
            return Err(format!(
                "Impossible day '{}' for month {} (which has {} days)",
                day, month, max_day
            ));
        }
        Ok(Self {
            month,
            day,
            hour: 0.0,
        })
    }

    /// Builds the date corresponding to the (1-based) ordinal
    /// day of the year. Values out of `1..=365` wrap around.
    pub fn from_ordinal(ordinal: usize) -> Self {
        let n = (ordinal.max(1) - 1) % 365;
        let mut month = 12;
        for (i, first) in CUMULATED_DAYS_BEFORE_MONTH.iter().enumerate().skip(1) {
            if *first > n {
                month = i;
                break;
            }
        }
        let day = n - CUMULATED_DAYS_BEFORE_MONTH[month - 1] + 1;
        Self {
            month: month as u8,
            day: day as u8,
            hour: 0.0,
        }
    }

    /// Transforms a (0-based, decimal) day of the year into a date
    pub fn from_day_of_year(n: Float) -> Self {
        let n = n.rem_euclid(365.);
        let whole = n.floor();
        let mut ret = Self::from_ordinal(whole as usize + 1);
        ret.hour = (n - whole) * 24.0;
        ret
    }

    /// Retrieves the day of the year corresponding
    /// to the date (0-based, includes the decimals for the hour)
    pub fn day_of_year(&self) -> Float {
        (self.ordinal() - 1) as Float + self.hour / 24.0
    }

    /// The (1-based) ordinal day of the year, ignoring the hour.
    /// January 1st is `1` and December 31st is `365`.
    pub fn ordinal(&self) -> usize {
        CUMULATED_DAYS_BEFORE_MONTH[self.month_index()] + self.day as usize
    }

    /// The 0-based index of the month (i.e., January is `0`)
    pub fn month_index(&self) -> usize {
        (self.month as usize).clamp(1, 12) - 1
    }

    /// Minutes elapsed since midnight
    pub fn minute_of_day(&self) -> Float {
        self.hour * 60.0
    }

    /// Returns a copy of this date, in the same day, at a certain
    /// minute of the day. Minutes outside of `0..1440` roll into
    /// the previous or next day.
    pub fn at_minute(&self, minute: Float) -> Self {
        let mut ret = Self {
            month: self.month,
            day: self.day,
            hour: 0.0,
        };
        if minute < 0.0 {
            let days_back = (-minute / MINUTES_PER_DAY).ceil();
            ret.add_days(365 - (days_back as usize % 365));
            ret.add_minutes(minute + days_back * MINUTES_PER_DAY);
        } else {
            ret.add_minutes(minute);
        }
        ret
    }

    /// Adds a certain number of hours to a date
    pub fn add_hours(&mut self, n_hours: Float) {
        let n_days = (n_hours / 24.).floor();
        self.add_days(n_days as usize);

        self.hour += n_hours - 24. * n_days;
        if self.hour >= 24. {
            self.add_days(1);
            self.hour %= 24.0;
        }
    }

    /// Adds a certain number of days to a date.
    pub fn add_days(&mut self, n_days: usize) {
        let n_days = n_days % 365;
        if n_days == 0 {
            return;
        }
        let ordinal = (self.ordinal() - 1 + n_days) % 365 + 1;
        let moved = Self::from_ordinal(ordinal);
        self.month = moved.month;
        self.day = moved.day;
    }

    /// Adds minutes to the date.
    pub fn add_minutes(&mut self, minutes: Float) {
        self.add_hours(minutes / 60.);
    }

    /// Checks whether two dates have same day and month
    pub fn same_day(&self, other: Self) -> bool {
        self.month == other.month && self.day == other.day
    }
}

/// The number of days in a month (1-based; February has 28 days)
pub fn days_in_month(month: u8) -> u8 {
    N_DAYS_PER_MONTH[(month as usize).clamp(1, 12) - 1]
}
