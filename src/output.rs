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

use crate::aggregator::YieldReport;
use crate::control::Granularity;
use crate::error::SimulationError;
use crate::Float;
use std::fmt::Display;
use std::str::FromStr;

/// The number of slots of a daily series
pub const HOURS_PER_DAY: usize = 24;

/// The values of one element over a simulation: one per hour (daily)
/// or one per sampled day (yearly).
///
/// Values are accumulated raw while stepping, and scaled once when the
/// simulation finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSeries {
    values: Vec<Float>,
}

impl OutputSeries {
    /// Allocates a series of zeroes
    pub fn new(granularity: Granularity, days_per_year: usize) -> Self {
        let n = match granularity {
            Granularity::Daily => HOURS_PER_DAY,
            Granularity::Yearly => days_per_year,
        };
        Self {
            values: vec![0.; n],
        }
    }

    /// Adds `value` to a slot
    pub fn add(&mut self, slot: usize, value: Float) {
        self.values[slot] += value;
    }

    /// Sets the value of a slot
    pub fn set(&mut self, slot: usize, value: Float) {
        self.values[slot] = value;
    }

    /// Sets all the values to zero
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.);
    }

    /// The sum of all values
    pub fn sum(&self) -> Float {
        self.values.iter().sum()
    }

    /// The values
    pub fn values(&self) -> &[Float] {
        &self.values
    }

    /// The number of slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether the series has no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The formats in which reports can be written
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// One row per slot, one column per element plus the total
    #[default]
    Csv,
    /// The whole [`YieldReport`]
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format '{}'", s)),
        }
    }
}

/// Writes a report
pub fn write_report<T: std::io::Write>(
    report: &YieldReport,
    format: OutputFormat,
    mut out: T,
) -> Result<(), SimulationError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            write!(out, "{}", report.units_label())?;
            for e in &report.elements {
                write!(out, ",{}", e.id)?;
            }
            writeln!(out, ",Total")?;
            for (slot, label) in report.labels.iter().enumerate() {
                write!(out, "{}", label)?;
                for e in &report.elements {
                    write!(out, ",{:.3}", e.values[slot])?;
                }
                writeln!(out, ",{:.3}", report.total[slot])?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_series() {
        let mut s = OutputSeries::new(Granularity::Daily, 12);
        assert_eq!(s.len(), 24);
        s.add(3, 1.);
        s.add(3, 2.);
        s.set(4, 5.);
        assert_eq!(s.values()[3], 3.);
        assert_eq!(s.sum(), 8.);
        s.reset();
        assert_eq!(s.sum(), 0.);

        let s = OutputSeries::new(Granularity::Yearly, 36);
        assert_eq!(s.len(), 36);
    }

    #[test]
    fn test_format() {
        assert_eq!(OutputFormat::from_str("CSV"), Ok(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_str("json"), Ok(OutputFormat::Json));
        assert!(OutputFormat::from_str("xml").is_err());
    }
}
