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
use serde::{Deserialize, Serialize};
use solar::AirMassPolicy;

/// The options for the yield calculations
///
/// ## Examples
/// ```json
/// {
///     interval_minutes: 10,
///     cell_size: 0.25,
///     days_per_year: 24,
///     air_mass: "SphereModel"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationOptions {
    /// The number of simulated minutes between two time steps.
    #[serde(default = "default_interval")]
    pub interval_minutes: Float,

    /// The target size (in meters) of the cells in which the aperture of
    /// each collector is subdivided.
    ///
    /// A smaller cell leads to more accurate shadows but, as usual,
    /// it has an impact on the time of the computation.
    #[serde(default = "default_cell_size")]
    pub cell_size: Float,

    /// The number of days sampled in yearly simulations. They are
    /// evenly spread over the year.
    #[serde(default = "default_days_per_year")]
    pub days_per_year: usize,

    /// The approach used for calculating the relative air mass
    #[serde(default)]
    pub air_mass: AirMassPolicy,
}

fn default_interval() -> Float {
    15.
}

fn default_cell_size() -> Float {
    0.5
}

fn default_days_per_year() -> usize {
    12
}

impl std::default::Default for SimulationOptions {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval(),
            cell_size: default_cell_size(),
            days_per_year: default_days_per_year(),
            air_mass: AirMassPolicy::default(),
        }
    }
}

impl SimulationOptions {
    /// The number of samples taken in each simulated hour
    pub fn samples_per_hour(&self) -> Float {
        60. / self.interval_minutes
    }

    /// Checks that the options make sense
    pub fn validate(&self) -> Result<(), String> {
        if !(self.interval_minutes > 0. && self.interval_minutes <= 60.) {
            return Err(format!(
                "The simulation interval must be between 0 and 60 minutes... found {}",
                self.interval_minutes
            ));
        }
        if self.cell_size <= 0. {
            return Err(format!(
                "The cell size must be positive... found {}",
                self.cell_size
            ));
        }
        if self.days_per_year == 0 || self.days_per_year > 365 {
            return Err(format!(
                "The number of days per year must be between 1 and 365... found {}",
                self.days_per_year
            ));
        }
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn serde() -> Result<(), String> {
        let from_hardcoded_json: SimulationOptions = json5::from_str(
            "{
            interval_minutes: 10,
            air_mass: 'SphereModel'
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(from_hardcoded_json.interval_minutes, 10.);
        assert_eq!(from_hardcoded_json.cell_size, 0.5);
        assert_eq!(from_hardcoded_json.days_per_year, 12);
        assert_eq!(from_hardcoded_json.air_mass, AirMassPolicy::SphereModel);
        assert!((from_hardcoded_json.samples_per_hour() - 6.).abs() < 1e-9);

        let defaults: SimulationOptions = json5::from_str("{}").map_err(|e| e.to_string())?;
        assert_eq!(defaults, SimulationOptions::default());
        assert_eq!(defaults.air_mass, AirMassPolicy::KastenYoung);
        Ok(())
    }

    #[test]
    fn validate() {
        let mut ops = SimulationOptions::default();
        assert!(ops.validate().is_ok());
        ops.interval_minutes = 0.;
        assert!(ops.validate().is_err());
        ops.interval_minutes = 15.;
        ops.days_per_year = 0;
        assert!(ops.validate().is_err());
        ops.days_per_year = 365;
        assert!(ops.validate().is_ok());
        ops.cell_size = -1.;
        assert!(ops.validate().is_err());
    }
}
