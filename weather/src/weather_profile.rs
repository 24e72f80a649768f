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

use crate::{CurrentWeather, Float, Location, WeatherTrait};
use calendar::{days_in_month, Date};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Monthly climatic statistics of a site.
///
/// ```rust
/// use weather::{WeatherProfile, WeatherTrait, Date};
///
/// let profile = WeatherProfile::from_json("{
///     location: { city: 'Boston', latitude: 42.3, longitude: -71.0, elevation: 43 },
///     sunshine_hours: [149, 165, 202, 214, 253, 280, 305, 272, 226, 198, 143, 141],
///     average_temperature: [-1.5, -0.3, 3.6, 9.2, 14.8, 20.2, 23.5, 22.8, 18.7, 12.5, 7.3, 1.9],
/// }").unwrap();
///
/// let june = profile.get_weather_data(Date::new(6, 21).unwrap());
/// assert_eq!(june.sunshine_hours, 280.);
/// assert_eq!(june.dry_bulb_temperature, 20.2);
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeatherProfile {
    /// The location of the site
    pub location: Location,

    /// The total hours of sunshine of each month, starting in January
    pub sunshine_hours: [Float; 12],

    /// The average air temperature of each month (in C), starting in January
    #[serde(default = "default_temperatures")]
    pub average_temperature: [Float; 12],
}

fn default_temperatures() -> [Float; 12] {
    [20.; 12]
}

impl WeatherProfile {
    /// Creates a profile in which every day of the year is perfectly clear.
    ///
    /// The sunshine hours of each month are 30 times its mean daylight
    /// hours, matching the 30-day months assumed when turning sunshine
    /// into a daily fraction. So the weather does not attenuate clear-sky
    /// radiation.
    pub fn clear_sky(location: Location) -> Self {
        let solar = location.get_solar();
        let mut sunshine_hours = [0.0; 12];
        for (m, hours) in sunshine_hours.iter_mut().enumerate() {
            let month = m as u8 + 1;
            let n_days = days_in_month(month);
            let mut total = 0.0;
            for day in 1..=n_days {
                if let Ok(date) = Date::new(month, day) {
                    total += solar
                        .sunrise_sunset(date.ordinal())
                        .daylight_hours()
                        .max(0.0);
                }
            }
            let max = n_days as Float * 24.;
            *hours = (30. * total / n_days as Float).min(max);
        }
        Self {
            location,
            sunshine_hours,
            average_temperature: default_temperatures(),
        }
    }

    /// Parses a `WeatherProfile` from a JSON (or JSON5) string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let profile: Self = json5::from_str(json).map_err(|e| e.to_string())?;
        profile.validate()?;
        Ok(profile)
    }

    /// Parses a `WeatherProfile` from a file containing a JSON (or JSON5)
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, String> {
        let path = filename.as_ref();
        let jsonstring = match std::fs::read_to_string(path) {
            Ok(v) => v,
            Err(_) => return Err(format!("Could not read weather file '{}'", path.display())),
        };
        Self::from_json(&jsonstring)
    }

    /// Checks that the data makes sense
    pub fn validate(&self) -> Result<(), String> {
        self.location.validate()?;
        for (m, hours) in self.sunshine_hours.iter().enumerate() {
            let max = days_in_month(m as u8 + 1) as Float * 24.;
            if *hours < 0. || *hours > max {
                return Err(format!(
                    "Sunshine hours of month {} must be between 0 and {}... found {}",
                    m + 1,
                    max,
                    hours
                ));
            }
        }
        for (m, t) in self.average_temperature.iter().enumerate() {
            if *t <= -273.15 {
                return Err(format!(
                    "Average temperature of month {} is below absolute zero ({} C)",
                    m + 1,
                    t
                ));
            }
        }
        Ok(())
    }
}

impl WeatherTrait for WeatherProfile {
    fn get_weather_data(&self, date: Date) -> CurrentWeather {
        let m = date.month_index();
        CurrentWeather {
            date,
            sunshine_hours: self.sunshine_hours[m],
            dry_bulb_temperature: self.average_temperature[m],
        }
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_clear_sky() {
        let loc = Location {
            latitude: 42.3,
            ..Location::default()
        };
        let profile = WeatherProfile::clear_sky(loc);
        assert!(profile.validate().is_ok());
        // Summer is longer than winter in the northern hemisphere
        assert!(profile.sunshine_hours[5] > profile.sunshine_hours[11]);
        // June has 30 days of ~15 hours
        assert!((profile.sunshine_hours[5] / 30. - 15.1).abs() < 0.3);

        // Months of 31 days are scaled to 30 days too
        let solar = profile.location.get_solar();
        let december = (1..=31)
            .map(|d| solar.sunrise_sunset(Date::new(12, d).unwrap().ordinal()).daylight_hours())
            .sum::<Float>()
            / 31.;
        assert!((profile.sunshine_hours[11] - 30. * december).abs() < 1e-9);
        assert!(profile.sunshine_hours[11] / 30. < 9.5);
    }

    #[test]
    fn test_polar_clear_sky() {
        let loc = Location {
            latitude: 85.,
            ..Location::default()
        };
        let profile = WeatherProfile::clear_sky(loc);
        // Polar day and polar night are both degenerate
        assert_eq!(profile.sunshine_hours[5], 0.);
        assert_eq!(profile.sunshine_hours[11], 0.);
    }

    #[test]
    fn test_validate() {
        let mut profile = WeatherProfile::clear_sky(Location::default());
        assert!(profile.validate().is_ok());
        profile.sunshine_hours[1] = 29. * 24.;
        assert!(profile.validate().is_err());
        profile.sunshine_hours[1] = 100.;
        profile.average_temperature[3] = -300.;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_default_temperatures() -> Result<(), String> {
        let profile = WeatherProfile::from_json(
            "{
            location: { latitude: -33.4 },
            sunshine_hours: [300, 260, 250, 190, 150, 120, 130, 160, 180, 230, 270, 300],
        }",
        )?;
        assert_eq!(profile.average_temperature, [20.; 12]);
        assert_eq!(profile.location.elevation, 0.);

        let bad = WeatherProfile::from_json(
            "{
            location: { latitude: -33.4 },
            sunshine_hours: [300, 260, 250, 190, 150, 120, 130, 160, 180, 230, 270],
        }",
        );
        assert!(bad.is_err());
        Ok(())
    }
}
