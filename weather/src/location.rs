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
use solar::Solar;

/// A Location
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// The name of the City
    #[serde(default)]
    pub city: String,

    /// The name or ISO code of the country
    #[serde(default)]
    pub country: String,

    /// The source of the climatic data (e.g., TMY, IWEC)
    #[serde(default)]
    pub source: String,

    /// The Latitude in Degrees.
    ///
    /// South is negative, North is Positive.
    pub latitude: Float,

    /// The Longitude in Degrees.
    ///
    /// West is Negative, East is Positive
    #[serde(default)]
    pub longitude: Float,

    /// The elevation of the site, in meters above sea level
    #[serde(default)]
    pub elevation: Float,
}

impl Location {
    /// Builds a [`Solar`] object corresponding to
    /// this location
    pub fn get_solar(&self) -> Solar {
        Solar::from_degrees(self.latitude)
    }

    /// Checks that the coordinates make sense
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "Latitude of Location '{}' must be between -90 and 90 degrees... found {}",
                self.city, self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "Longitude of Location '{}' must be between -180 and 180 degrees... found {}",
                self.city, self.longitude
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_validate() {
        let mut loc = Location {
            city: "Boston".into(),
            latitude: 42.3,
            longitude: -71.,
            ..Location::default()
        };
        assert!(loc.validate().is_ok());
        assert!((loc.get_solar().latitude() - (42.3 as Float).to_radians()).abs() < 1e-9);

        loc.latitude = 91.;
        assert!(loc.validate().is_err());
        loc.latitude = 0.;
        loc.longitude = -190.;
        assert!(loc.validate().is_err());
    }
}
