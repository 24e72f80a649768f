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

use crate::{Float, PI};
use calendar::Date;
use geometry::Vector3D;

/// Minutes from midnight to solar noon
const NOON: Float = 720.;

/// The sunrise and sunset of a day, in minutes from midnight (solar time)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunMinutes {
    /// The minute of the day at which the sun rises
    pub sunrise: Float,
    /// The minute of the day at which the sun sets
    pub sunset: Float,
}

impl SunMinutes {
    /// The degenerate pair returned for polar days and nights
    pub const fn degenerate() -> Self {
        Self {
            sunrise: NOON,
            sunset: NOON,
        }
    }

    /// Minutes between sunrise and sunset. A value of zero (or less)
    /// means that no direct radiation is possible on that day.
    pub fn daylight(&self) -> Float {
        self.sunset - self.sunrise
    }

    /// Hours between sunrise and sunset
    pub fn daylight_hours(&self) -> Float {
        self.daylight() / 60.
    }

    /// Checks whether a minute of the day lies strictly between
    /// sunrise and sunset
    pub fn contains(&self, minute: Float) -> bool {
        minute > self.sunrise && minute < self.sunset
    }
}

/// Calculates the position of the sun for a certain latitude.
///
/// Solar azimuths follow the convention of Duffie and Beckman: displacements
/// east of south are negative and west of south are positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Solar {
    /// Latitude in Radians. South is negative, North is positive.
    latitude: Float,
}

impl Solar {
    /// Builds a `Solar` object from a Latitude (in Radians)
    pub fn new(latitude: Float) -> Self {
        Self { latitude }
    }

    /// Builds a `Solar` object from a Latitude in Degrees
    pub fn from_degrees(latitude: Float) -> Self {
        Self::new(latitude.to_radians())
    }

    /// The latitude, in Radians
    pub fn latitude(&self) -> Float {
        self.latitude
    }

    /// Declination (in Radians), according to Cooper's equation
    /// (Equation 1.6.1a in Duffie and Beckman).
    ///
    /// `n` is the 1-based day of the year
    pub fn declination(&self, n: usize) -> Float {
        let n = n as Float;
        (23.45 as Float).to_radians() * (2. * PI * (284. + n) / 365.25).sin()
    }

    /// The hour angle (in Radians) at a certain minute of the day.
    /// Mornings are negative, afternoons are positive.
    pub fn hour_angle(&self, minute: Float) -> Float {
        (minute - NOON) / NOON * PI
    }

    /// Builds a unit vector that points towards the sun, on the day `n`
    /// (1-based day of the year) at a certain `minute` of the day.
    ///
    /// Z is up, Y is North and X is East. The vector is returned even if the
    /// sun is below the horizon (i.e., `z <= 0`).
    pub fn sun_direction(&self, n: usize, minute: Float) -> Vector3D {
        let (sin_phi, cos_phi) = self.latitude.sin_cos();
        let (sin_delta, cos_delta) = self.declination(n).sin_cos();
        let (sin_omega, cos_omega) = self.hour_angle(minute).sin_cos();

        // Equation 1.6.5, for the cosine of the zenith
        let z = cos_phi * cos_delta * cos_omega + sin_phi * sin_delta;

        // The hour angle grows westwards, the X axis points East.
        let x = -cos_delta * sin_omega;
        let y = cos_phi * sin_delta - sin_phi * cos_delta * cos_omega;

        debug_assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-6);
        Vector3D::new(x, y, z)
    }

    /// Same as [`Solar::sun_direction`], but based on a [`Date`]
    pub fn sun_direction_at(&self, date: Date) -> Vector3D {
        self.sun_direction(date.ordinal(), date.minute_of_day())
    }

    /// The solar azimuth (in Radians) of a sun direction, measured from
    /// South. Displacements east of south are negative.
    pub fn azimuth(sun: Vector3D) -> Float {
        (-sun.x).atan2(-sun.y)
    }

    /// The solar zenith (in Radians) of a sun direction
    pub fn zenith(sun: Vector3D) -> Float {
        sun.z.clamp(-1., 1.).acos()
    }

    /// Gets the sunrise and sunset (Equation 1.6.10) of day `n` (1-based
    /// day of the year), in minutes from midnight.
    ///
    /// Polar days and polar nights return [`SunMinutes::degenerate`]
    pub fn sunrise_sunset(&self, n: usize) -> SunMinutes {
        let delta = self.declination(n);
        let cos_w = -self.latitude.tan() * delta.tan();
        if !(-1.0..1.0).contains(&cos_w) || cos_w.is_nan() {
            return SunMinutes::degenerate();
        }
        let half_day = cos_w.acos() / PI * NOON;
        SunMinutes {
            sunrise: NOON - half_day,
            sunset: NOON + half_day,
        }
    }
} // end of impl Solar
