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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The solar constant, in kW/m2
pub const SOLAR_CONSTANT: Float = 1.361;

/// The approach used for calculating the relative optical air mass
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AirMassPolicy {
    /// The air mass is always 1, so the atmosphere attenuates radiation
    /// in the same way regardless of the position of the sun.
    None,

    /// Kasten and Young (1989) interpolation, corrected by the
    /// ISA pressure ratio at the site's elevation.
    #[default]
    KastenYoung,

    /// Homogeneous spherical atmosphere of 9 km on top of the Earth
    /// (Schoenberg, 1929), where the site's elevation lifts the observer
    SphereModel,
}

impl AirMassPolicy {
    /// Calculates the relative air mass for a sun direction and a site
    /// `elevation` (in meters above sea level).
    ///
    /// Returns `Float::INFINITY` when the sun is at or below the horizon
    pub fn air_mass(&self, sun: Vector3D, elevation: Float) -> Float {
        let cos_z = sun.z;
        if cos_z <= 0. {
            return Float::INFINITY;
        }
        match self {
            Self::None => 1.,
            Self::KastenYoung => {
                let zenith = cos_z.clamp(-1., 1.).acos().to_degrees();
                let relative = 1. / (cos_z + 0.50572 * (96.07995 - zenith).powf(-1.6364));
                // ISA pressure ratio, valid within the troposphere
                let h = elevation.clamp(-500., 11000.);
                let pressure_ratio = (1. - 2.25577e-5 * h).powf(5.25588);
                relative * pressure_ratio
            }
            Self::SphereModel => {
                const R: Float = 708.;
                let c = (elevation / 9000.).clamp(-0.5, 0.99);
                let rc = R + c;
                ((rc * cos_z).powi(2) + (2. * R + 1. + c) * (1. - c)).sqrt() - rc * cos_z
            }
        }
    }
}

/// The state of the sky at a certain instant, as needed for calculating
/// the diffuse irradiance over surfaces
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SkyState {
    /// Unit vector pointing towards the sun
    pub sun: Vector3D,
    /// The direct normal irradiance (kW/m2)
    pub peak: Float,
    /// The month, starting from 0 (i.e., January is 0)
    pub month: usize,
}

/// A model that calculates the clear-sky irradiance at an instant.
pub trait RadiationModel: std::fmt::Debug + Send + Sync {
    /// The direct normal irradiance (in kW/m2) for a sun direction, on
    /// day `n` (1-based day of the year) at a site `elevation` (meters).
    ///
    /// It has to be non-negative, non-increasing with the solar zenith,
    /// and zero when the sun is at or below the horizon.
    fn peak_radiation(
        &self,
        sun: Vector3D,
        n: usize,
        elevation: Float,
        air_mass: AirMassPolicy,
    ) -> Float;

    /// The diffuse and ground-reflected irradiance (in kW/m2) over a
    /// surface with a certain `normal`. It does not consider
    /// obstructions.
    fn diffuse_radiation(&self, sky: &SkyState, albedo: Float, normal: Vector3D) -> Float;

    /// Bundles the peak radiation with the sun direction and month
    fn sky_state(
        &self,
        sun: Vector3D,
        n: usize,
        elevation: Float,
        air_mass: AirMassPolicy,
    ) -> SkyState {
        SkyState {
            sun,
            peak: self.peak_radiation(sun, n, elevation, air_mass),
            month: Date::from_ordinal(n).month_index(),
        }
    }
}

/// A monthly clear-sky model, after the ASHRAE (1972) tables.
///
/// The direct normal irradiance is $`E_{bn} = S_0 k_m e^{-B_m \cdot AM}`$, where $`k_m`$ is
/// the monthly clearness. The diffuse irradiance over a surface is calculated as
/// $`C_m E_{bn} (1+\cos\beta)/2 + \rho E_{bn} (\sin\alpha + C_m) (1-\cos\beta)/2`$.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearSkyModel {
    /// The apparent extraterrestrial irradiance of each month, divided by
    /// the solar constant
    pub clearness: [Float; 12],

    /// The atmospheric extinction coefficient of each month
    pub optical_depth: [Float; 12],

    /// The ratio between diffuse horizontal and direct normal irradiance
    pub diffuse_ratio: [Float; 12],
}

impl std::default::Default for ClearSkyModel {
    fn default() -> Self {
        Self {
            clearness: [
                0.904, 0.893, 0.871, 0.835, 0.811, 0.799, 0.797, 0.813, 0.846, 0.876, 0.897,
                0.906,
            ],
            optical_depth: [
                0.142, 0.144, 0.156, 0.180, 0.196, 0.205, 0.207, 0.201, 0.177, 0.160, 0.149,
                0.142,
            ],
            diffuse_ratio: [
                0.058, 0.060, 0.071, 0.097, 0.121, 0.134, 0.136, 0.122, 0.092, 0.073, 0.063,
                0.057,
            ],
        }
    }
}

impl RadiationModel for ClearSkyModel {
    fn peak_radiation(
        &self,
        sun: Vector3D,
        n: usize,
        elevation: Float,
        air_mass: AirMassPolicy,
    ) -> Float {
        if sun.z <= 0. {
            return 0.;
        }
        let m = Date::from_ordinal(n).month_index();
        let am = air_mass.air_mass(sun, elevation);
        let ret = SOLAR_CONSTANT * self.clearness[m] * (-self.optical_depth[m] * am).exp();
        ret.max(0.)
    }

    fn diffuse_radiation(&self, sky: &SkyState, albedo: Float, normal: Vector3D) -> Float {
        if sky.sun.z <= 0. || sky.peak <= 0. {
            return 0.;
        }
        let c = self.diffuse_ratio[sky.month];
        let nz = normal.z.clamp(-1., 1.);
        let sky_view = (1. + nz) / 2.;
        let ground_view = (1. - nz) / 2.;
        let diffuse = c * sky.peak * sky_view;
        let reflected = albedo * sky.peak * (sky.sun.z + c) * ground_view;
        diffuse + reflected
    }
}

/// The extraterrestrial irradiance (kW/m2) on day `n`, following
/// Equation 1.4.1a from Duffie and Beckman.
pub fn extraterrestrial_irradiance(n: usize) -> Float {
    let b = 2. * PI * (n as Float - 1.) / 365.;
    SOLAR_CONSTANT * (1.000110 + 0.034221 * b.cos() + 0.001280 * b.sin() + 0.000719 * (2. * b).cos()
        + 0.000077 * (2. * b).sin())
}
