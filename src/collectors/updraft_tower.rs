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

use super::YieldCalculator;
use crate::sampler::Frame;
use crate::world::Placement;
use crate::Float;
use geometry::Vector3D;
use model::{CollectorElement, CollectorFamily, CollectorKind};
use weather::CurrentWeather;

/// Gravity, in m/s2
const GRAVITY: Float = 9.81;

/// Specific heat of air, in J/kg.K
const AIR_SPECIFIC_HEAT: Float = 1005.;

/// The glazed canopy of a solar updraft tower.
///
/// The heat collected by the canopy drives a flow of air up the chimney,
/// whose efficiency is $`g H / (c_p T)`$.
pub struct UpdraftTowerCollector;

impl YieldCalculator for UpdraftTowerCollector {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::UpdraftTower
    }

    fn is_moving(&self, _element: &CollectorElement) -> bool {
        false
    }

    fn normal(&self, _element: &CollectorElement, placement: &Placement, _sun: Vector3D) -> Vector3D {
        crate::sampler::normal_from_tilt_azimuth(placement.tilt, placement.azimuth)
    }

    fn frame(&self, _element: &CollectorElement, placement: &Placement, _sun: Vector3D) -> Frame {
        Frame::from_tilt_azimuth(placement.centre, placement.tilt, placement.azimuth)
    }

    fn efficiency_factor(&self, element: &CollectorElement, weather: &CurrentWeather) -> Float {
        let thermal = element.area() * element.efficiency.factor();
        match element.kind {
            CollectorKind::UpdraftTower {
                chimney_height,
                discharge_coefficient,
                turbine_efficiency,
            } => {
                let chimney = GRAVITY * chimney_height
                    / (AIR_SPECIFIC_HEAT * weather.dry_bulb_kelvin());
                thermal * chimney * discharge_coefficient * turbine_efficiency
            }
            _ => thermal,
        }
    }
}
