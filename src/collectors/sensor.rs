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

use super::{tracked_frame, tracked_normal, YieldCalculator};
use crate::sampler::{Frame, GridShape};
use crate::world::Placement;
use crate::Float;
use geometry::Vector3D;
use model::{CollectorElement, CollectorFamily};
use weather::CurrentWeather;

/// A point that measures the irradiation (kWh/m2) over a plane with its
/// tilt and azimuth
pub struct LightSensor;

impl YieldCalculator for LightSensor {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::Sensor
    }

    fn grid_shape(&self, _element: &CollectorElement, _cell_size: Float) -> GridShape {
        GridShape::Point
    }

    fn normal(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Vector3D {
        tracked_normal(element.tracker, placement.tilt, placement.azimuth, sun)
    }

    fn frame(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Frame {
        tracked_frame(element, placement, sun)
    }

    fn efficiency_factor(&self, _element: &CollectorElement, _weather: &CurrentWeather) -> Float {
        1.
    }
}
