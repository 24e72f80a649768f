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

use super::{bisector, YieldCalculator};
use crate::sampler::{normal_from_tilt_azimuth, Frame};
use crate::world::Placement;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorFamily};

/// Mirrors that track the sun, reflecting it towards a receiver
/// on top of a tower
pub struct Heliostat;

impl YieldCalculator for Heliostat {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::Heliostat
    }

    fn is_moving(&self, _element: &CollectorElement) -> bool {
        true
    }

    /// Bisects the sun and the direction towards the receiver
    fn normal(&self, _element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Vector3D {
        match &placement.receiver {
            Some(receiver) => bisector(sun, (receiver.point - placement.centre).get_normalized()),
            None => normal_from_tilt_azimuth(placement.tilt, placement.azimuth),
        }
    }

    fn focus(
        &self,
        _element: &CollectorElement,
        placement: &Placement,
        _frame: &Frame,
        _cell: Point3D,
    ) -> Option<Point3D> {
        placement.receiver.as_ref().map(|r| r.point)
    }
}
