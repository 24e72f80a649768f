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

use super::{bisector, horizontal_axis, YieldCalculator};
use crate::sampler::{normal_from_tilt_azimuth, Frame};
use crate::world::Placement;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorFamily};

/// Rows of flat mirrors rotating around a horizontal axis (aligned with
/// their azimuth), reflecting the sun onto a linear receiver parallel to them.
///
/// Normals bisect the sun and the receiver once both are projected onto
/// the plane perpendicular to the axis of the row.
pub struct FresnelReflector;

fn projected_bisector(sun: Vector3D, to_receiver: Vector3D, axis: Vector3D) -> Option<Vector3D> {
    let s = sun.project_onto_plane(axis);
    let r = to_receiver.project_onto_plane(axis);
    if s.is_zero() || r.is_zero() {
        return None;
    }
    Some(bisector(s.get_normalized(), r.get_normalized()))
}

impl YieldCalculator for FresnelReflector {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::FresnelReflector
    }

    fn is_moving(&self, _element: &CollectorElement) -> bool {
        true
    }

    fn normal(&self, _element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Vector3D {
        let fixed = normal_from_tilt_azimuth(placement.tilt, placement.azimuth);
        match &placement.receiver {
            Some(receiver) => projected_bisector(
                sun,
                receiver.point - placement.centre,
                horizontal_axis(placement.azimuth),
            )
            .unwrap_or(fixed),
            None => fixed,
        }
    }

    fn frame(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Frame {
        Frame::new(
            placement.centre,
            self.normal(element, placement, sun),
            horizontal_axis(placement.azimuth),
        )
    }

    /// The point of the receiver in front of the cell
    fn focus(
        &self,
        _element: &CollectorElement,
        placement: &Placement,
        _frame: &Frame,
        cell: Point3D,
    ) -> Option<Point3D> {
        let axis = horizontal_axis(placement.azimuth);
        placement
            .receiver
            .as_ref()
            .map(|r| r.point + axis * ((cell - r.point) * axis))
    }

    fn cell_normal(
        &self,
        frame: &Frame,
        sun: Vector3D,
        cell: Point3D,
        focus: Option<Point3D>,
    ) -> Vector3D {
        focus
            .and_then(|f| projected_bisector(sun, f - cell, frame.v))
            .unwrap_or(frame.normal)
    }
}
