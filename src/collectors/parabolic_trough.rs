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

use super::{horizontal_axis, YieldCalculator};
use crate::sampler::{normal_from_tilt_azimuth, Frame};
use crate::world::Placement;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorFamily, CollectorKind};

/// Troughs that rotate around their long axis (horizontal, aligned with
/// their azimuth) following the sun, and concentrate the light on a
/// focal line parallel to that axis
pub struct ParabolicTrough;

impl YieldCalculator for ParabolicTrough {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::ParabolicTrough
    }

    fn is_moving(&self, _element: &CollectorElement) -> bool {
        true
    }

    fn normal(&self, _element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Vector3D {
        let tracked = sun.project_onto_plane(horizontal_axis(placement.azimuth));
        if sun.z <= 0. || tracked.is_zero() {
            normal_from_tilt_azimuth(placement.tilt, placement.azimuth)
        } else {
            tracked.get_normalized()
        }
    }

    fn frame(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Frame {
        Frame::new(
            placement.centre,
            self.normal(element, placement, sun),
            horizontal_axis(placement.azimuth),
        )
    }

    /// The point of the focal line in front of the cell
    fn focus(
        &self,
        element: &CollectorElement,
        _placement: &Placement,
        frame: &Frame,
        cell: Point3D,
    ) -> Option<Point3D> {
        match element.kind {
            CollectorKind::ParabolicTrough { focal_length } => {
                let along = (cell - frame.centre) * frame.v;
                Some(frame.centre + frame.normal * focal_length + frame.v * along)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::sampler::GridShape;
    use crate::Float;

    #[test]
    fn test_trough() {
        let trough = CollectorElement::new(
            "t",
            5.,
            12.,
            CollectorKind::ParabolicTrough { focal_length: 1.7 },
        );
        // 5 cells across become 6
        assert_eq!(
            ParabolicTrough.grid_shape(&trough, 1.),
            GridShape::Rectangle { nx: 6, ny: 12 }
        );

        // North-South axis
        let placement = Placement {
            centre: Point3D::new(0., 0., 2.),
            tilt: 0.,
            azimuth: (180. as Float).to_radians(),
            receiver: None,
        };
        let sun = Vector3D::new(0.6, -0.4, 0.5).get_normalized();
        let frame = ParabolicTrough.frame(&trough, &placement, sun);
        assert!(frame.normal.y.abs() < 1e-9);
        assert!(frame.normal.x > 0.);
        assert!(frame.v.compare(Vector3D::new(0., -1., 0.)));

        // The focal line runs along the axis
        let cell = frame.point(1., 3.);
        let focus = ParabolicTrough
            .focus(&trough, &placement, &frame, cell)
            .unwrap();
        let expected = frame.centre + frame.normal * 1.7 + frame.v * 3.;
        assert!(focus.compare(expected));

        // Parked at night
        let night = Vector3D::new(0., 0.3, -0.8).get_normalized();
        let n = ParabolicTrough.normal(&trough, &placement, night);
        assert!(n.compare(Vector3D::new(0., 0., 1.)));
    }
}
