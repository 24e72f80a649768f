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
use crate::sampler::{normal_from_tilt_azimuth, Frame};
use crate::world::Placement;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorFamily, CollectorKind};

/// Dishes pointing at the sun with two axes, concentrating the light
/// on a focal point in front of their aperture
pub struct ParabolicDish;

impl YieldCalculator for ParabolicDish {
    fn family(&self) -> CollectorFamily {
        CollectorFamily::ParabolicDish
    }

    fn is_moving(&self, _element: &CollectorElement) -> bool {
        true
    }

    fn normal(&self, _element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Vector3D {
        if sun.z > 0. {
            sun
        } else {
            normal_from_tilt_azimuth(placement.tilt, placement.azimuth)
        }
    }

    fn focus(
        &self,
        element: &CollectorElement,
        _placement: &Placement,
        frame: &Frame,
        _cell: Point3D,
    ) -> Option<Point3D> {
        match element.kind {
            CollectorKind::ParabolicDish { focal_length } => {
                Some(frame.centre + frame.normal * focal_length)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::collectors::StepContext;
    use crate::sampler::GridShape;
    use crate::Float;
    use rendering::OcclusionTester;
    use solar::{ClearSkyModel, SkyState};

    #[test]
    fn test_dish() {
        let dish = CollectorElement::new(
            "d",
            3.,
            3.,
            CollectorKind::ParabolicDish { focal_length: 2. },
        );
        // 7.5 cells round to 8, and 6.7 cells round to 7, which is odd
        assert_eq!(
            ParabolicDish.grid_shape(&dish, 0.4),
            GridShape::Rectangle { nx: 8, ny: 8 }
        );
        assert_eq!(
            ParabolicDish.grid_shape(&dish, 0.45),
            GridShape::Rectangle { nx: 8, ny: 8 }
        );

        let placement = Placement {
            centre: Point3D::new(0., 0., 2.),
            tilt: 0.,
            azimuth: (180. as Float).to_radians(),
            receiver: None,
        };
        let sun = Vector3D::new(0.2, -0.6, 0.7).get_normalized();
        let frame = ParabolicDish.frame(&dish, &placement, sun);
        assert!(frame.normal.compare(sun));
        let focus = ParabolicDish.focus(&dish, &placement, &frame, frame.centre);
        assert_eq!(focus, Some(frame.centre + sun * 2.));

        // Every cell reflects the sun into the focus
        let tester = OcclusionTester::default();
        let model = ClearSkyModel::default();
        let ctx = StepContext {
            sky: SkyState {
                sun,
                peak: 1.,
                month: 5,
            },
            albedo: 0.,
            radiation: &model,
            tester: &tester,
            self_owner: None,
            target_owner: None,
        };
        let mut memory = ParabolicDish.allocate_memory(&dish, 0.5);
        let y = ParabolicDish.yield_contribution(&ctx, &dish, &placement, &mut memory);
        assert!(y > 0.9 && y < 1.5, "{}", y);
    }
}
