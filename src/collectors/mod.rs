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

use crate::sampler::{
    normal_from_tilt_azimuth, slope_from_tilt_azimuth, Frame, GridShape, SampleGrid,
};
use crate::world::Placement;
use crate::Float;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorFamily, TrackerType};
use rendering::OcclusionTester;
use solar::{RadiationModel, SkyState};
use weather::CurrentWeather;

mod flat_panel;
pub use flat_panel::FlatPanel;

mod heliostat;
pub use heliostat::Heliostat;

mod parabolic_trough;
pub use parabolic_trough::ParabolicTrough;

mod parabolic_dish;
pub use parabolic_dish::ParabolicDish;

mod fresnel_reflector;
pub use fresnel_reflector::FresnelReflector;

mod updraft_tower;
pub use updraft_tower::UpdraftTowerCollector;

mod sensor;
pub use sensor::LightSensor;

/// Added to the X component of bisectors that would otherwise be exactly
/// vertical (or zero)
pub const BISECTOR_PERTURBATION: Float = 1e-6;

/// Everything a [`YieldCalculator`] needs to know about the current time step,
/// apart from the element itself
pub struct StepContext<'a> {
    /// The sun and the peak irradiance
    pub sky: SkyState,
    /// The albedo of the ground
    pub albedo: Float,
    /// The model used for the diffuse irradiance
    pub radiation: &'a dyn RadiationModel,
    /// The snapshot of the shadow casters
    pub tester: &'a OcclusionTester,
    /// The caster owned by the element being evaluated, if captured
    pub self_owner: Option<usize>,
    /// The caster holding the receiver of the element (e.g., a tower), if any
    pub target_owner: Option<usize>,
}

/// The behaviour of a family of collectors.
///
/// Calculators are stateless: the element holds the data, and the
/// [`SampleGrid`] returned by `allocate_memory()` holds whatever changes
/// between steps.
pub trait YieldCalculator: Sync {
    /// The family handled by this calculator
    fn family(&self) -> CollectorFamily;

    /// Whether the element changes its orientation during the day
    fn is_moving(&self, element: &CollectorElement) -> bool {
        element.tracker.is_moving()
    }

    /// The shape of the sample grid over the aperture
    fn grid_shape(&self, element: &CollectorElement, cell_size: Float) -> GridShape {
        GridShape::rectangle(
            element.lx,
            element.ly,
            cell_size,
            self.family().needs_even_grid(),
        )
    }

    /// Allocates the sample grid that will be reused at every step
    fn allocate_memory(&self, element: &CollectorElement, cell_size: Float) -> SampleGrid {
        SampleGrid::new(self.grid_shape(element, cell_size))
    }

    /// The direction the aperture faces when the sun is at `sun`
    fn normal(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D)
        -> Vector3D;

    /// The frame of the aperture when the sun is at `sun`
    fn frame(&self, element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Frame {
        Frame::facing(
            placement.centre,
            self.normal(element, placement, sun),
            placement.azimuth,
        )
    }

    /// Places the sample points over the aperture
    fn sample(&self, element: &CollectorElement, frame: &Frame, memory: &mut SampleGrid) {
        memory.fill(frame, element.lx, element.ly)
    }

    /// Where the light reflected by `cell` goes. Only focusing
    /// collectors have one.
    fn focus(
        &self,
        _element: &CollectorElement,
        _placement: &Placement,
        _frame: &Frame,
        _cell: Point3D,
    ) -> Option<Point3D> {
        None
    }

    /// The normal of the surface at `cell`. Cells that reflect light
    /// towards a focus bisect the sun and the focus.
    fn cell_normal(
        &self,
        frame: &Frame,
        sun: Vector3D,
        cell: Point3D,
        focus: Option<Point3D>,
    ) -> Vector3D {
        match focus {
            Some(f) => bisector(sun, (f - cell).get_normalized()),
            None => frame.normal,
        }
    }

    /// The average irradiance (kW/m2) collected by the element at this step
    fn yield_contribution(
        &self,
        ctx: &StepContext,
        element: &CollectorElement,
        placement: &Placement,
        memory: &mut SampleGrid,
    ) -> Float {
        let sun = ctx.sky.sun;
        if sun.z <= 0. {
            return 0.;
        }
        let frame = self.frame(element, placement, sun);
        if frame.normal * sun <= 0. {
            return 0.;
        }
        self.sample(element, &frame, memory);
        if memory.is_empty() {
            return 0.;
        }

        let mut total = 0.;
        for &cell in memory.points() {
            let focus = self.focus(element, placement, &frame, cell);
            let normal = self.cell_normal(&frame, sun, cell, focus);
            total += ctx.radiation.diffuse_radiation(&ctx.sky, ctx.albedo, normal);

            let cos = normal * sun;
            if cos <= 0. || ctx.tester.is_occluded(ctx.self_owner, cell, sun) {
                continue;
            }
            if let Some(f) = focus {
                if ctx
                    .tester
                    .is_occluded_towards(ctx.self_owner, cell, f, ctx.target_owner)
                {
                    continue;
                }
            }
            total += cos * ctx.sky.peak;
        }
        total / memory.len() as Float
    }

    /// The factor that transforms collected irradiation (kWh/m2) into
    /// the output of the element, for the weather of a certain month
    fn efficiency_factor(&self, element: &CollectorElement, _weather: &CurrentWeather) -> Float {
        element.area() * element.efficiency.factor()
    }
}

/// The calculator of a family
pub fn calculator(family: CollectorFamily) -> &'static dyn YieldCalculator {
    match family {
        CollectorFamily::FlatPanel => &FlatPanel,
        CollectorFamily::Heliostat => &Heliostat,
        CollectorFamily::ParabolicTrough => &ParabolicTrough,
        CollectorFamily::ParabolicDish => &ParabolicDish,
        CollectorFamily::FresnelReflector => &FresnelReflector,
        CollectorFamily::UpdraftTower => &UpdraftTowerCollector,
        CollectorFamily::Sensor => &LightSensor,
    }
}

/// The normalized bisector of two unit vectors. Sums that are exactly
/// vertical get [`BISECTOR_PERTURBATION`] added to their X component.
pub fn bisector(a: Vector3D, b: Vector3D) -> Vector3D {
    let mut sum = a + b;
    if sum.x == 0. && sum.y == 0. {
        sum.x += BISECTOR_PERTURBATION;
    }
    sum.get_normalized()
}

/// The horizontal axis of a collector with a certain azimuth (in Radians)
pub(crate) fn horizontal_axis(azimuth: Float) -> Vector3D {
    let (sin, cos) = azimuth.sin_cos();
    Vector3D::new(sin, cos, 0.)
}

/// The normal of an element that follows the sun with a certain `tracker`.
///
/// Single-axis trackers rotate their normal within the plane perpendicular
/// to their axis so that it is as close as possible to the sun. When the sun
/// is below the horizon, or the tracker cannot face it at all, the normal is
/// the one given by the tilt and azimuth.
pub fn tracked_normal(tracker: TrackerType, tilt: Float, azimuth: Float, sun: Vector3D) -> Vector3D {
    let fixed = normal_from_tilt_azimuth(tilt, azimuth);
    if sun.z <= 0. {
        return fixed;
    }
    let n = match tracker {
        TrackerType::None => return fixed,
        TrackerType::HorizontalSingleAxis => sun.project_onto_plane(horizontal_axis(azimuth)),
        TrackerType::TiltedSingleAxis => {
            sun.project_onto_plane(slope_from_tilt_azimuth(tilt, azimuth))
        }
        TrackerType::VerticalSingleAxis => normal_from_tilt_azimuth(tilt, sun.x.atan2(sun.y)),
        TrackerType::AltAzimuthDualAxis => sun,
    };
    if n.is_zero() {
        fixed
    } else {
        n.get_normalized()
    }
}

/// The frame of an element that follows the sun with its tracker. Single axis
/// trackers keep the `ly` side of their aperture along the axis.
pub fn tracked_frame(element: &CollectorElement, placement: &Placement, sun: Vector3D) -> Frame {
    let (tilt, azimuth) = (placement.tilt, placement.azimuth);
    let normal = tracked_normal(element.tracker, tilt, azimuth, sun);
    match element.tracker {
        TrackerType::None => Frame::from_tilt_azimuth(placement.centre, tilt, azimuth),
        TrackerType::HorizontalSingleAxis => {
            Frame::new(placement.centre, normal, horizontal_axis(azimuth))
        }
        TrackerType::TiltedSingleAxis => Frame::new(
            placement.centre,
            normal,
            slope_from_tilt_azimuth(tilt, azimuth),
        ),
        TrackerType::VerticalSingleAxis | TrackerType::AltAzimuthDualAxis => {
            Frame::facing(placement.centre, normal, azimuth)
        }
    }
}
