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
use geometry::{Point3D, Vector3D};

/// The shape of the grid of points used for integrating the irradiance
/// over the aperture of a collector
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridShape {
    /// A regular grid of `nx` by `ny` cells
    Rectangle {
        /// Number of cells across the aperture
        nx: usize,
        /// Number of cells along the aperture
        ny: usize,
    },
    /// A single point at the centre of the aperture
    Point,
}

impl GridShape {
    /// Calculates the shape of the grid for an aperture of `lx` by `ly`
    /// and a target `cell_size`. Grids have at least two cells in each
    /// direction; `even` grids are rounded up to an even number of cells.
    pub fn rectangle(lx: Float, ly: Float, cell_size: Float, even: bool) -> Self {
        let n = |l: Float| -> usize {
            let mut n = ((l / cell_size).round() as usize).max(2);
            if even && n % 2 == 1 {
                n += 1;
            }
            n
        };
        Self::Rectangle { nx: n(lx), ny: n(ly) }
    }

    /// The number of points in the grid
    pub fn len(&self) -> usize {
        match self {
            Self::Rectangle { nx, ny } => nx * ny,
            Self::Point => 1,
        }
    }

    /// Checks whether the grid has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An orthonormal basis over the aperture of a collector.
///
/// `u` goes across the aperture (the `lx` direction), `v` goes along it
/// (the `ly` direction) and `normal = u x v`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// The centre of the aperture
    pub centre: Point3D,
    /// The direction the aperture faces
    pub normal: Vector3D,
    /// The direction across the aperture
    pub u: Vector3D,
    /// The direction along the aperture
    pub v: Vector3D,
}

/// The direction a surface with a certain tilt and azimuth (both in Radians) faces
pub fn normal_from_tilt_azimuth(tilt: Float, azimuth: Float) -> Vector3D {
    let (sin_b, cos_b) = tilt.sin_cos();
    let (sin_g, cos_g) = azimuth.sin_cos();
    Vector3D::new(sin_b * sin_g, sin_b * cos_g, cos_b)
}

/// The direction that goes up the slope of a surface with a certain
/// tilt and azimuth (both in Radians)
pub fn slope_from_tilt_azimuth(tilt: Float, azimuth: Float) -> Vector3D {
    let (sin_b, cos_b) = tilt.sin_cos();
    let (sin_g, cos_g) = azimuth.sin_cos();
    Vector3D::new(-cos_b * sin_g, -cos_b * cos_g, sin_b)
}

impl Frame {
    /// Builds a frame facing `normal`, with `v` as close as
    /// possible to `along`
    pub fn new(centre: Point3D, normal: Vector3D, along: Vector3D) -> Self {
        let normal = normal.get_normalized();
        let mut v = along.project_onto_plane(normal);
        if v.length_squared() < 1e-12 {
            let fallback = if normal.z.abs() < 0.9 {
                Vector3D::new(0., 0., 1.)
            } else {
                Vector3D::new(0., 1., 0.)
            };
            v = fallback.project_onto_plane(normal);
        }
        let v = v.get_normalized();
        let u = v.cross(normal);
        Self {
            centre,
            normal,
            u,
            v,
        }
    }

    /// Builds the frame of a surface with a certain `tilt` and `azimuth`
    /// (in Radians, clockwise from North)
    pub fn from_tilt_azimuth(centre: Point3D, tilt: Float, azimuth: Float) -> Self {
        let normal = normal_from_tilt_azimuth(tilt, azimuth);
        let v = slope_from_tilt_azimuth(tilt, azimuth);
        Self {
            centre,
            normal,
            u: v.cross(normal),
            v,
        }
    }

    /// Builds the frame of a surface facing `normal`, with `v` going up
    /// its slope. Horizontal surfaces use `fallback_azimuth`.
    pub fn facing(centre: Point3D, normal: Vector3D, fallback_azimuth: Float) -> Self {
        let normal = normal.get_normalized();
        let tilt = normal.z.clamp(-1., 1.).acos();
        let horizontal = (normal.x * normal.x + normal.y * normal.y).sqrt();
        let azimuth = if horizontal < 1e-9 {
            fallback_azimuth
        } else {
            normal.x.atan2(normal.y)
        };
        Self::from_tilt_azimuth(centre, tilt, azimuth)
    }

    /// A point at coordinates `a` (across) and `b` (along) over the aperture
    pub fn point(&self, a: Float, b: Float) -> Point3D {
        self.centre + self.u * a + self.v * b
    }

    /// The two triangles of an aperture of `lx` by `ly`
    pub fn triangles(&self, lx: Float, ly: Float) -> [[Point3D; 3]; 2] {
        let (hx, hy) = (lx / 2., ly / 2.);
        let a = self.point(-hx, -hy);
        let b = self.point(hx, -hy);
        let c = self.point(hx, hy);
        let d = self.point(-hx, hy);
        [[a, b, c], [a, c, d]]
    }
}

/// A set of sample points over an aperture. It is allocated once,
/// and refilled at every time step.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    shape: GridShape,
    points: Vec<Point3D>,
}

impl SampleGrid {
    /// Allocates a grid
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            points: vec![Point3D::default(); shape.len()],
        }
    }

    /// The shape of the grid
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Places the points of the grid at the centre of the cells
    /// of an aperture of `lx` by `ly`
    pub fn fill(&mut self, frame: &Frame, lx: Float, ly: Float) {
        match self.shape {
            GridShape::Point => self.points[0] = frame.centre,
            GridShape::Rectangle { nx, ny } => {
                let dx = lx / nx as Float;
                let dy = ly / ny as Float;
                for j in 0..ny {
                    let b = -ly / 2. + (j as Float + 0.5) * dy;
                    for i in 0..nx {
                        let a = -lx / 2. + (i as Float + 0.5) * dx;
                        self.points[j * nx + i] = frame.point(a, b);
                    }
                }
            }
        }
    }

    /// The points of the grid
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    /// The number of points in the grid
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Checks whether the grid has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
