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

use crate::{Float, Point3D, Ray3D, Vector3D};

/// An axis of a [`BBox3D`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BBoxAxis {
    /// The X axis
    X,
    /// The Y axis
    Y,
    /// The Z axis
    Z,
}

/// An axis-aligned bounding box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox3D {
    /// The corner with the smallest coordinates
    pub min: Point3D,
    /// The corner with the largest coordinates
    pub max: Point3D,
}

impl BBox3D {
    /// Creates a [`BBox3D`] from two opposite corners, in any order
    pub fn new(a: Point3D, b: Point3D) -> Self {
        Self {
            min: Point3D::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3D::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A degenerate [`BBox3D`] containing a single point
    pub fn from_point(p: Point3D) -> Self {
        Self { min: p, max: p }
    }

    /// The smallest [`BBox3D`] containing two boxes
    pub fn from_union(a: &BBox3D, b: &BBox3D) -> Self {
        Self::new(
            Point3D::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y), a.min.z.min(b.min.z)),
            Point3D::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y), a.max.z.max(b.max.z)),
        )
    }

    /// The smallest [`BBox3D`] containing a box and a point
    pub fn from_union_point(a: &BBox3D, p: Point3D) -> Self {
        Self::from_union(a, &Self::from_point(p))
    }

    /// The centre of the box
    pub fn centroid(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    /// The axis along which the box is longest
    pub fn max_extent(&self) -> BBoxAxis {
        let d = self.max - self.min;
        if d.x > d.y && d.x > d.z {
            BBoxAxis::X
        } else if d.y > d.z {
            BBoxAxis::Y
        } else {
            BBoxAxis::Z
        }
    }

    /// The area of the six faces of the box
    pub fn surface_area(&self) -> Float {
        let d = self.max - self.min;
        2. * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Checks whether a [`Ray3D`] intersects the box (slab test). `inv_dir`
    /// is the component-wise inverse of the ray direction, which is
    /// precalculated by the caller because it does not change within
    /// a traversal.
    pub fn intersect(&self, ray: &Ray3D, inv_dir: &Vector3D) -> bool {
        let mut t0: Float = 0.0;
        let mut t1 = Float::MAX;

        let slabs = [
            (self.min.x, self.max.x, ray.origin.x, inv_dir.x),
            (self.min.y, self.max.y, ray.origin.y, inv_dir.y),
            (self.min.z, self.max.z, ray.origin.z, inv_dir.z),
        ];
        for (min, max, origin, inv) in slabs {
            let mut t_near = (min - origin) * inv;
            let mut t_far = (max - origin) * inv;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            // Handles 0 * inf = NaN when the ray runs along a slab
            if t_near.is_nan() || t_far.is_nan() {
                if origin < min || origin > max {
                    return false;
                }
                continue;
            }
            t_far *= 1. + 2. * 1e-9;
            t0 = if t_near > t0 { t_near } else { t0 };
            t1 = if t_far < t1 { t_far } else { t1 };
            if t0 > t1 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_union_and_extent() {
        let a = BBox3D::new(Point3D::new(0., 0., 0.), Point3D::new(1., 1., 1.));
        let b = BBox3D::from_union_point(&a, Point3D::new(5., 0.5, 0.5));
        assert_eq!(b.max_extent(), BBoxAxis::X);
        assert!((b.surface_area() - 2. * (5. + 5. + 1.)).abs() < 1e-9);
        assert!(b.centroid().compare(Point3D::new(2.5, 0.5, 0.5)));
    }

    #[test]
    fn test_intersect() {
        let bbox = BBox3D::new(Point3D::new(-1., -1., -1.), Point3D::new(1., 1., 1.));

        let hit = Ray3D::new(Point3D::new(-5., 0., 0.), Vector3D::new(1., 0., 0.));
        let inv = Vector3D::new(1. / hit.direction.x, 1. / hit.direction.y, 1. / hit.direction.z);
        assert!(bbox.intersect(&hit, &inv));

        // Pointing away
        let miss = Ray3D::new(Point3D::new(-5., 0., 0.), Vector3D::new(-1., 0., 0.));
        let inv = Vector3D::new(1. / miss.direction.x, 1. / miss.direction.y, 1. / miss.direction.z);
        assert!(!bbox.intersect(&miss, &inv));

        // Parallel to a slab, outside of it
        let miss = Ray3D::new(Point3D::new(-5., 3., 0.), Vector3D::new(1., 0., 0.));
        let inv = Vector3D::new(1. / miss.direction.x, 1. / miss.direction.y, 1. / miss.direction.z);
        assert!(!bbox.intersect(&miss, &inv));
    }
}
