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
use geometry::{BBox3D, Point3D, Ray3D};

/// The smallest definition of a Triangle I could think of
pub type Triangle = [Float; 9];

/// Flattens three vertices into a [`Triangle`]
pub fn from_points(vertices: &[Point3D; 3]) -> Triangle {
    let [a, b, c] = vertices;
    [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]
}

/// Gets the BBox of a Triangle
pub fn world_bounds(t: &Triangle) -> BBox3D {
    let a = Point3D::new(t[0], t[1], t[2]);
    let bbox = BBox3D::from_point(a);

    let b = Point3D::new(t[3], t[4], t[5]);
    let bbox = BBox3D::from_union_point(&bbox, b);

    let c = Point3D::new(t[6], t[7], t[8]);
    BBox3D::from_union_point(&bbox, c)
}

fn dot(a: &[Float; 3], b: &[Float; 3]) -> Float {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: &[Float; 3], b: &[Float; 3]) -> [Float; 3] {
    let dx = a[1] * b[2] - a[2] * b[1];
    let dy = a[2] * b[0] - a[0] * b[2];
    let dz = a[0] * b[1] - a[1] * b[0];
    [dx, dy, dz]
}

/// Tests the intersection between a `Ray3D` and a [`Triangle`]
/// (Möller–Trumbore). Returns the distance `t` from the origin of
/// the ray to the point of intersection, and the `u` and `v`
/// baricentric coordinates of that point.
pub fn baricentric_coordinates(ray: &Ray3D, triangle: &Triangle) -> Option<(Float, Float, Float)> {
    let [ax, ay, az, bx, by, bz, cx, cy, cz] = *triangle;

    let edge1 = [bx - ax, by - ay, bz - az];
    let edge2 = [cx - ax, cy - ay, cz - az];
    let ray_direction = [ray.direction.x, ray.direction.y, ray.direction.z];
    const TINY: Float = 1e-9;
    let h = cross(&ray_direction, &edge2);
    let a = dot(&edge1, &h);

    if a.abs() < TINY {
        return None; // ray is parallel
    }
    let f = 1. / a;
    let s = [ray.origin.x - ax, ray.origin.y - ay, ray.origin.z - az];
    let u = f * dot(&s, &h);
    if !(-Float::EPSILON..=1. + Float::EPSILON).contains(&u) {
        return None;
    }
    let q = cross(&s, &edge1);
    let v = f * dot(&ray_direction, &q);
    if u + v > 1.0 + Float::EPSILON || v < -Float::EPSILON {
        return None; // intersection is outside
    }
    let t = f * dot(&edge2, &q);
    Some((t, u, v))
}

/// Intersects a `Ray3D` and a [`Triangle`], returning the distance
/// to the intersection if it happens in front of the origin
pub fn triangle_intersect(t: &Triangle, ray: &Ray3D) -> Option<Float> {
    /// Intersections closer than this are the surface the ray starts from
    const MIN_T: Float = 1e-5;
    let (t, ..) = baricentric_coordinates(ray, t)?;
    if t > MIN_T {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::Vector3D;

    fn floor() -> Triangle {
        from_points(&[
            Point3D::new(0., 0., 0.),
            Point3D::new(1., 0., 0.),
            Point3D::new(0., 1., 0.),
        ])
    }

    #[test]
    fn test_bounds() {
        let t = floor();
        let b = world_bounds(&t);
        assert!(b.min.compare(Point3D::new(0., 0., 0.)));
        assert!(b.max.compare(Point3D::new(1., 1., 0.)));
    }

    #[test]
    fn test_intersect() {
        let t = floor();

        // From above
        let ray = Ray3D::new(Point3D::new(0.2, 0.2, 1.), Vector3D::new(0., 0., -1.));
        let hit = triangle_intersect(&t, &ray);
        assert!(hit.is_some());
        assert!((hit.unwrap() - 1.).abs() < 1e-9);

        // From below, it also hits
        let ray = Ray3D::new(Point3D::new(0.2, 0.2, -2.), Vector3D::new(0., 0., 1.));
        assert!((triangle_intersect(&t, &ray).unwrap() - 2.).abs() < 1e-9);

        // Going away
        let ray = Ray3D::new(Point3D::new(0.2, 0.2, 1.), Vector3D::new(0., 0., 1.));
        assert!(triangle_intersect(&t, &ray).is_none());

        // Missing it
        let ray = Ray3D::new(Point3D::new(0.8, 0.8, 1.), Vector3D::new(0., 0., -1.));
        assert!(triangle_intersect(&t, &ray).is_none());

        // Parallel
        let ray = Ray3D::new(Point3D::new(-1., 0.2, 0.), Vector3D::new(1., 0., 0.));
        assert!(triangle_intersect(&t, &ray).is_none());

        // Starting on the surface
        let ray = Ray3D::new(Point3D::new(0.2, 0.2, 0.), Vector3D::new(0., 0.3, 1.));
        assert!(triangle_intersect(&t, &ray).is_none());
    }
}
