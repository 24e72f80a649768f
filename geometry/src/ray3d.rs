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

use crate::{Float, Point3D, Vector3D};

/// A half-line starting at an `origin` and extending
/// infinitely along a `direction`
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Ray3D {
    /// The point at which the ray starts
    pub origin: Point3D,
    /// The direction of the ray. It is expected to be normalized.
    pub direction: Vector3D,
}

impl Ray3D {
    /// Creates a new [`Ray3D`], normalizing the direction
    pub fn new(origin: Point3D, direction: Vector3D) -> Self {
        Self {
            origin,
            direction: direction.get_normalized(),
        }
    }

    /// The point at a distance `t` from the origin
    pub fn project(&self, t: Float) -> Point3D {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_project() {
        let ray = Ray3D::new(Point3D::new(0., 0., 1.), Vector3D::new(0., 0., 2.));
        assert!(ray.project(2.).compare(Point3D::new(0., 0., 3.)));
    }
}
