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

use crate::{Float, Vector3D};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point in 3D space
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// The X component (East)
    pub x: Float,
    /// The Y component (North)
    pub y: Float,
    /// The Z component (Up)
    pub z: Float,
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3D({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

impl Point3D {
    /// Creates a new [`Point3D`]
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Calculates the squared distance to another point
    pub fn squared_distance(&self, other: Self) -> Float {
        (*self - other).length_squared()
    }

    /// Calculates the distance to another point
    pub fn distance(&self, other: Self) -> Float {
        self.squared_distance(other).sqrt()
    }

    /// Checks whether two points are equal(ish)
    pub fn compare(&self, other: Self) -> bool {
        const TINY: Float = 1e-6;
        (self.x - other.x).abs() < TINY
            && (self.y - other.y).abs() < TINY
            && (self.z - other.z).abs() < TINY
    }

    /// Transforms the point into a [`Vector3D`] going from the origin
    /// to it
    pub fn as_vector3d(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, v: Vector3D) -> Point3D {
        Point3D::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vector3D> for Point3D {
    fn add_assign(&mut self, v: Vector3D) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }
}

impl Sub<Vector3D> for Point3D {
    type Output = Point3D;

    fn sub(self, v: Vector3D) -> Point3D {
        Point3D::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, other: Point3D) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, other: Point3D) -> Point3D {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<Float> for Point3D {
    type Output = Point3D;

    fn mul(self, s: Float) -> Point3D {
        Point3D::new(self.x * s, self.y * s, self.z * s)
    }
}
