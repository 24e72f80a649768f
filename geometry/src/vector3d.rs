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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A direction (or displacement) in 3D space.
///
/// Multiplying two [`Vector3D`] returns their dot product.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector3D {
    /// The X component (East)
    pub x: Float,
    /// The Y component (North)
    pub y: Float,
    /// The Z component (Up)
    pub z: Float,
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3D({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

impl Vector3D {
    /// Creates a new [`Vector3D`]
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// The vertical unit vector
    pub const fn up() -> Self {
        Self::new(0., 0., 1.)
    }

    /// The squared length of the vector
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// The length of the vector
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Checks whether all the components are zero(ish)
    pub fn is_zero(&self) -> bool {
        const TINY: Float = 1e-12;
        self.length_squared() < TINY
    }

    /// Normalizes the vector in place. Zero vectors remain unchanged.
    pub fn normalize(&mut self) {
        let l = self.length();
        if l > 0.0 {
            self.x /= l;
            self.y /= l;
            self.z /= l;
        }
    }

    /// Returns a normalized copy of the vector. Zero vectors
    /// are returned unchanged.
    pub fn get_normalized(&self) -> Self {
        let mut ret = *self;
        ret.normalize();
        ret
    }

    /// The cross product between `self` and `other`
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Checks whether two vectors are equal(ish)
    pub fn compare(&self, other: Self) -> bool {
        const TINY: Float = 1e-6;
        (self.x - other.x).abs() < TINY
            && (self.y - other.y).abs() < TINY
            && (self.z - other.z).abs() < TINY
    }

    /// Rotates the vector around the vertical (Z) axis. Positive angles (in Radians)
    /// rotate clockwise when seen from above, which is the way azimuths grow
    /// (i.e., North rotated by 90 degrees points East).
    pub fn rotate_z_clockwise(&self, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos + self.y * sin,
            -self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Projects the vector onto the plane normal to `axis`
    /// (which should be normalized)
    pub fn project_onto_plane(&self, axis: Self) -> Self {
        *self - axis * (*self * axis)
    }
}

impl Mul for Vector3D {
    type Output = Float;

    fn mul(self, other: Self) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Mul<Float> for Vector3D {
    type Output = Vector3D;

    fn mul(self, s: Float) -> Vector3D {
        Vector3D::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Div<Float> for Vector3D {
    type Output = Vector3D;

    fn div(self, s: Float) -> Vector3D {
        Vector3D::new(self.x / s, self.y / s, self.z / s)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Self) -> Vector3D {
        Vector3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Self) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_dot_cross() {
        let x = Vector3D::new(1., 0., 0.);
        let y = Vector3D::new(0., 1., 0.);
        assert!((x * y).abs() < 1e-12);
        assert!(x.cross(y).compare(Vector3D::up()));
        assert!(y.cross(x).compare(-Vector3D::up()));
    }

    #[test]
    fn test_normalize() {
        let v = Vector3D::new(3., 0., 4.).get_normalized();
        assert!((v.length() - 1.).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);

        let zero = Vector3D::default();
        assert!(zero.get_normalized().is_zero());
    }

    #[test]
    fn test_rotate_z_clockwise() {
        let north = Vector3D::new(0., 1., 0.);
        let east = north.rotate_z_clockwise((90. as Float).to_radians());
        assert!(east.compare(Vector3D::new(1., 0., 0.)), "{}", east);
        let south = north.rotate_z_clockwise((180. as Float).to_radians());
        assert!(south.compare(Vector3D::new(0., -1., 0.)), "{}", south);
    }

    #[test]
    fn test_project_onto_plane() {
        let v = Vector3D::new(1., 2., 3.);
        let p = v.project_onto_plane(Vector3D::new(0., 1., 0.));
        assert!(p.compare(Vector3D::new(1., 0., 3.)));
    }
}
