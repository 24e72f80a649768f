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

use crate::{prism_triangles, Float};
use geometry::{Point3D, Vector3D};
use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

fn one() -> Float {
    1.
}

/// A structure on which collectors are installed: a roof, a frame
/// or a tower holding a receiver.
///
/// It is described as a box with its base centered at `position`
/// and rotated `rotation` degrees (clockwise, seen from above).
///
/// # Example
///
/// ```json
/// {
///     id: "tower",
///     position: {x: 0, y: 50, z: 0},
///     lx: 4, ly: 4, height: 30,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Foundation {
    /// The identifier of the foundation
    pub id: String,

    /// The world position of the centre of its base
    pub position: Point3D,

    /// The size of the foundation in its local X (East, before rotating) direction
    #[serde(default = "one")]
    pub lx: Float,

    /// The size of the foundation in its local Y (North, before rotating) direction
    #[serde(default = "one")]
    pub ly: Float,

    /// The height of the foundation. Collectors sit on top of it.
    #[serde(default)]
    pub height: Float,

    /// The rotation of the foundation, in degrees, clockwise from North
    #[serde(default)]
    pub rotation: Float,

    /// Whether this foundation casts shadows
    #[serde(default = "yes")]
    pub shadow_relevant: bool,
}

impl Foundation {
    /// Creates a new flat foundation at `position`
    pub fn new<S: Into<String>>(id: S, position: Point3D) -> Self {
        Self {
            id: id.into(),
            position,
            lx: 1.,
            ly: 1.,
            height: 0.,
            rotation: 0.,
            shadow_relevant: true,
        }
    }

    /// The centre of the top of the foundation
    pub fn top(&self) -> Point3D {
        self.position + Vector3D::new(0., 0., self.height)
    }

    /// Rotates a vector from the local axes of the foundation to the world
    pub fn rotate(&self, v: Vector3D) -> Vector3D {
        v.rotate_z_clockwise(self.rotation.to_radians())
    }

    /// Transforms a point expressed relative to the top centre of the
    /// foundation (in its local axes) into world coordinates
    pub fn to_world(&self, local: Point3D) -> Point3D {
        self.top() + self.rotate(local.as_vector3d())
    }

    /// The triangles of the box representing this foundation. Flat
    /// foundations produce no triangles.
    pub fn triangles(&self) -> Vec<[Point3D; 3]> {
        if self.height <= 0. {
            return Vec::new();
        }
        prism_triangles(self.position, self.lx, self.ly, self.height, self.rotation)
    }

    /// Checks that the data makes sense
    pub fn validate(&self) -> Result<(), String> {
        if self.lx < 0. || self.ly < 0. || self.height < 0. {
            return Err(format!(
                "Foundation '{}' has negative dimensions (lx: {}, ly: {}, height: {})",
                self.id, self.lx, self.ly, self.height
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_to_world() {
        let mut f = Foundation::new("roof", Point3D::new(10., 0., 0.));
        f.height = 3.;
        assert!(f.top().compare(Point3D::new(10., 0., 3.)));

        // Not rotated
        let p = f.to_world(Point3D::new(0., 1., 0.5));
        assert!(p.compare(Point3D::new(10., 1., 3.5)));

        // Rotated 90 degrees... north becomes east
        f.rotation = 90.;
        let p = f.to_world(Point3D::new(0., 1., 0.5));
        assert!(p.compare(Point3D::new(11., 0., 3.5)));
        let v = f.rotate(Vector3D::new(1., 0., 0.));
        assert!(v.compare(Vector3D::new(0., -1., 0.)));
    }

    #[test]
    fn test_triangles() {
        let mut f = Foundation::new("floor", Point3D::new(0., 0., 0.));
        assert!(f.triangles().is_empty());
        f.height = 10.;
        assert_eq!(f.triangles().len(), 12);
    }

    #[test]
    fn serde() -> Result<(), String> {
        let f: Foundation = json5::from_str(
            "{
            id: 'tower',
            position: {x: 0, y: 50, z: 0},
            height: 30,
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(f.lx, 1.);
        assert!(f.shadow_relevant);
        assert!(f.validate().is_ok());
        Ok(())
    }
}
