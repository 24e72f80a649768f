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
use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

/// Builds the 12 triangles of a box with its base centered
/// at `base`, rotated `rotation` degrees clockwise from North.
pub fn prism_triangles(
    base: Point3D,
    lx: Float,
    ly: Float,
    height: Float,
    rotation: Float,
) -> Vec<[Point3D; 3]> {
    let angle = rotation.to_radians();
    let corner = |x: Float, y: Float, z: Float| -> Point3D {
        base + Vector3D::new(x, y, z).rotate_z_clockwise(angle)
    };
    let (hx, hy) = (lx / 2., ly / 2.);
    // Bottom ring, then top ring (counterclockwise seen from above)
    let c = [
        corner(-hx, -hy, 0.),
        corner(hx, -hy, 0.),
        corner(hx, hy, 0.),
        corner(-hx, hy, 0.),
        corner(-hx, -hy, height),
        corner(hx, -hy, height),
        corner(hx, hy, height),
        corner(-hx, hy, height),
    ];
    let mut ret = vec![
        // bottom
        [c[0], c[2], c[1]],
        [c[0], c[3], c[2]],
        // top
        [c[4], c[5], c[6]],
        [c[4], c[6], c[7]],
    ];
    // sides
    for i in 0..4 {
        let j = (i + 1) % 4;
        ret.push([c[i], c[j], c[j + 4]]);
        ret.push([c[i], c[j + 4], c[i + 4]]);
    }
    ret
}

/// The geometry of an [`Obstacle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObstacleShape {
    /// A box with its base centered at `position`
    Box {
        /// The centre of the base
        position: Point3D,
        /// Size in the X direction (before rotating)
        lx: Float,
        /// Size in the Y direction (before rotating)
        ly: Float,
        /// Height of the box
        height: Float,
        /// Rotation, in degrees, clockwise from North
        #[serde(default)]
        rotation: Float,
    },

    /// An explicit list of triangles
    Triangles {
        /// The vertices of each triangle
        triangles: Vec<[Point3D; 3]>,
    },
}

/// Opaque geometry in the scene (e.g., trees, buildings, walls)
///
/// # Example
///
/// ```json
/// {
///     id: "neighbour",
///     shape: {
///         type: "Box",
///         position: {x: 0, y: -10, z: 0},
///         lx: 20, ly: 5, height: 12
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Obstacle {
    /// The identifier of the obstacle
    pub id: String,

    /// The geometry of the obstacle
    pub shape: ObstacleShape,

    /// Whether this obstacle is considered when calculating shadows
    #[serde(default = "yes")]
    pub shadow_relevant: bool,
}

impl Obstacle {
    /// The triangles of this obstacle
    pub fn triangles(&self) -> Vec<[Point3D; 3]> {
        match &self.shape {
            ObstacleShape::Box {
                position,
                lx,
                ly,
                height,
                rotation,
            } => prism_triangles(*position, *lx, *ly, *height, *rotation),
            ObstacleShape::Triangles { triangles } => triangles.clone(),
        }
    }

    /// Checks that the data makes sense
    pub fn validate(&self) -> Result<(), String> {
        match &self.shape {
            ObstacleShape::Box { lx, ly, height, .. } => {
                if *lx <= 0. || *ly <= 0. || *height <= 0. {
                    return Err(format!(
                        "Box Obstacle '{}' needs positive dimensions (lx: {}, ly: {}, height: {})",
                        self.id, lx, ly, height
                    ));
                }
            }
            ObstacleShape::Triangles { triangles } => {
                if triangles.is_empty() {
                    return Err(format!("Obstacle '{}' has no triangles", self.id));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_prism_normals_point_out() {
        let base = Point3D::new(1., 2., 0.);
        let tris = prism_triangles(base, 2., 4., 3., 30.);
        assert_eq!(tris.len(), 12);
        let centre = base + Vector3D::new(0., 0., 1.5);
        for [a, b, c] in tris {
            let normal = (b - a).cross(c - a);
            let outwards = a - centre;
            assert!(normal * outwards > 0.);
        }
    }

    #[test]
    fn serde() -> Result<(), String> {
        let o: Obstacle = json5::from_str(
            "{
            id: 'wall',
            shape: {
                type: 'Triangles',
                triangles: [
                    [{x: 0, y: 0, z: 0}, {x: 1, y: 0, z: 0}, {x: 1, y: 0, z: 1}],
                ],
            }
        }",
        )
        .map_err(|e| e.to_string())?;
        assert!(o.shadow_relevant);
        assert_eq!(o.triangles().len(), 1);

        let o: Obstacle = json5::from_str(
            "{
            id: 'tree',
            shadow_relevant: false,
            shape: { type: 'Box', position: {x: 0, y: 0, z: 0}, lx: 1, ly: 1, height: 0 },
        }",
        )
        .map_err(|e| e.to_string())?;
        assert!(!o.shadow_relevant);
        assert!(o.validate().is_err());
        Ok(())
    }
}
