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

use crate::bvh::{BoundingVolumeTree, MAX_DEPTH};
use crate::triangle::{from_points, Triangle};
use crate::Float;
use geometry::{Point3D, Ray3D, Vector3D};

/// A reference to an opaque object in a scene
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CasterHandle {
    /// The identifier of the object
    pub id: String,
}

impl CasterHandle {
    /// Creates a new handle
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into() }
    }
}

/// Something that contains objects that cast shadows (e.g., a scene).
pub trait ShadowSource {
    /// Lists all the objects that are relevant for shadow calculations
    fn shadow_casters(&self) -> Vec<CasterHandle>;

    /// The current geometry of an object. Objects that are not
    /// found, or that have no volume, return an empty vector.
    fn caster_triangles(&self, handle: &CasterHandle) -> Vec<[Point3D; 3]>;
}

/// Answers whether points in a scene can see a certain direction.
///
/// The list of objects is captured once (see [`OcclusionTester::snapshot`]);
/// objects added or removed afterwards are ignored. The geometry of
/// those objects, however, can be updated by calling [`OcclusionTester::refresh`].
#[derive(Debug, Default, Clone)]
pub struct OcclusionTester {
    handles: Vec<CasterHandle>,
    triangles: Vec<Triangle>,
    owners: Vec<usize>,
    bvh: BoundingVolumeTree,
}

impl OcclusionTester {
    /// Captures all the shadow casters in `source`, and builds the acceleration structure
    pub fn snapshot<S: ShadowSource + ?Sized>(source: &S) -> Self {
        let mut ret = Self {
            handles: source.shadow_casters(),
            ..Self::default()
        };
        ret.refresh(source);
        ret
    }

    /// Reads the current geometry of the captured casters again, and
    /// rebuilds the acceleration structure
    pub fn refresh<S: ShadowSource + ?Sized>(&mut self, source: &S) {
        self.triangles.clear();
        self.owners.clear();
        for (owner, handle) in self.handles.iter().enumerate() {
            for vertices in source.caster_triangles(handle) {
                self.triangles.push(from_points(&vertices));
                self.owners.push(owner);
            }
        }
        self.bvh = BoundingVolumeTree::new(&mut self.triangles, &mut self.owners);
        tracing::debug!(
            n_casters = self.handles.len(),
            n_triangles = self.triangles.len(),
            "built shadow snapshot"
        );
    }

    /// The number of captured casters
    pub fn n_casters(&self) -> usize {
        self.handles.len()
    }

    /// The number of triangles in the snapshot
    pub fn n_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Finds the owner index of a caster by its id, if it was captured
    pub fn owner_of(&self, id: &str) -> Option<usize> {
        self.handles.iter().position(|h| h.id == id)
    }

    fn any_hit(&self, ray: &Ray3D, max_distance: Float, ignore: &[usize]) -> bool {
        let mut nodes_to_visit = [0; MAX_DEPTH + 4];
        self.bvh.any_hit(
            &self.triangles,
            &self.owners,
            ray,
            max_distance,
            ignore,
            &mut nodes_to_visit,
        )
    }

    /// Checks whether anything blocks the view from `point` in a
    /// certain `direction`, ignoring the geometry of `self_owner`.
    ///
    /// Whatever is in that direction (e.g., the sun) is assumed to be
    /// infinitely far, so any intersection blocks it. Scenes with fewer
    /// than two casters cannot shade themselves.
    pub fn is_occluded(
        &self,
        self_owner: Option<usize>,
        point: Point3D,
        direction: Vector3D,
    ) -> bool {
        if self.handles.len() < 2 || direction.is_zero() {
            return false;
        }
        let ray = Ray3D::new(point, direction);
        match self_owner {
            Some(o) => self.any_hit(&ray, Float::MAX, &[o]),
            None => self.any_hit(&ray, Float::MAX, &[]),
        }
    }

    /// Checks whether anything blocks the segment between `point` and
    /// `target`. The geometry of `self_owner` and of `target_owner`
    /// (e.g., the tower holding a receiver) is ignored.
    pub fn is_occluded_towards(
        &self,
        self_owner: Option<usize>,
        point: Point3D,
        target: Point3D,
        target_owner: Option<usize>,
    ) -> bool {
        if self.handles.len() < 2 {
            return false;
        }
        let direction = target - point;
        let distance = direction.length();
        if distance < 1e-9 {
            return false;
        }
        let ray = Ray3D::new(point, direction);
        let mut ignore = [0; 2];
        let mut n = 0;
        for owner in [self_owner, target_owner].into_iter().flatten() {
            ignore[n] = owner;
            n += 1;
        }
        // hits at the target itself do not count
        self.any_hit(&ray, distance * (1. - 1e-6), &ignore[..n])
    }
}
