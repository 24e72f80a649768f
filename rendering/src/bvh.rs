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

/*
THIS CODE IS HEAVILY INSPIRED IN
Physically Based Rendering: From Theory To Implementation, © 2004-2021 Matt Pharr, Wenzel Jakob, and Greg Humphreys
https://pbr-book.org/3ed-2018/Primitives_and_Intersection_Acceleration/Bounding_Volume_Hierarchies
 */

use crate::triangle::{triangle_intersect, world_bounds, Triangle};
use crate::Float;
use geometry::{BBox3D, BBoxAxis, Point3D, Ray3D, Vector3D};
use std::cmp::Ordering;

/// The maximum number of triangles in a leaf, unless they cannot be split
const LEAF_SIZE: usize = 4;

/// The maximum depth of the tree. It bounds the size of the stack
/// needed for traversing it.
pub(crate) const MAX_DEPTH: usize = 60;

#[derive(Copy, Clone)]
struct BucketInfo {
    count: usize,
    bounds: Option<BBox3D>,
}

fn get_bucket_index(
    centroid: Point3D,
    len_axis: Float,
    split_axis: BBoxAxis,
    n_buckets: usize,
    min_centroid: Point3D,
) -> usize {
    // Identify which bucket contains this object's centroid
    let (centroid_pos, min) = match split_axis {
        BBoxAxis::X => (centroid.x, min_centroid.x),
        BBoxAxis::Y => (centroid.y, min_centroid.y),
        BBoxAxis::Z => (centroid.z, min_centroid.z),
    };
    let bucket_index = ((centroid_pos - min) * n_buckets as Float / len_axis).floor() as usize;
    debug_assert!(bucket_index <= n_buckets);
    // In the upper limit, this can happen
    bucket_index.min(n_buckets - 1)
}

/// A struct that is instrumental for building the  `BoundingVolumeTree`
struct ObjectInfo {
    index: usize,
    bounds: BBox3D,
    centroid: Point3D,
}

impl ObjectInfo {
    fn new(triangles: &[Triangle], index: usize) -> Self {
        let bounds = world_bounds(&triangles[index]);
        let centroid = bounds.centroid();
        Self {
            index,
            bounds,
            centroid,
        }
    }
}

struct Interior {
    bounds: BBox3D,
    split_axis: BBoxAxis,
    children: (Box<Node>, Box<Node>),
}

struct Leaf {
    bounds: BBox3D,
    n_prims: usize,
    first_prim_offset: usize,
}

enum Node {
    Interior(Interior),
    Leaf(Leaf),
}

/// Where the triangles are put, in the order of the leaves
struct Ordered {
    triangles: Vec<Triangle>,
    owners: Vec<usize>,
}

impl Ordered {
    fn push_leaf(
        &mut self,
        triangles: &[Triangle],
        owners: &[usize],
        infos: &[ObjectInfo],
        bounds: BBox3D,
    ) -> Node {
        let first_prim_offset = self.triangles.len();
        for info in infos {
            self.triangles.push(triangles[info.index]);
            self.owners.push(owners[info.index]);
        }
        Node::Leaf(Leaf {
            bounds,
            first_prim_offset,
            n_prims: infos.len(),
        })
    }
}

impl Node {
    fn bounds(&self) -> BBox3D {
        match self {
            Self::Leaf(l) => l.bounds,
            Self::Interior(i) => i.bounds,
        }
    }

    fn new_interior(split_axis: BBoxAxis, child1: Node, child2: Node) -> Self {
        let bounds = BBox3D::from_union(&child1.bounds(), &child2.bounds());

        Self::Interior(Interior {
            bounds,
            split_axis,
            children: (Box::new(child1), Box::new(child2)),
        })
    }

    fn recursive_build(
        triangles: &[Triangle],
        owners: &[usize],
        primitives_info: &mut [ObjectInfo],
        depth: usize,
        total_nodes: &mut usize,
        ordered: &mut Ordered,
    ) -> Self {
        debug_assert!(!primitives_info.is_empty());
        *total_nodes += 1;

        // Get a BBOX containing EVERYTHING within scope
        let mut bounds = primitives_info[0].bounds;
        for info in primitives_info.iter().skip(1) {
            bounds = BBox3D::from_union(&bounds, &info.bounds);
        }
        let n_primitives = primitives_info.len();
        if n_primitives == 1 || depth >= MAX_DEPTH {
            return ordered.push_leaf(triangles, owners, primitives_info, bounds);
        }

        // Calculate the the BBOX of the centroids
        let mut centroids_bbox = BBox3D::from_point(primitives_info[0].centroid);
        for prim_info in primitives_info.iter().skip(1) {
            centroids_bbox = BBox3D::from_union_point(&centroids_bbox, prim_info.centroid);
        }

        let split_axis = centroids_bbox.max_extent();
        // the extent of the centroids in the largest dimension
        let len_axis = match split_axis {
            BBoxAxis::X => centroids_bbox.max.x - centroids_bbox.min.x,
            BBoxAxis::Y => centroids_bbox.max.y - centroids_bbox.min.y,
            BBoxAxis::Z => centroids_bbox.max.z - centroids_bbox.min.z,
        };
        let cmp_centroids = |a: &ObjectInfo, b: &ObjectInfo| -> Ordering {
            let (a, b) = match split_axis {
                BBoxAxis::X => (a.centroid.x, b.centroid.x),
                BBoxAxis::Y => (a.centroid.y, b.centroid.y),
                BBoxAxis::Z => (a.centroid.z, b.centroid.z),
            };
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        };

        const TOO_FEW_TO_BUCKET: usize = 4;
        const N_BUCKETS: usize = 12;
        const RELATIVE_TRANSVERSAL_COST: Float = 0.125;

        if len_axis < 1e-8 {
            // All primitives seem to be aligned in all directions (i.e., overlapping)
            // Put them al together in a Leaf
            return ordered.push_leaf(triangles, owners, primitives_info, bounds);
        }

        let mid = if n_primitives <= TOO_FEW_TO_BUCKET {
            // too few... just split in half
            let mid = n_primitives / 2;
            primitives_info.select_nth_unstable_by(mid, cmp_centroids);
            mid
        } else {
            // Use the Surface Area Heuristic... First, put all the elements in a bucket
            let mut buckets = [BucketInfo {
                count: 0,
                bounds: None,
            }; N_BUCKETS];

            for prim_info in primitives_info.iter() {
                let bucket_index = get_bucket_index(
                    prim_info.centroid,
                    len_axis,
                    split_axis,
                    N_BUCKETS,
                    centroids_bbox.min,
                );
                let bucket = &mut buckets[bucket_index];
                bucket.count += 1;
                bucket.bounds = match bucket.bounds {
                    Some(b) => Some(BBox3D::from_union(&b, &prim_info.bounds)),
                    None => Some(prim_info.bounds),
                };
            }

            // Compute costs of splitting after each bucket
            let mut min_cost = Float::MAX;
            let mut min_cost_bucket = 0;
            for i in 0..N_BUCKETS - 1 {
                let mut before: Option<BBox3D> = None;
                let mut count_before = 0;
                for b in buckets.iter().take(i + 1) {
                    if let Some(bb) = &b.bounds {
                        before = Some(before.map_or(*bb, |x| BBox3D::from_union(&x, bb)));
                        count_before += b.count;
                    }
                }
                let mut after: Option<BBox3D> = None;
                let mut count_after = 0;
                for b in buckets.iter().skip(i + 1) {
                    if let Some(bb) = &b.bounds {
                        after = Some(after.map_or(*bb, |x| BBox3D::from_union(&x, bb)));
                        count_after += b.count;
                    }
                }
                let area = |b: Option<BBox3D>| b.map_or(0., |b| b.surface_area());
                let c = RELATIVE_TRANSVERSAL_COST
                    + (count_before as Float * area(before) + count_after as Float * area(after))
                        / bounds.surface_area().max(Float::EPSILON);
                if c < min_cost {
                    min_cost = c;
                    min_cost_bucket = i;
                }
            }

            // Decide whether to keep splitting or not.
            let leaf_cost = n_primitives as Float;
            if n_primitives <= LEAF_SIZE && min_cost >= leaf_cost {
                return ordered.push_leaf(triangles, owners, primitives_info, bounds);
            }

            // Sort based on centroid position, and split after the chosen bucket
            primitives_info.sort_unstable_by(cmp_centroids);
            let n_before = primitives_info
                .iter()
                .take_while(|info| {
                    get_bucket_index(
                        info.centroid,
                        len_axis,
                        split_axis,
                        N_BUCKETS,
                        centroids_bbox.min,
                    ) <= min_cost_bucket
                })
                .count();
            if n_before == 0 || n_before == n_primitives {
                n_primitives / 2
            } else {
                n_before
            }
        };

        // If we have not returned a Leaf yet... split!
        let (first, second) = primitives_info.split_at_mut(mid);
        let child1 =
            Self::recursive_build(triangles, owners, first, depth + 1, total_nodes, ordered);
        let child2 =
            Self::recursive_build(triangles, owners, second, depth + 1, total_nodes, ordered);
        Node::new_interior(split_axis, child1, child2)
    }
}

#[derive(Clone, Debug)]
struct FlatNode {
    /// The Bounding Box of this node
    bounds: BBox3D,
    /// The number of primitives in the node. Interior Nodes
    /// have Zero; Leafs should always have more
    n_prims: u32,
    /// The axis in which this was split. This value should
    /// not be used in leafs
    axis: BBoxAxis,
    /// The 'next' node to check. This is the equivalent to
    /// what in PBR is called `primitivesOffset` for Leafs, and
    /// `secondChildOffset` for Interior nodes
    next: usize,
}

impl FlatNode {
    fn is_leaf(&self) -> bool {
        self.n_prims > 0
    }
}

/// A Bounding Volume Hierarchy over a soup of triangles, each of
/// them belonging to an owner.
#[derive(Debug, Default, Clone)]
pub struct BoundingVolumeTree {
    nodes: Vec<FlatNode>,
}

impl BoundingVolumeTree {
    /// Builds the tree, reordering the `triangles` and their `owners` so that
    /// the triangles within each leaf are contiguous.
    pub fn new(triangles: &mut Vec<Triangle>, owners: &mut Vec<usize>) -> Self {
        debug_assert_eq!(triangles.len(), owners.len());
        let n_objects = triangles.len();
        if n_objects == 0 {
            return Self::default();
        }

        /*
        STEP 1:  First, bounding information about each primitive is computed and
        stored in an array that will be used during tree construction
        */
        let mut primitives_info: Vec<ObjectInfo> = (0..n_objects)
            .map(|i| ObjectInfo::new(triangles, i))
            .collect();

        /*
        STEP 2:  Next, the tree is built. The result is a binary tree where
        each interior node holds pointers to its children and each
        leaf node holds references to one or more primitives.
        */
        let mut total_nodes = 0;
        let mut ordered = Ordered {
            triangles: Vec::with_capacity(n_objects),
            owners: Vec::with_capacity(n_objects),
        };
        let root = Node::recursive_build(
            triangles,
            owners,
            &mut primitives_info,
            0,
            &mut total_nodes,
            &mut ordered,
        );
        *triangles = ordered.triangles;
        *owners = ordered.owners;

        /*
        STEP 3: Finally, this tree is converted to a more compact
        (and thus more efficient) pointerless representation.
        */
        let mut nodes: Vec<FlatNode> = Vec::with_capacity(total_nodes);
        Self::flatten_node(&root, &mut nodes);
        Self { nodes }
    }

    fn flatten_node(node: &Node, nodes: &mut Vec<FlatNode>) -> usize {
        let this_offset = nodes.len();
        match node {
            Node::Leaf(l) => {
                nodes.push(FlatNode {
                    bounds: l.bounds,
                    n_prims: l.n_prims as u32,
                    next: l.first_prim_offset,
                    axis: BBoxAxis::X, // We won't use this
                });
            }
            Node::Interior(i) => {
                let (child1, child2) = &i.children;
                nodes.push(FlatNode {
                    bounds: i.bounds,
                    n_prims: 0,
                    next: 0, // We will patch this
                    axis: i.split_axis,
                });
                Self::flatten_node(child1, nodes);
                // Patch second offset
                nodes[this_offset].next = Self::flatten_node(child2, nodes);
            }
        }
        this_offset
    }

    /// The number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    fn pop_node<const N: usize>(&self, stack_size: &mut usize, stack: &[usize; N]) -> Option<usize> {
        if *stack_size == 0 {
            None
        } else {
            let v = stack[*stack_size - 1];
            *stack_size -= 1;
            Some(v)
        }
    }

    #[inline(always)]
    fn push_node<const N: usize>(&self, stack_size: &mut usize, stack: &mut [usize; N], v: usize) {
        stack[*stack_size] = v;
        *stack_size += 1;
    }

    /// Checks whether a ray hits any of the `triangles` at a distance shorter
    /// than `max_distance`, ignoring the triangles whose owner is in `ignore`.
    ///
    /// The `triangles` and `owners` are the ones reordered when building
    /// the tree. `N` needs to be larger than the depth of the tree.
    pub fn any_hit<const N: usize>(
        &self,
        triangles: &[Triangle],
        owners: &[usize],
        ray: &Ray3D,
        max_distance: Float,
        ignore: &[usize],
        nodes_to_visit: &mut [usize; N],
    ) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let mut stack_size = 0;

        let inv_dir = Vector3D::new(
            1. / ray.direction.x,
            1. / ray.direction.y,
            1. / ray.direction.z,
        );
        let dir_is_neg = (inv_dir.x < 0., inv_dir.y < 0., inv_dir.z < 0.);
        let mut current_node = 0;

        loop {
            let node = &self.nodes[current_node];
            if node.bounds.intersect(ray, &inv_dir) {
                if node.is_leaf() {
                    // Check all the objects in this Node
                    let ini = node.next;
                    let fin = ini + node.n_prims as usize;
                    for i in ini..fin {
                        if ignore.contains(&owners[i]) {
                            continue;
                        }
                        if let Some(t) = triangle_intersect(&triangles[i], ray) {
                            if t < max_distance {
                                return true;
                            }
                        }
                    }

                    if let Some(i) = self.pop_node(&mut stack_size, nodes_to_visit) {
                        current_node = i;
                    } else {
                        break;
                    }
                } else {
                    // is interior... choose first or second child,
                    // add to the stack
                    let is_neg = match node.axis {
                        BBoxAxis::X => dir_is_neg.0,
                        BBoxAxis::Y => dir_is_neg.1,
                        BBoxAxis::Z => dir_is_neg.2,
                    };
                    if is_neg {
                        self.push_node(&mut stack_size, nodes_to_visit, current_node + 1);
                        current_node = node.next;
                    } else {
                        self.push_node(&mut stack_size, nodes_to_visit, node.next);
                        current_node += 1;
                    }
                }
            } else if let Some(i) = self.pop_node(&mut stack_size, nodes_to_visit) {
                current_node = i;
            } else {
                break;
            }
        } // End loop

        false
    }
}
