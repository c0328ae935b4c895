//! Mesh integration hooks: a bounds-and-filter component the host
//! stores alongside a mesh handle (replacing the source's weakly-keyed
//! side table, per the design notes on item ownership), and a
//! coarse meshlet raycast for mesh-backed collision shapes.
//!
//! Triangle-accurate mesh narrow phase is out of scope; the only
//! narrow-phase-adjacent query a mesh shape offers is this raycast.

use std::collections::HashMap;
use std::hash::Hash;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::filter::CollisionFilter;
use crate::shape::{Aabb, Capsule, Ray, Sphere};
use crate::Real;

/// The bounds and filter a host associates with one mesh object.
///
/// Stored by the host in its own table (e.g. `HashMap<MeshId,
/// MeshCollider>`) rather than in a process-wide side table keyed
/// weakly by the mesh itself.
#[derive(Debug, Clone, Copy)]
pub struct MeshCollider {
    /// World-space bounding box of the mesh.
    pub bounds: Aabb,
    /// Collision filter; defaults to [`CollisionFilter::default`] when
    /// the host never set one.
    pub filter: CollisionFilter,
}

impl MeshCollider {
    /// A mesh collider with the default (match-everything, solid)
    /// filter.
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds, filter: CollisionFilter::default() }
    }

    /// A mesh collider with an explicit filter.
    pub fn with_filter(bounds: Aabb, filter: CollisionFilter) -> Self {
        Self { bounds, filter }
    }
}

/// Build a `bounds_of` closure for [`crate::world::World::update`]
/// from a host's `item -> MeshCollider` table.
pub fn bounds_adapter<T>(components: &HashMap<T, MeshCollider>) -> impl Fn(&T) -> Aabb + '_
where
    T: Eq + Hash,
{
    move |id| components[id].bounds
}

/// Build a `filter_of` closure for [`crate::world::World::update`]
/// from the same table. Items absent from `components` resolve to
/// the default filter, matching the contract for a null filter.
pub fn filter_adapter<T>(components: &HashMap<T, MeshCollider>) -> impl Fn(&T) -> Option<CollisionFilter> + '_
where
    T: Eq + Hash,
{
    move |id| components.get(id).map(|c| c.filter)
}

/// One coarse sub-bound of a mesh-backed shape: a bounding box plus
/// an optional cone of normals (axis + cosine cutoff) used to reject
/// back-facing meshlets before the more expensive AABB slab test.
#[derive(Debug, Clone, Copy)]
pub struct Meshlet {
    /// Bounding box of the meshlet's triangles.
    pub bounds: Aabb,
    /// Unit cone axis, or `None` if the source mesh carried no cone
    /// data for this meshlet.
    pub cone_axis: Option<Vector3<Real>>,
    /// Cosine of the cone's half-angle; a ray facing the meshlet
    /// passes when `cone_axis.dot(-ray.direction()) >= cone_cutoff`.
    pub cone_cutoff: Real,
}

/// The result of [`MeshShape::raycast`]: the nearest hit distance and
/// an approximate surface normal.
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Distance along the ray to the hit.
    pub distance: Real,
    /// Approximate normal: the hit meshlet's cone axis, or the
    /// nearest AABB face normal when the meshlet has none.
    pub normal: Vector3<Real>,
}

/// A mesh-backed collision shape: a world bounding box plus a list of
/// meshlet sub-bounds for the coarse raycast. Never consulted by the
/// narrow phase directly — mesh-vs-mesh and mesh-vs-primitive contact
/// generation are out of scope; only bounds and raycast queries are
/// offered.
#[derive(Debug, Clone)]
pub struct MeshShape {
    world_bounds: Aabb,
    meshlets: Vec<Meshlet>,
}

impl MeshShape {
    /// Build a mesh shape from its meshlets. The world bounds are the
    /// union of every meshlet's bounds; an empty meshlet list yields
    /// a degenerate point bound at the origin.
    pub fn new(meshlets: Vec<Meshlet>) -> Self {
        let world_bounds = meshlets
            .iter()
            .fold(None, |acc: Option<Aabb>, m| Some(match acc {
                Some(a) => a.union(&m.bounds),
                None => m.bounds,
            }))
            .unwrap_or_else(|| Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)).unwrap());
        Self { world_bounds, meshlets }
    }

    /// World-space bounding box of the whole mesh.
    pub fn bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Coarse ray query: walk every meshlet, reject back-facing ones
    /// via their cone (when present), AABB-test the rest, and return
    /// the nearest hit.
    pub fn raycast(&self, ray: &Ray) -> Option<MeshHit> {
        let mut best: Option<MeshHit> = None;
        for meshlet in &self.meshlets {
            if let Some(axis) = meshlet.cone_axis {
                if axis.dot(-ray.direction()) < meshlet.cone_cutoff {
                    continue;
                }
            }
            let t = match meshlet.bounds.raycast(ray) {
                Some(t) => t,
                None => continue,
            };
            let improves = match &best {
                Some(h) => t < h.distance,
                None => true,
            };
            if !improves {
                continue;
            }
            let normal = meshlet.cone_axis.unwrap_or_else(|| aabb_face_normal(&meshlet.bounds, ray.at(t)));
            best = Some(MeshHit { distance: t, normal });
        }
        best
    }
}

/// A uniform handle over every concrete shape this crate offers a
/// world-bounds/raycast contract for, so a host can store
/// heterogeneous collidables behind one type without reaching for a
/// `dyn Support` trait object.
///
/// Only the shapes this crate actually generates contacts for are
/// represented; there is no cylinder, plane, convex-hull, or
/// heightfield variant, since the narrow phase has no contact
/// generator for them.
#[derive(Debug, Clone)]
pub enum CollisionShape {
    Aabb(Aabb),
    Sphere(Sphere),
    Capsule(Capsule),
    Mesh(MeshShape),
}

impl CollisionShape {
    /// World-space bounding box, dispatched to the wrapped shape.
    pub fn bounds(&self) -> Aabb {
        match self {
            CollisionShape::Aabb(shape) => *shape,
            CollisionShape::Sphere(shape) => shape.bound(),
            CollisionShape::Capsule(shape) => shape.bound(),
            CollisionShape::Mesh(shape) => shape.bounds(),
        }
    }

    /// Nearest hit distance of `ray` against the wrapped shape, or
    /// `None` on a miss.
    pub fn raycast(&self, ray: &Ray) -> Option<Real> {
        match self {
            CollisionShape::Aabb(shape) => shape.raycast(ray),
            CollisionShape::Sphere(shape) => shape.raycast(ray),
            CollisionShape::Capsule(shape) => shape.raycast(ray),
            CollisionShape::Mesh(shape) => shape.raycast(ray).map(|hit| hit.distance),
        }
    }
}

fn aabb_face_normal(aabb: &Aabb, point: Point3<Real>) -> Vector3<Real> {
    let candidates = [
        ((point.x - aabb.min().x).abs(), Vector3::new(-1.0, 0.0, 0.0)),
        ((point.x - aabb.max().x).abs(), Vector3::new(1.0, 0.0, 0.0)),
        ((point.y - aabb.min().y).abs(), Vector3::new(0.0, -1.0, 0.0)),
        ((point.y - aabb.max().y).abs(), Vector3::new(0.0, 1.0, 0.0)),
        ((point.z - aabb.min().z).abs(), Vector3::new(0.0, 0.0, -1.0)),
        ((point.z - aabb.max().z).abs(), Vector3::new(0.0, 0.0, 1.0)),
    ];
    candidates.into_iter().fold(candidates[0], |best, cur| if cur.0 < best.0 { cur } else { best }).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(min: (Real, Real, Real), max: (Real, Real, Real)) -> Aabb {
        Aabb::new(Point3::new(min.0, min.1, min.2), Point3::new(max.0, max.1, max.2)).unwrap()
    }

    #[test]
    fn bounds_and_filter_adapters_bridge_host_table() {
        let mut table = HashMap::new();
        table.insert(1u32, MeshCollider::new(aabb((0.0, 0.0, 0.0), (1.0, 1.0, 1.0))));

        let bounds_of = bounds_adapter(&table);
        let filter_of = filter_adapter(&table);

        assert_eq!(bounds_of(&1), aabb((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)));
        assert_eq!(filter_of(&1), Some(CollisionFilter::default()));
        assert_eq!(filter_of(&2), None);
    }

    #[test]
    fn raycast_hits_nearest_meshlet() {
        let near = Meshlet { bounds: aabb((1.0, -1.0, -1.0), (2.0, 1.0, 1.0)), cone_axis: None, cone_cutoff: 0.0 };
        let far = Meshlet { bounds: aabb((5.0, -1.0, -1.0), (6.0, 1.0, 1.0)), cone_axis: None, cone_cutoff: 0.0 };
        let mesh = MeshShape::new(vec![far, near]);

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let hit = mesh.raycast(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cone_axis_rejects_backfacing_meshlet() {
        let backfacing = Meshlet {
            bounds: aabb((1.0, -1.0, -1.0), (2.0, 1.0, 1.0)),
            cone_axis: Some(Vector3::new(-1.0, 0.0, 0.0)),
            cone_cutoff: 0.9,
        };
        let mesh = MeshShape::new(vec![backfacing]);

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(mesh.raycast(&ray).is_none());
    }

    #[test]
    fn cone_axis_accepts_facing_meshlet_and_reports_its_normal() {
        let facing = Meshlet {
            bounds: aabb((1.0, -1.0, -1.0), (2.0, 1.0, 1.0)),
            cone_axis: Some(Vector3::new(1.0, 0.0, 0.0)),
            cone_cutoff: 0.9,
        };
        let mesh = MeshShape::new(vec![facing]);

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let hit = mesh.raycast(&ray).unwrap();
        assert_eq!(hit.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn missing_cone_falls_back_to_aabb_face_normal() {
        let meshlet = Meshlet { bounds: aabb((1.0, -1.0, -1.0), (2.0, 1.0, 1.0)), cone_axis: None, cone_cutoff: 0.0 };
        let mesh = MeshShape::new(vec![meshlet]);

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let hit = mesh.raycast(&ray).unwrap();
        assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn empty_meshlet_list_yields_degenerate_bounds() {
        let mesh = MeshShape::new(Vec::new());
        assert_eq!(mesh.bounds().min(), mesh.bounds().max());
    }

    #[test]
    fn collision_shape_dispatches_bounds_and_raycast_by_variant() {
        let sphere = CollisionShape::Sphere(Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).unwrap());
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)).unwrap();

        assert_eq!(sphere.bounds(), aabb((-1.0, -1.0, -1.0), (1.0, 1.0, 1.0)));
        assert!((sphere.raycast(&ray).unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn collision_shape_mesh_variant_reports_nearest_distance() {
        let meshlet = Meshlet { bounds: aabb((1.0, -1.0, -1.0), (2.0, 1.0, 1.0)), cone_axis: None, cone_cutoff: 0.0 };
        let shape = CollisionShape::Mesh(MeshShape::new(vec![meshlet]));

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((shape.raycast(&ray).unwrap() - 1.0).abs() < 1e-5);
    }
}
