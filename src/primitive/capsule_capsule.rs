use crate::narrow::ContactManifold3D;
use crate::primitive::common::sphere_like_contact;
use crate::shape::capsule::closest_segment_segment;
use crate::shape::Capsule;

/// Capsule-vs-capsule contact generation: reduce to the closest-point
/// problem between the two segments, then resolve as two spheres at
/// those points.
pub fn contact(a: &Capsule, b: &Capsule) -> Option<ContactManifold3D> {
    let (pa, pb) = closest_segment_segment(a.a(), a.b(), b.a(), b.b());
    sphere_like_contact(pa, a.radius(), pb, b.radius())
}
