use crate::narrow::ContactManifold3D;
use crate::primitive::common::sphere_like_contact;
use crate::shape::{Capsule, Sphere};

/// Capsule-vs-sphere contact generation: closest point on the
/// capsule's segment to the sphere center, then resolve as two
/// spheres at that point and the sphere's center.
pub fn contact(a: &Capsule, b: &Sphere) -> Option<ContactManifold3D> {
    let closest = a.closest_point_on_segment(b.center());
    sphere_like_contact(closest, a.radius(), b.center(), b.radius())
}
