use cgmath::{InnerSpace, Point3, Vector3};

use crate::narrow::ContactManifold3D;
use crate::Real;

/// Shared sphere-on-sphere contact resolution, used directly by
/// sphere-vs-sphere and, after reducing to a closest-point pair, by
/// capsule-vs-capsule and capsule-vs-sphere.
///
/// `center_a`/`radius_a` belong to the first shape, `center_b`/`radius_b`
/// to the second; the returned normal points from `a` toward `b`.
pub(crate) fn sphere_like_contact(
    center_a: Point3<Real>,
    radius_a: Real,
    center_b: Point3<Real>,
    radius_b: Real,
) -> Option<ContactManifold3D> {
    let delta = center_b - center_a;
    let distance = delta.magnitude();
    let depth = radius_a + radius_b - distance;
    if depth < 0.0 {
        return None;
    }

    let normal = if distance <= 1e-9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        delta / distance
    };

    let surface_a = center_a + normal * radius_a;
    let surface_b = center_b - normal * radius_b;
    let point = Point3::new(
        (surface_a.x + surface_b.x) * 0.5,
        (surface_a.y + surface_b.y) * 0.5,
        (surface_a.z + surface_b.z) * 0.5,
    );

    Some(ContactManifold3D {
        normal,
        penetration_depth: depth.max(0.0),
        points: vec![point],
    })
}
