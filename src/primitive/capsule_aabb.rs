use cgmath::{InnerSpace, Point3, Vector3};

use crate::narrow::ContactManifold3D;
use crate::shape::{Aabb, Capsule};
use crate::Real;

const TERNARY_REFINEMENTS: u32 = 48;

/// Capsule-vs-AABB contact generation. Minimizes the distance from
/// the capsule's segment to the box with a ternary search over the
/// segment parameter (the distance-to-box function is convex, hence
/// unimodal), then treats the result as a point-vs-box query. When
/// the minimizing segment point already lies inside the box, the
/// normal degenerates and is resolved by projecting onto whichever
/// box face is nearest.
pub fn contact(capsule: &Capsule, aabb: &Aabb) -> Option<ContactManifold3D> {
    let t = closest_t(capsule, aabb);
    let point = capsule.a() + (capsule.b() - capsule.a()) * t;
    let box_point = aabb.clamp_point(point);
    let diff = point - box_point;
    let dist2 = diff.dot(diff);

    if dist2 <= crate::EPSILON * crate::EPSILON {
        return Some(inside_box_contact(point, aabb, capsule.radius()));
    }

    let distance = dist2.sqrt();
    if distance > capsule.radius() {
        return None;
    }

    let normal = diff / distance * -1.0;
    let capsule_surface = point + normal * capsule.radius();
    let contact_point = Point3::new(
        (capsule_surface.x + box_point.x) * 0.5,
        (capsule_surface.y + box_point.y) * 0.5,
        (capsule_surface.z + box_point.z) * 0.5,
    );

    Some(ContactManifold3D {
        normal,
        penetration_depth: (capsule.radius() - distance).max(0.0),
        points: vec![contact_point],
    })
}

fn closest_t(capsule: &Capsule, aabb: &Aabb) -> Real {
    let f = |t: Real| -> Real {
        let p = capsule.a() + (capsule.b() - capsule.a()) * t;
        let c = aabb.clamp_point(p);
        (p - c).dot(p - c)
    };

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..TERNARY_REFINEMENTS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if f(m1) < f(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    ((lo + hi) * 0.5).clamp(0.0, 1.0)
}

fn inside_box_contact(point: Point3<Real>, aabb: &Aabb, radius: Real) -> ContactManifold3D {
    let candidates = [
        (point.x - aabb.min().x, Vector3::new(-1.0, 0.0, 0.0), 0usize, aabb.min().x),
        (aabb.max().x - point.x, Vector3::new(1.0, 0.0, 0.0), 0usize, aabb.max().x),
        (point.y - aabb.min().y, Vector3::new(0.0, -1.0, 0.0), 1usize, aabb.min().y),
        (aabb.max().y - point.y, Vector3::new(0.0, 1.0, 0.0), 1usize, aabb.max().y),
        (point.z - aabb.min().z, Vector3::new(0.0, 0.0, -1.0), 2usize, aabb.min().z),
        (aabb.max().z - point.z, Vector3::new(0.0, 0.0, 1.0), 2usize, aabb.max().z),
    ];

    let (min_dist, normal, axis, boundary) = candidates
        .into_iter()
        .fold(candidates[0], |best, cur| if cur.0 < best.0 { cur } else { best });

    let mut contact_point = point;
    match axis {
        0 => contact_point.x = boundary,
        1 => contact_point.y = boundary,
        _ => contact_point.z = boundary,
    }

    ContactManifold3D {
        normal,
        penetration_depth: (radius + min_dist).max(0.0),
        points: vec![contact_point],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3 as P;

    #[test]
    fn capsule_resting_above_box_face() {
        let capsule = Capsule::new(P::new(-5.0, 6.0, 0.0), P::new(5.0, 6.0, 0.0), 1.0).unwrap();
        let aabb = Aabb::new(P::new(-10.0, -5.0, -5.0), P::new(10.0, 5.0, 5.0)).unwrap();
        let m = contact(&capsule, &aabb).unwrap();
        assert!((m.penetration_depth - 0.0).abs() < 1e-3);
        assert!(m.normal.y < -0.99);
    }

    #[test]
    fn capsule_overlapping_box_has_positive_depth() {
        let capsule = Capsule::new(P::new(-5.0, 5.5, 0.0), P::new(5.0, 5.5, 0.0), 1.0).unwrap();
        let aabb = Aabb::new(P::new(-10.0, -5.0, -5.0), P::new(10.0, 5.0, 5.0)).unwrap();
        let m = contact(&capsule, &aabb).unwrap();
        assert!(m.penetration_depth > 0.4 && m.penetration_depth < 0.6);
    }

    #[test]
    fn capsule_far_from_box_has_no_contact() {
        let capsule = Capsule::new(P::new(-5.0, 50.0, 0.0), P::new(5.0, 50.0, 0.0), 1.0).unwrap();
        let aabb = Aabb::new(P::new(-10.0, -5.0, -5.0), P::new(10.0, 5.0, 5.0)).unwrap();
        assert!(contact(&capsule, &aabb).is_none());
    }

    #[test]
    fn capsule_embedded_in_box_resolves_to_nearest_face() {
        let capsule = Capsule::new(P::new(-1.0, 0.0, 0.0), P::new(1.0, 0.0, 0.0), 0.5).unwrap();
        let aabb = Aabb::new(P::new(-10.0, -10.0, -1.0), P::new(10.0, 10.0, 1.0)).unwrap();
        let m = contact(&capsule, &aabb).unwrap();
        assert!(m.normal.z.abs() > 0.99);
        assert!(m.penetration_depth > 0.0);
    }
}
