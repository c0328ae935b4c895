use cgmath::{Point3, Vector3};

use crate::narrow::ContactManifold3D;
use crate::shape::Aabb;
use crate::Real;

/// AABB-vs-AABB contact generation. Picks the axis with the smallest
/// positive overlap as the separating axis; its sign follows the
/// center-to-center delta on that axis (a zero delta resolves to
/// `+1`). Returns `None` if the boxes don't actually overlap on every
/// axis.
pub fn contact(a: &Aabb, b: &Aabb) -> Option<ContactManifold3D> {
    let overlaps = [
        a.max().x.min(b.max().x) - a.min().x.max(b.min().x),
        a.max().y.min(b.max().y) - a.min().y.max(b.min().y),
        a.max().z.min(b.max().z) - a.min().z.max(b.min().z),
    ];
    if overlaps.iter().any(|&o| o < 0.0) {
        return None;
    }

    let axis = (0..3)
        .min_by(|&i, &j| overlaps[i].partial_cmp(&overlaps[j]).unwrap())
        .unwrap();

    let center_a = a.center();
    let center_b = b.center();
    let delta = [
        center_b.x - center_a.x,
        center_b.y - center_a.y,
        center_b.z - center_a.z,
    ][axis];
    let sign = if delta < 0.0 { -1.0 } else { 1.0 };

    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    match axis {
        0 => normal.x = sign,
        1 => normal.y = sign,
        _ => normal.z = sign,
    }

    let lo = [a.min().x.max(b.min().x), a.min().y.max(b.min().y), a.min().z.max(b.min().z)];
    let hi = [a.max().x.min(b.max().x), a.max().y.min(b.max().y), a.max().z.min(b.max().z)];

    let mut coords = [0.0; 3];
    for i in 0..3 {
        coords[i] = if i == axis {
            if sign > 0.0 { lo[i] } else { hi[i] }
        } else {
            (lo[i] + hi[i]) * 0.5
        };
    }

    Some(ContactManifold3D {
        normal,
        penetration_depth: overlaps[axis].max(0.0),
        points: vec![Point3::new(coords[0], coords[1], coords[2])],
    })
}
