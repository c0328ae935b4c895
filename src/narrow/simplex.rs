//! Simplex closest-feature processing for the 3D GJK loop.
//!
//! Given a simplex of up to four Minkowski-difference vertices, derive
//! the next search direction pointing from the simplex's
//! origin-closest feature back toward the origin, discarding vertices
//! that cannot participate in that feature. `check_origin` returns
//! `true` only once the simplex is a tetrahedron enclosing the
//! origin.

use cgmath::{InnerSpace, Vector3};

use super::support_point::SupportPoint;
use crate::Real;

pub(crate) fn check_origin(simplex: &mut Vec<SupportPoint>, d: &mut Vector3<Real>) -> bool {
    match simplex.len() {
        4 => tetrahedron(simplex, d),
        3 => {
            triangle(simplex, d);
            false
        }
        2 => {
            let a = simplex[1].v;
            let b = simplex[0].v;
            let ao = -a;
            let ab = b - a;
            *d = cross_aba(ab, ao);
            false
        }
        _ => false,
    }
}

fn cross_aba(a: Vector3<Real>, b: Vector3<Real>) -> Vector3<Real> {
    a.cross(b).cross(a)
}

fn triangle(simplex: &mut Vec<SupportPoint>, d: &mut Vector3<Real>) {
    let a = simplex[2].v;
    let b = simplex[1].v;
    let c = simplex[0].v;
    let ao = -a;
    let ab = b - a;
    let ac = c - a;
    check_side(ab.cross(ac), ab, ac, ao, simplex, d, false, false);
}

fn tetrahedron(simplex: &mut Vec<SupportPoint>, d: &mut Vector3<Real>) -> bool {
    let a = simplex[3].v;
    let b = simplex[2].v;
    let c = simplex[1].v;
    let dd = simplex[0].v;

    let ao = -a;
    let ab = b - a;
    let ac = c - a;
    let ad = dd - a;

    let abc = ab.cross(ac);

    // origin outside face ABC: drop D and recurse into the edge/face
    // test for the remaining triangle.
    if abc.dot(ao) > 0.0 {
        simplex.remove(0);
        check_side(abc, ab, ac, ao, simplex, d, true, false);
        return false;
    }

    let acd = ac.cross(ad);
    // origin outside face ACD: drop B. The AB edge region is already
    // excluded by the ABC test above, so only the AC/AD sides matter.
    if acd.dot(ao) > 0.0 {
        simplex.remove(2);
        check_side(acd, ac, ad, ao, simplex, d, true, true);
        return false;
    }

    let adb = ad.cross(ab);
    // origin outside face ADB: drop C, no further edge tests needed,
    // those regions are covered by the two checks above.
    if adb.dot(ao) > 0.0 {
        simplex.remove(1);
        simplex.swap(0, 1);
        *d = adb;
        return false;
    }

    // origin is on the inner side of every face: it's inside the
    // tetrahedron.
    true
}

#[allow(clippy::too_many_arguments)]
fn check_side(
    abc: Vector3<Real>,
    ab: Vector3<Real>,
    ac: Vector3<Real>,
    ao: Vector3<Real>,
    simplex: &mut Vec<SupportPoint>,
    d: &mut Vector3<Real>,
    above: bool,
    ignore_ab: bool,
) {
    let ab_perp = ab.cross(abc);
    if !ignore_ab && ab_perp.dot(ao) > 0.0 {
        simplex.remove(0);
        *d = cross_aba(ab, ao);
        return;
    }

    let ac_perp = abc.cross(ac);
    if ac_perp.dot(ao) > 0.0 {
        simplex.remove(1);
        *d = cross_aba(ac, ao);
        return;
    }

    if above {
        *d = abc;
    } else if abc.dot(ao) > 0.0 {
        *d = abc;
    } else {
        simplex.swap(0, 1);
        *d = -abc;
    }
}
