//! The GJK intersection loop: grows a simplex of Minkowski-difference
//! vertices until it either encloses the origin (intersection) or a
//! support evaluation fails to cross the search plane (separation).

use cgmath::{InnerSpace, Vector3};

use super::simplex;
use super::support_point::{minkowski_support, SupportPoint};
use crate::support::Support;
use crate::Real;

/// Run GJK on `(a, b)`. Returns the enclosing tetrahedron simplex on
/// intersection, `None` if the shapes are separated or the iteration
/// bound is exhausted without resolving either way.
pub(crate) fn gjk<A, B>(a: &A, b: &B, max_iterations: u32) -> Option<Vec<SupportPoint>>
where
    A: Support,
    B: Support,
{
    // Any non-zero direction works as a starting guess; GJK's first
    // support evaluation self-corrects toward the true separating
    // axis (or proves there isn't one) within a handful of steps.
    let mut d = Vector3::new(1.0, 0.0, 0.0);
    let first = minkowski_support(a, b, d);
    if first.v.dot(d) < 0.0 {
        return None;
    }

    let mut simplex_pts = vec![first];
    d = -d;

    let mut iterations = 0;
    loop {
        let next = minkowski_support(a, b, d);
        if next.v.dot(d) < 0.0 {
            return None;
        }
        simplex_pts.push(next);
        if simplex::check_origin(&mut simplex_pts, &mut d) {
            return Some(simplex_pts);
        }

        iterations += 1;
        if iterations >= max_iterations {
            log::warn!(
                "gjk: iteration bound ({}) reached without resolving intersection",
                max_iterations
            );
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Sphere;
    use cgmath::Point3;

    #[test]
    fn separated_spheres_miss() {
        let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = Sphere::new(Point3::new(5.0, 0.0, 0.0), 1.0).unwrap();
        assert!(gjk(&a, &b, 32).is_none());
    }

    #[test]
    fn overlapping_spheres_hit() {
        let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = Sphere::new(Point3::new(1.5, 0.0, 0.0), 1.0).unwrap();
        assert!(gjk(&a, &b, 32).is_some());
    }

    #[test]
    fn nearly_touching_spheres_hit() {
        let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).unwrap();
        let b = Sphere::new(Point3::new(1.99, 0.0, 0.0), 1.0).unwrap();
        assert!(gjk(&a, &b, 32).is_some());
    }
}
