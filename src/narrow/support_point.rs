use cgmath::{Point3, Vector3};

use crate::support::Support;
use crate::Real;

/// A single Minkowski-difference vertex, carrying the witness points
/// on each shape that produced it.
///
/// `v = sup_a - sup_b` is the vertex actually used by the simplex and
/// EPA machinery; `sup_a`/`sup_b` are kept so a contact point can be
/// recovered later without re-running the support functions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SupportPoint {
    pub v: Vector3<Real>,
    pub sup_a: Point3<Real>,
    pub sup_b: Point3<Real>,
}

/// Evaluate the Minkowski-difference support of `(a, b)` along
/// `direction`: `supportA(direction) - supportB(-direction)`.
pub(crate) fn minkowski_support<A, B>(a: &A, b: &B, direction: Vector3<Real>) -> SupportPoint
where
    A: Support,
    B: Support,
{
    let sup_a = a.support(direction);
    let sup_b = b.support(-direction);
    SupportPoint {
        v: sup_a - sup_b,
        sup_a,
        sup_b,
    }
}
