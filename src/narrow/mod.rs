//! Narrow phase: simplex-based convex intersection (GJK) and
//! penetration extraction (EPA) over the [`Support`](crate::support::Support)
//! abstraction.
//!
//! [`sat2d`] is a standalone 2D separating-axis variant, included
//! alongside the 3D core loop but never called by it.

mod epa;
mod gjk;
pub mod sat2d;
mod simplex;
mod support_point;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::support::Support;
use crate::Real;

/// Default bound on GJK simplex-growth iterations.
pub const DEFAULT_GJK_ITERATIONS: u32 = 32;
/// Default bound on EPA polytope-expansion iterations.
pub const DEFAULT_EPA_ITERATIONS: u32 = 64;
/// Default convergence tolerance for EPA's support-improvement test.
pub const DEFAULT_EPA_TOLERANCE: Real = 1e-6;

/// A penetration manifold between two convex shapes: a unit normal
/// oriented from the first shape toward the second, a non-negative
/// penetration depth, and the contact point(s) that produced it.
#[derive(Debug, Clone)]
pub struct ContactManifold3D {
    /// Unit vector pointing from the first shape toward the second.
    pub normal: Vector3<Real>,
    /// Penetration depth; `0.0` is legal at tangential touch.
    pub penetration_depth: Real,
    /// Contact points, oriented the same way as `normal`.
    pub points: Vec<Point3<Real>>,
}

impl ContactManifold3D {
    /// A zero-depth manifold along a canonical axis, returned when
    /// numerical failure leaves no usable face (degenerate geometry,
    /// no improving EPA vertex).
    pub fn degenerate() -> Self {
        Self {
            normal: Vector3::new(1.0, 0.0, 0.0),
            penetration_depth: 0.0,
            points: vec![Point3::new(0.0, 0.0, 0.0)],
        }
    }

    /// The first (and, for this crate's generators, only) contact
    /// point.
    pub fn point(&self) -> Point3<Real> {
        self.points[0]
    }
}

/// True iff the Minkowski difference of `a` and `b` encloses the
/// origin, i.e. the two convex shapes overlap.
pub fn intersects<A, B>(a: &A, b: &B, max_iterations: u32) -> bool
where
    A: Support,
    B: Support,
{
    gjk::gjk(a, b, max_iterations).is_some()
}

/// Run GJK followed by EPA and return the penetration manifold, or
/// `None` if the shapes do not overlap.
pub fn contact<A, B>(
    a: &A,
    b: &B,
    gjk_iterations: u32,
    epa_iterations: u32,
    epa_tolerance: Real,
) -> Option<ContactManifold3D>
where
    A: Support,
    B: Support,
{
    let simplex = gjk::gjk(a, b, gjk_iterations)?;
    let mut manifold = epa::epa(simplex, a, b, epa_iterations, epa_tolerance);
    if manifold.normal.magnitude2() > Real::EPSILON {
        manifold.normal = manifold.normal.normalize();
    }
    Some(manifold)
}
