//! Support-mapping abstraction used by the narrow phase.
//!
//! Any convex shape can participate in GJK/EPA by implementing
//! [`Support`]; primitive constructors are provided for [`Aabb`],
//! [`Sphere`], and [`Capsule`] so the same engine serves primitives
//! and custom convex shapes uniformly.

use cgmath::{Point3, Vector3};

use crate::shape::{Aabb, Capsule, Sphere};
use crate::Real;

/// A convex shape's support mapping: given a (not necessarily
/// normalized, but non-zero) search direction, return the farthest
/// point of the shape along that direction.
///
/// Implementations must be pure and deterministic.
pub trait Support {
    /// Farthest point of the shape in `direction`.
    fn support(&self, direction: Vector3<Real>) -> Point3<Real>;
}

impl Support for Aabb {
    fn support(&self, direction: Vector3<Real>) -> Point3<Real> {
        Aabb::support_point(self, direction)
    }
}

impl Support for Sphere {
    fn support(&self, direction: Vector3<Real>) -> Point3<Real> {
        Sphere::support_point(self, direction)
    }
}

impl Support for Capsule {
    fn support(&self, direction: Vector3<Real>) -> Point3<Real> {
        Capsule::support_point(self, direction)
    }
}

impl<F> Support for F
where
    F: Fn(Vector3<Real>) -> Point3<Real>,
{
    fn support(&self, direction: Vector3<Real>) -> Point3<Real> {
        self(direction)
    }
}
