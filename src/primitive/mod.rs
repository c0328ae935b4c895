//! Primitive contact generators.
//!
//! One function per supported ordered pair of [`Aabb`], [`Sphere`],
//! and [`Capsule`]; every manifold has exactly one contact point and
//! is oriented from the first argument toward the second. Reversed
//! argument orders delegate to the canonical pair and negate the
//! resulting normal.

mod aabb_aabb;
mod capsule_aabb;
mod capsule_capsule;
mod capsule_sphere;
pub(crate) mod common;
mod sphere_sphere;

use crate::narrow::ContactManifold3D;
use crate::shape::{Aabb, Capsule, Sphere};

/// AABB vs AABB.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<ContactManifold3D> {
    aabb_aabb::contact(a, b)
}

/// Sphere vs sphere.
pub fn sphere_vs_sphere(a: &Sphere, b: &Sphere) -> Option<ContactManifold3D> {
    sphere_sphere::contact(a, b)
}

/// Capsule vs capsule.
pub fn capsule_vs_capsule(a: &Capsule, b: &Capsule) -> Option<ContactManifold3D> {
    capsule_capsule::contact(a, b)
}

/// Capsule vs sphere.
pub fn capsule_vs_sphere(a: &Capsule, b: &Sphere) -> Option<ContactManifold3D> {
    capsule_sphere::contact(a, b)
}

/// Sphere vs capsule: the reverse of [`capsule_vs_sphere`], normal
/// negated.
pub fn sphere_vs_capsule(a: &Sphere, b: &Capsule) -> Option<ContactManifold3D> {
    capsule_vs_sphere(b, a).map(negate)
}

/// Capsule vs AABB.
pub fn capsule_vs_aabb(a: &Capsule, b: &Aabb) -> Option<ContactManifold3D> {
    capsule_aabb::contact(a, b)
}

/// AABB vs capsule: the reverse of [`capsule_vs_aabb`], normal
/// negated.
pub fn aabb_vs_capsule(a: &Aabb, b: &Capsule) -> Option<ContactManifold3D> {
    capsule_vs_aabb(b, a).map(negate)
}

fn negate(mut manifold: ContactManifold3D) -> ContactManifold3D {
    manifold.normal = -manifold.normal;
    manifold
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn reversed_pairs_negate_the_normal() {
        let capsule = Capsule::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0), 1.0).unwrap();
        let sphere = Sphere::new(Point3::new(5.0, 1.5, 0.0), 1.0).unwrap();

        let forward = capsule_vs_sphere(&capsule, &sphere).unwrap();
        let reversed = sphere_vs_capsule(&sphere, &capsule).unwrap();

        assert_eq!(reversed.normal, -forward.normal);
        assert!((reversed.penetration_depth - forward.penetration_depth).abs() < 1e-6);
    }

    #[test]
    fn reversed_capsule_aabb_negates_the_normal() {
        let capsule = Capsule::new(Point3::new(-5.0, 5.5, 0.0), Point3::new(5.0, 5.5, 0.0), 1.0).unwrap();
        let aabb = Aabb::new(Point3::new(-10.0, -5.0, -5.0), Point3::new(10.0, 5.0, 5.0)).unwrap();

        let forward = capsule_vs_aabb(&capsule, &aabb).unwrap();
        let reversed = aabb_vs_capsule(&aabb, &capsule).unwrap();

        assert_eq!(reversed.normal, -forward.normal);
    }
}
