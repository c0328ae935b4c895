//! Immutable convex primitive value types: [`Aabb`], [`Sphere`],
//! [`Capsule`], and [`Ray`].
//!
//! Every constructor validates its arguments per the error handling
//! design and returns [`crate::Result`]; there are no setters, so a
//! validated instance stays valid for its entire lifetime.

mod aabb;
pub(crate) mod capsule;
mod ray;
mod sphere;

pub use self::aabb::Aabb;
pub use self::capsule::Capsule;
pub use self::ray::Ray;
pub use self::sphere::Sphere;
