use crate::narrow::ContactManifold3D;
use crate::primitive::common::sphere_like_contact;
use crate::shape::Sphere;

/// Sphere-vs-sphere contact generation along the center-difference
/// vector. Coincident centers (distance `<= 1e-9`) fall back to the
/// `+X` axis.
pub fn contact(a: &Sphere, b: &Sphere) -> Option<ContactManifold3D> {
    sphere_like_contact(a.center(), a.radius(), b.center(), b.radius())
}
