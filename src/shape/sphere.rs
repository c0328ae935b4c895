use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::{require_finite, require_non_negative, Result};
use crate::shape::{Aabb, Ray};
use crate::Real;

/// A sphere: center plus radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3<Real>,
    radius: Real,
}

impl Sphere {
    /// Create a new sphere. `radius` must be finite and `>= 0`.
    pub fn new(center: Point3<Real>, radius: Real) -> Result<Self> {
        require_finite("center.x", center.x)?;
        require_finite("center.y", center.y)?;
        require_finite("center.z", center.z)?;
        require_non_negative("radius", radius)?;
        Ok(Self { center, radius })
    }

    /// The sphere's center.
    pub fn center(&self) -> Point3<Real> {
        self.center
    }

    /// The sphere's radius.
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Axis-aligned bounding box of the sphere.
    pub fn bound(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, Vector3::new(self.radius, self.radius, self.radius))
            .expect("sphere invariants guarantee a valid bound")
    }

    /// Farthest point on the sphere's surface in the given direction.
    pub fn support_point(&self, direction: Vector3<Real>) -> Point3<Real> {
        let len = direction.magnitude();
        if len <= crate::EPSILON {
            return self.center + Vector3::new(self.radius, 0.0, 0.0);
        }
        self.center + direction * (self.radius / len)
    }

    /// Nearest hit distance of `ray` against this sphere, or `None`
    /// on a miss.
    pub fn raycast(&self, ray: &Ray) -> Option<Real> {
        let l = self.center - ray.origin();
        let tca = l.dot(ray.direction());
        let d2 = l.dot(l) - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }
        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t1 < 0.0 {
            None
        } else if t0 < 0.0 {
            Some(0.0)
        } else {
            Some(t0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_point_along_axis() {
        let s = Sphere::new(Point3::new(0., 0., 0.), 10.).unwrap();
        let p = s.support_point(Vector3::new(1., 0., 0.));
        assert!((p.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_direction_falls_back_to_x() {
        let s = Sphere::new(Point3::new(0., 0., 0.), 10.).unwrap();
        let p = s.support_point(Vector3::new(0., 0., 0.));
        assert_eq!(p, Point3::new(10., 0., 0.));
    }

    #[test]
    fn negative_radius_rejected() {
        assert!(Sphere::new(Point3::new(0., 0., 0.), -1.0).is_err());
    }

    #[test]
    fn raycast_hits_nearest_surface() {
        let s = Sphere::new(Point3::new(0., 0., 0.), 10.).unwrap();
        let ray = Ray::new(Point3::new(20., 0., 0.), Vector3::new(-1., 0., 0.)).unwrap();
        assert_eq!(s.raycast(&ray), Some(10.0));
    }

    #[test]
    fn raycast_miss() {
        let s = Sphere::new(Point3::new(0., 15., 0.), 10.).unwrap();
        let ray = Ray::new(Point3::new(20., 0., 0.), Vector3::new(-1., 0., 0.)).unwrap();
        assert_eq!(s.raycast(&ray), None);
    }
}
