use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::{require_finite, Result};
use crate::Real;

/// A ray: an origin plus a non-zero direction.
///
/// Stores the direction normalized so that every consumer can treat
/// `t` as a world-space distance without renormalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3<Real>,
    direction: Vector3<Real>,
}

impl Ray {
    /// Create a new ray. `direction` must be finite and non-zero; it
    /// is normalized internally.
    pub fn new(origin: Point3<Real>, direction: Vector3<Real>) -> Result<Self> {
        require_finite("origin.x", origin.x)?;
        require_finite("origin.y", origin.y)?;
        require_finite("origin.z", origin.z)?;
        require_finite("direction.x", direction.x)?;
        require_finite("direction.y", direction.y)?;
        require_finite("direction.z", direction.z)?;
        let len = direction.magnitude();
        if len <= crate::EPSILON {
            return Err(crate::error::CollisionError::NonFinite {
                field: "direction",
                value: len as f64,
            });
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// The ray's origin.
    pub fn origin(&self) -> Point3<Real> {
        self.origin
    }

    /// The ray's (unit-length) direction.
    pub fn direction(&self) -> Vector3<Real> {
        self.direction
    }

    /// The point at parameter `t` along the ray.
    pub fn at(&self, t: Real) -> Point3<Real> {
        self.origin + self.direction * t
    }
}
