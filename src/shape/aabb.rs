use cgmath::{EuclideanSpace, Point3, Vector3};

use crate::error::{require_finite, Result};
use crate::Real;

/// Axis-aligned bounding box: a finite interval on each of three axes.
///
/// `min <= max` on every axis is enforced at construction; a
/// degenerate box (`min == max` on any axis) is a legal point volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3<Real>,
    max: Point3<Real>,
}

impl Aabb {
    /// Create a new AABB from two corner points. The corners need not
    /// be given in min/max order; this constructor takes the
    /// component-wise min and max of the two.
    pub fn new(a: Point3<Real>, b: Point3<Real>) -> Result<Self> {
        for (label, v) in [("a", a), ("b", b)] {
            require_finite_point(label, v)?;
        }
        Ok(Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        })
    }

    /// Create an AABB from a center and half-extents (must be
    /// non-negative on every axis).
    pub fn from_center_half_extents(center: Point3<Real>, half_extents: Vector3<Real>) -> Result<Self> {
        require_finite_point("center", center)?;
        require_finite_point("half_extents", Point3::from_vec(half_extents))?;
        for (field, v) in [("half_extents.x", half_extents.x), ("half_extents.y", half_extents.y), ("half_extents.z", half_extents.z)] {
            if v < 0.0 {
                return Err(crate::error::CollisionError::NegativeValue { field, value: v as f64 });
            }
        }
        Ok(Self {
            min: center - half_extents,
            max: center + half_extents,
        })
    }

    /// The minimum corner.
    pub fn min(&self) -> Point3<Real> {
        self.min
    }

    /// The maximum corner.
    pub fn max(&self) -> Point3<Real> {
        self.max
    }

    /// The center point.
    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Half the size on each axis.
    pub fn half_extents(&self) -> Vector3<Real> {
        (self.max - self.min) * 0.5
    }

    /// True if the two boxes overlap on every axis (touching at a
    /// single point or face counts as overlapping).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// The union of two boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Clamp a point to lie within this box on every axis.
    pub fn clamp_point(&self, p: Point3<Real>) -> Point3<Real> {
        Point3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Farthest point on the box in the given direction (support
    /// mapping). `direction` need not be normalized.
    pub fn support_point(&self, direction: Vector3<Real>) -> Point3<Real> {
        Point3::new(
            if direction.x >= 0.0 { self.max.x } else { self.min.x },
            if direction.y >= 0.0 { self.max.y } else { self.min.y },
            if direction.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Ray/AABB slab intersection. Returns the nearest hit distance
    /// along the ray, or `None` if the ray misses. A ray whose origin
    /// is inside the box returns a hit distance of `0.0`.
    pub fn raycast(&self, ray: &super::Ray) -> Option<Real> {
        let origin = ray.origin();
        let dir = ray.direction();
        let mut tmin = Real::NEG_INFINITY;
        let mut tmax = Real::INFINITY;
        for axis in 0..3 {
            let (o, d, lo, hi) = match axis {
                0 => (origin.x, dir.x, self.min.x, self.max.x),
                1 => (origin.y, dir.y, self.min.y, self.max.y),
                _ => (origin.z, dir.z, self.min.z, self.max.z),
            };
            if d.abs() < crate::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
            } else {
                let inv_d = 1.0 / d;
                let mut t1 = (lo - o) * inv_d;
                let mut t2 = (hi - o) * inv_d;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }
                tmin = tmin.max(t1);
                tmax = tmax.min(t2);
                if tmin > tmax {
                    return None;
                }
            }
        }
        if tmax < 0.0 {
            None
        } else if tmin < 0.0 {
            Some(0.0)
        } else {
            Some(tmin)
        }
    }
}

fn require_finite_point(label: &'static str, p: Point3<Real>) -> Result<()> {
    require_finite(label, p.x)?;
    require_finite(label, p.y)?;
    require_finite(label, p.z)?;
    Ok(())
}
