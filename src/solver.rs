//! Iterative positional/impulse contact solver and the small
//! positional-constraint vocabulary it shares a body adapter with.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::{require_finite, require_non_negative, require_range, Result};
use crate::Real;

/// Host-supplied view onto a body's physical state.
///
/// Bodies are translating point masses: there is no orientation or
/// angular velocity anywhere in this trait. `inverse_mass == 0`
/// marks a kinematic body, which the solver and constraints never
/// move or accelerate.
pub trait RigidBodyAdapter<T> {
    /// Current world position.
    fn position(&self, id: &T) -> Point3<Real>;
    /// Overwrite the current world position.
    fn set_position(&mut self, id: &T, position: Point3<Real>);
    /// Current linear velocity.
    fn velocity(&self, id: &T) -> Vector3<Real>;
    /// Overwrite the current linear velocity.
    fn set_velocity(&mut self, id: &T, velocity: Vector3<Real>);
    /// `1 / mass`, or `0` for a kinematic body.
    fn inverse_mass(&self, id: &T) -> Real;
    /// Coefficient of restitution, expected in `[0, 1]`.
    fn restitution(&self, id: &T) -> Real;
    /// Coefficient of friction, expected `>= 0`.
    fn friction(&self, id: &T) -> Real;
}

/// A positional constraint between one or two bodies.
pub trait Constraint<T> {
    /// Apply one positional-correction pass to the bodies this
    /// constraint concerns.
    fn solve(&self, adapter: &mut dyn RigidBodyAdapter<T>, dt: Real);
}

/// Pulls two bodies toward a fixed rest distance.
#[derive(Debug, Clone)]
pub struct DistanceConstraint<T> {
    a: T,
    b: T,
    target: Real,
    stiffness: Real,
}

impl<T> DistanceConstraint<T> {
    /// `target` must be `>= 0`; `stiffness` must be in `[0, 1]`.
    pub fn new(a: T, b: T, target: Real, stiffness: Real) -> Result<Self> {
        require_non_negative("target", target)?;
        require_range("stiffness", stiffness, 0.0, 1.0)?;
        Ok(Self { a, b, target, stiffness })
    }
}

impl<T> Constraint<T> for DistanceConstraint<T> {
    fn solve(&self, adapter: &mut dyn RigidBodyAdapter<T>, _dt: Real) {
        let inv_a = adapter.inverse_mass(&self.a);
        let inv_b = adapter.inverse_mass(&self.b);
        let inv_sum = inv_a + inv_b;
        if inv_sum <= 0.0 {
            return;
        }

        let pos_a = adapter.position(&self.a);
        let pos_b = adapter.position(&self.b);
        let delta = pos_b - pos_a;
        let distance = delta.magnitude();
        if distance <= crate::EPSILON {
            return;
        }
        let dir = delta / distance;

        let correction = (distance - self.target) * self.stiffness / inv_sum;
        adapter.set_position(&self.a, pos_a + dir * correction * inv_a);
        adapter.set_position(&self.b, pos_b - dir * correction * inv_b);
    }
}

/// Pulls a single body toward a fixed anchor point.
#[derive(Debug, Clone)]
pub struct PointConstraint<T> {
    body: T,
    anchor: Point3<Real>,
    stiffness: Real,
}

impl<T> PointConstraint<T> {
    /// `anchor` must be finite; `stiffness` must be in `[0, 1]`.
    pub fn new(body: T, anchor: Point3<Real>, stiffness: Real) -> Result<Self> {
        require_finite("anchor.x", anchor.x)?;
        require_finite("anchor.y", anchor.y)?;
        require_finite("anchor.z", anchor.z)?;
        require_range("stiffness", stiffness, 0.0, 1.0)?;
        Ok(Self { body, anchor, stiffness })
    }
}

impl<T> Constraint<T> for PointConstraint<T> {
    fn solve(&self, adapter: &mut dyn RigidBodyAdapter<T>, _dt: Real) {
        let inv = adapter.inverse_mass(&self.body);
        if inv <= 0.0 {
            return;
        }
        let pos = adapter.position(&self.body);
        let delta = self.anchor - pos;
        adapter.set_position(&self.body, pos + delta * self.stiffness);
    }
}

/// Tunable constants for the contact solver and narrow phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Fraction of penetration beyond `slop` corrected per positional
    /// pass.
    pub positional_percent: Real,
    /// Penetration allowance before positional correction engages.
    pub slop: Real,
    /// Velocity-impulse iterations per frame.
    pub solver_iterations: u32,
    /// Positional-constraint iterations per frame.
    pub constraint_iterations: u32,
    /// GJK simplex-growth iteration bound.
    pub gjk_iterations: u32,
    /// EPA polytope-expansion iteration bound.
    pub epa_iterations: u32,
    /// EPA convergence tolerance.
    pub epa_tolerance: Real,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            positional_percent: 0.8,
            slop: 0.001,
            solver_iterations: 4,
            constraint_iterations: 4,
            gjk_iterations: 32,
            epa_iterations: 64,
            epa_tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Validate every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        require_range("positional_percent", self.positional_percent, 0.0, 1.0)?;
        require_non_negative("slop", self.slop)?;
        require_non_negative("epa_tolerance", self.epa_tolerance)?;
        Ok(())
    }
}

/// One contact the solver will resolve this frame: the pair's body
/// ids, the manifold geometry, and the accumulated impulse carried
/// in from (or seeded fresh for) the warm start.
#[derive(Debug, Clone)]
pub struct SolverContact<T> {
    /// First body, matching [`ContactManifold3D`](crate::ContactManifold3D)'s
    /// normal orientation.
    pub a: T,
    /// Second body.
    pub b: T,
    /// Unit contact normal, oriented from `a` toward `b`.
    pub normal: Vector3<Real>,
    /// Non-negative penetration depth.
    pub penetration_depth: Real,
    /// Accumulated normal impulse; `>= 0`.
    pub normal_impulse: Real,
    /// Accumulated tangent impulse.
    pub tangent_impulse: Real,
}

/// Iterative positional-correction + velocity-impulse contact
/// solver with warm starting.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactSolver;

impl ContactSolver {
    /// Create a new contact solver. Stateless: all per-frame state
    /// lives in the [`SolverContact`] slice passed to [`resolve`](Self::resolve).
    pub fn new() -> Self {
        Self
    }

    /// Resolve every contact in `contacts` against `adapter`,
    /// mutating body velocities and positions in place and updating
    /// each contact's accumulated impulses for the caller to persist
    /// as the next frame's warm start.
    pub fn resolve<T>(
        &self,
        adapter: &mut dyn RigidBodyAdapter<T>,
        contacts: &mut [SolverContact<T>],
        config: &SolverConfig,
    ) {
        for _ in 0..config.solver_iterations {
            for contact in contacts.iter_mut() {
                positional_correction(adapter, contact, config);
            }
        }

        for contact in contacts.iter_mut() {
            resolve_velocity(adapter, contact, config.solver_iterations);
        }
    }
}

/// Applies one pass of positional correction and shrinks the
/// contact's own depth estimate by the amount just corrected, so that
/// repeated passes (`solver_iterations` of them) converge toward full
/// separation instead of reapplying the same displacement every pass.
fn positional_correction<T>(adapter: &mut dyn RigidBodyAdapter<T>, contact: &mut SolverContact<T>, config: &SolverConfig) {
    let inv_a = adapter.inverse_mass(&contact.a);
    let inv_b = adapter.inverse_mass(&contact.b);
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let excess = (contact.penetration_depth - config.slop).max(0.0);
    if excess <= 0.0 {
        return;
    }

    let magnitude = excess * config.positional_percent / inv_sum;
    let correction = contact.normal * magnitude;

    let pos_a = adapter.position(&contact.a);
    let pos_b = adapter.position(&contact.b);
    adapter.set_position(&contact.a, pos_a - correction * inv_a);
    adapter.set_position(&contact.b, pos_b + correction * inv_b);

    contact.penetration_depth -= excess * config.positional_percent;
}

fn resolve_velocity<T>(adapter: &mut dyn RigidBodyAdapter<T>, contact: &mut SolverContact<T>, iterations: u32) {
    let inv_a = adapter.inverse_mass(&contact.a);
    let inv_b = adapter.inverse_mass(&contact.b);
    let inv_sum = inv_a + inv_b;

    let restitution = adapter.restitution(&contact.a).min(adapter.restitution(&contact.b)).clamp(0.0, 1.0);
    let friction = (adapter.friction(&contact.a) * adapter.friction(&contact.b)).max(0.0).sqrt();
    let n = contact.normal;

    // Apply the warm-started impulse once, along the normal and the
    // tangent implied by this frame's relative velocity.
    let vr0 = adapter.velocity(&contact.b) - adapter.velocity(&contact.a);
    let tangent0 = tangent_direction(vr0, n);
    apply_impulse(adapter, &contact.a, &contact.b, n * contact.normal_impulse + tangent0 * contact.tangent_impulse, inv_a, inv_b);

    if inv_sum <= 0.0 {
        return;
    }

    for _ in 0..iterations {
        let vr = adapter.velocity(&contact.b) - adapter.velocity(&contact.a);
        if vr.dot(n) > 0.0 {
            continue;
        }

        let delta_jn = -(1.0 + restitution) * vr.dot(n) / inv_sum;
        let new_jn = (contact.normal_impulse + delta_jn).max(0.0);
        let applied_jn = new_jn - contact.normal_impulse;
        contact.normal_impulse = new_jn;
        apply_impulse(adapter, &contact.a, &contact.b, n * applied_jn, inv_a, inv_b);

        let vr_after_normal = adapter.velocity(&contact.b) - adapter.velocity(&contact.a);
        let t = tangent_direction(vr_after_normal, n);
        let delta_jt = -vr_after_normal.dot(t) / inv_sum;
        let friction_bound = friction * contact.normal_impulse;
        let new_jt = (contact.tangent_impulse + delta_jt).clamp(-friction_bound, friction_bound);
        let applied_jt = new_jt - contact.tangent_impulse;
        contact.tangent_impulse = new_jt;
        apply_impulse(adapter, &contact.a, &contact.b, t * applied_jt, inv_a, inv_b);
    }
}

fn apply_impulse<T>(adapter: &mut dyn RigidBodyAdapter<T>, a: &T, b: &T, impulse: Vector3<Real>, inv_a: Real, inv_b: Real) {
    let va = adapter.velocity(a) - impulse * inv_a;
    let vb = adapter.velocity(b) + impulse * inv_b;
    adapter.set_velocity(a, va);
    adapter.set_velocity(b, vb);
}

fn tangent_direction(vr: Vector3<Real>, normal: Vector3<Real>) -> Vector3<Real> {
    let t = vr - normal * vr.dot(normal);
    let len = t.magnitude();
    if len > crate::EPSILON {
        return t / len;
    }
    perpendicular(normal)
}

fn perpendicular(n: Vector3<Real>) -> Vector3<Real> {
    let axis = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
        Vector3::new(1.0, 0.0, 0.0)
    } else if n.y.abs() <= n.z.abs() {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(0.0, 0.0, 1.0)
    };
    let t = axis.cross(n);
    let len = t.magnitude();
    if len > crate::EPSILON {
        t / len
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestBody {
        position: Point3<Real>,
        velocity: Vector3<Real>,
        inverse_mass: Real,
        restitution: Real,
        friction: Real,
    }

    struct TestAdapter {
        bodies: HashMap<u32, TestBody>,
    }

    impl RigidBodyAdapter<u32> for TestAdapter {
        fn position(&self, id: &u32) -> Point3<Real> {
            self.bodies[id].position
        }
        fn set_position(&mut self, id: &u32, position: Point3<Real>) {
            self.bodies.get_mut(id).unwrap().position = position;
        }
        fn velocity(&self, id: &u32) -> Vector3<Real> {
            self.bodies[id].velocity
        }
        fn set_velocity(&mut self, id: &u32, velocity: Vector3<Real>) {
            self.bodies.get_mut(id).unwrap().velocity = velocity;
        }
        fn inverse_mass(&self, id: &u32) -> Real {
            self.bodies[id].inverse_mass
        }
        fn restitution(&self, id: &u32) -> Real {
            self.bodies[id].restitution
        }
        fn friction(&self, id: &u32) -> Real {
            self.bodies[id].friction
        }
    }

    fn body(position: Point3<Real>, velocity: Vector3<Real>, inverse_mass: Real) -> TestBody {
        TestBody { position, velocity, inverse_mass, restitution: 0.0, friction: 0.0 }
    }

    #[test]
    fn kinematic_body_is_never_moved() {
        let mut bodies = HashMap::new();
        bodies.insert(1, body(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 0.0));
        bodies.insert(2, body(Point3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0), 1.0));
        let mut adapter = TestAdapter { bodies };

        let mut contacts = vec![SolverContact {
            a: 1u32,
            b: 2u32,
            normal: Vector3::new(1.0, 0.0, 0.0),
            penetration_depth: 0.5,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }];

        let solver = ContactSolver::new();
        let config = SolverConfig::default();
        solver.resolve(&mut adapter, &mut contacts, &config);

        assert_eq!(adapter.position(&1), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(adapter.velocity(&1), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn penetrating_dynamic_bodies_separate() {
        let mut bodies = HashMap::new();
        bodies.insert(1, body(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 1.0));
        bodies.insert(2, body(Point3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0), 1.0));
        let mut adapter = TestAdapter { bodies };

        let mut contacts = vec![SolverContact {
            a: 1u32,
            b: 2u32,
            normal: Vector3::new(1.0, 0.0, 0.0),
            penetration_depth: 0.5,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }];

        let solver = ContactSolver::new();
        let config = SolverConfig::default();
        solver.resolve(&mut adapter, &mut contacts, &config);

        assert!(adapter.position(&1).x < 0.0);
        assert!(adapter.position(&2).x > 1.0);
        assert!(adapter.velocity(&1).x < 1.0);
        assert!(adapter.velocity(&2).x > -1.0);
    }

    #[test]
    fn separating_bodies_are_left_alone_by_velocity_pass() {
        let mut bodies = HashMap::new();
        bodies.insert(1, body(Point3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0), 1.0));
        bodies.insert(2, body(Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 1.0));
        let mut adapter = TestAdapter { bodies };

        let mut contacts = vec![SolverContact {
            a: 1u32,
            b: 2u32,
            normal: Vector3::new(1.0, 0.0, 0.0),
            penetration_depth: 0.0,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }];

        let solver = ContactSolver::new();
        let config = SolverConfig::default();
        solver.resolve(&mut adapter, &mut contacts, &config);

        assert_eq!(adapter.velocity(&1), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(adapter.velocity(&2), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn distance_constraint_pulls_bodies_to_target() {
        let mut bodies = HashMap::new();
        bodies.insert(1, body(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1.0));
        bodies.insert(2, body(Point3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1.0));
        let mut adapter = TestAdapter { bodies };

        let constraint = DistanceConstraint::new(1u32, 2u32, 2.0, 1.0).unwrap();
        constraint.solve(&mut adapter, 1.0 / 60.0);

        let distance = (adapter.position(&2) - adapter.position(&1)).magnitude();
        assert!(distance < 5.0);
    }

    #[test]
    fn point_constraint_pulls_body_to_anchor() {
        let mut bodies = HashMap::new();
        bodies.insert(1, body(Point3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1.0));
        let mut adapter = TestAdapter { bodies };

        let constraint = PointConstraint::new(1u32, Point3::new(0.0, 0.0, 0.0), 0.5).unwrap();
        constraint.solve(&mut adapter, 1.0 / 60.0);

        assert_eq!(adapter.position(&1), Point3::new(2.5, 0.0, 0.0));
    }
}
