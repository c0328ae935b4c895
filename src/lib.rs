//! # collide3d
//!
//! A 3D collision-detection and contact-response core: a broad-phase
//! candidate generator, a support-mapping narrow phase (GJK with EPA
//! penetration extraction), primitive contact generators, a
//! frame-based world orchestrator with an ENTER/STAY/EXIT event
//! lifecycle, an iterative positional/impulse contact solver with
//! warm starting, and the manifold cache that ties solver state
//! across frames together.
//!
//! Vector and point math is supplied by [`cgmath`]; this crate treats
//! it as an external collaborator and never reaches past
//! `Vector3`/`Point3`. Bodies are translating point masses — there is
//! no rotational state anywhere in this crate.
//!
//! Uses single precision by default; enable the `double` feature to
//! switch every scalar in the crate to `f64`.

#![deny(missing_debug_implementations, unused_import_braces)]

extern crate cgmath;

#[cfg(not(feature = "double"))]
/// The scalar type used throughout the crate.
pub type Real = f32;

#[cfg(feature = "double")]
/// The scalar type used throughout the crate.
pub type Real = f64;

/// `1e-6`, scaled for the active [`Real`] precision. Used as the
/// general-purpose tolerance for unit-length and EPA-convergence
/// checks.
pub const EPSILON: Real = 1e-6;

pub mod broad;
pub mod cache;
pub mod error;
pub mod event;
pub mod filter;
pub mod mesh;
pub mod narrow;
pub mod pair;
pub mod primitive;
pub mod shape;
pub mod solver;
pub mod support;
pub mod toi;
pub mod world;

pub use crate::cache::{ManifoldCache, ManifoldCacheEntry, WarmStartImpulse};
pub use crate::error::{CollisionError, Result};
pub use crate::event::{CollisionEvent, EventKind};
pub use crate::filter::{CollisionFilter, CollisionKind};
pub use crate::narrow::ContactManifold3D;
pub use crate::pair::UnorderedPair;
pub use crate::shape::{Aabb, Capsule, Ray, Sphere};
pub use crate::solver::{Constraint, ContactSolver, DistanceConstraint, PointConstraint, RigidBodyAdapter, SolverConfig};
pub use crate::world::World;
