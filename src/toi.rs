//! Step time-of-impact sampling for two moving convex shapes.
//!
//! Kept deliberately free-standing rather than wired into
//! [`crate::world::World`]: the orchestrator's frame pipeline works
//! entirely in discrete-time overlap tests, and how a swept estimate
//! like this one should feed back into that loop (pre-step
//! clamping? a separate CCD pass?) is left to the host to decide.
//! Call it directly for a single pair when that estimate is needed.

use cgmath::Vector3;

use crate::support::Support;
use crate::Real;

const SAMPLE_COUNT: u32 = 8;
const BISECTION_ITERATIONS: u32 = 16;

/// Find the earliest time in `[0, dt]` at which two shapes translating
/// at constant velocities `velocity_a`/`velocity_b` first overlap.
///
/// Coarsely samples `[0, dt]` for the first overlapping sample, then
/// refines the bracketing interval by bisection. This is a sampled
/// estimate, not exact conservative advancement: a thin obstacle fully
/// crossed between two samples can be missed. `gjk_iterations` bounds
/// each overlap test the same way it bounds [`crate::narrow::intersects`].
///
/// Returns `None` if `dt` is non-positive or non-finite, or if no
/// sample within `[0, dt]` overlaps.
pub fn time_of_impact<A, B>(
    a: &A,
    velocity_a: Vector3<Real>,
    b: &B,
    velocity_b: Vector3<Real>,
    dt: Real,
    gjk_iterations: u32,
) -> Option<Real>
where
    A: Support,
    B: Support,
{
    if !dt.is_finite() || dt <= 0.0 {
        return None;
    }

    let relative = velocity_b - velocity_a;
    let overlapping_at = |t: Real| -> bool {
        let offset = relative * t;
        let moved_b = move |d: Vector3<Real>| b.support(d) + offset;
        crate::narrow::intersects(a, &moved_b, gjk_iterations)
    };

    if overlapping_at(0.0) {
        return Some(0.0);
    }

    let mut bracket: Option<(Real, Real)> = None;
    for i in 1..=SAMPLE_COUNT {
        let t = dt * (i as Real) / (SAMPLE_COUNT as Real);
        if overlapping_at(t) {
            let prev = dt * ((i - 1) as Real) / (SAMPLE_COUNT as Real);
            bracket = Some((prev, t));
            break;
        }
    }

    let (mut lo, mut hi) = match bracket {
        Some(range) => range,
        None => return None,
    };

    for _ in 0..BISECTION_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if overlapping_at(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Some(hi)
}
