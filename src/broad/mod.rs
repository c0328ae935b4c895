//! Broad-phase candidate generation.
//!
//! Two strategies are provided: [`SpatialHash`], a uniform grid keyed
//! by discretized AABB cells, and [`SweepAndPrune`], an
//! active-list sweep along the X axis. Both are conservative: their
//! output is a superset of the true AABB overlap set, never a
//! subset.

mod spatial_hash;
mod sweep_prune;

pub use self::spatial_hash::SpatialHash;
pub use self::sweep_prune::SweepAndPrune;

use std::fmt::Debug;
use std::hash::Hash;

use crate::pair::UnorderedPair;
use crate::shape::Aabb;

/// A broad-phase candidate generator.
///
/// `find_potential_pairs` must return a superset of the true AABB
/// overlap set for the given items; false positives are expected and
/// pruned by the narrow phase, false negatives are a bug.
pub trait BroadPhase<T>: Debug
where
    T: Clone + Eq + Hash,
{
    /// Compute candidate pairs for `items`, using `bounds_of` to map
    /// each item to its current AABB.
    fn find_potential_pairs(
        &mut self,
        items: &[T],
        bounds_of: &dyn Fn(&T) -> Aabb,
    ) -> Vec<UnorderedPair<T>>;
}
