//! The per-pair manifold cache: frame-stamped storage for the last
//! manifold seen for a pair and the warm-start impulse to seed the
//! next frame's solver with.

use std::collections::HashMap;
use std::hash::Hash;

use crate::narrow::ContactManifold3D;
use crate::pair::UnorderedPair;
use crate::Real;

/// Accumulated normal/tangent impulse carried from one frame's
/// solver to the next. Normal impulse is always non-negative;
/// tangent impulse is clamped to `|tangent| <= friction * normal`
/// by the solver on each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarmStartImpulse {
    /// Accumulated impulse along the contact normal.
    pub normal_impulse: Real,
    /// Accumulated impulse along the contact tangent.
    pub tangent_impulse: Real,
}

impl Default for WarmStartImpulse {
    fn default() -> Self {
        Self { normal_impulse: 0.0, tangent_impulse: 0.0 }
    }
}

/// A single cache slot: the manifold last reported for a pair, the
/// frame it was last refreshed on, and its warm-start impulse.
#[derive(Debug, Clone)]
pub struct ManifoldCacheEntry {
    /// The manifold as of `last_seen_frame`.
    pub manifold: ContactManifold3D,
    /// The frame counter value this entry was last `put` on.
    pub last_seen_frame: u64,
    /// Impulse to seed the next frame's solver with.
    pub warm_start: WarmStartImpulse,
}

/// Frame-stamped manifold storage, keyed by [`UnorderedPair`].
///
/// Entries are created on first contact, refreshed by `put` on every
/// STAY, and dropped by `prune_stale` once they haven't been
/// refreshed for more than `max_age` frames.
#[derive(Debug)]
pub struct ManifoldCache<T> {
    entries: HashMap<UnorderedPair<T>, ManifoldCacheEntry>,
    current_frame: u64,
}

impl<T> Default for ManifoldCache<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ManifoldCache<T>
where
    T: Clone + Eq + Hash,
{
    /// Create an empty cache at frame `0`.
    pub fn new() -> Self {
        Self { entries: HashMap::new(), current_frame: 0 }
    }

    /// Store `manifold` for `pair`, stamping it with the current
    /// frame. The pair's warm-start impulse, if any, is preserved.
    pub fn put(&mut self, pair: UnorderedPair<T>, manifold: ContactManifold3D) {
        let frame = self.current_frame;
        self.entries
            .entry(pair)
            .and_modify(|entry| {
                entry.manifold = manifold.clone();
                entry.last_seen_frame = frame;
            })
            .or_insert_with(|| ManifoldCacheEntry {
                manifold,
                last_seen_frame: frame,
                warm_start: WarmStartImpulse::default(),
            });
    }

    /// The manifold currently stored for `pair`, if any.
    pub fn get(&self, pair: &UnorderedPair<T>) -> Option<&ContactManifold3D> {
        self.entries.get(pair).map(|entry| &entry.manifold)
    }

    /// The warm-start impulse for `pair`, or the zero default if the
    /// pair has no entry.
    pub fn get_warm_start(&self, pair: &UnorderedPair<T>) -> WarmStartImpulse {
        self.entries.get(pair).map(|entry| entry.warm_start).unwrap_or_default()
    }

    /// Record a new warm-start impulse for `pair`. A no-op if the
    /// pair has no entry (it should have been `put` earlier in the
    /// same frame).
    pub fn set_warm_start(&mut self, pair: &UnorderedPair<T>, impulse: WarmStartImpulse) {
        if let Some(entry) = self.entries.get_mut(pair) {
            entry.warm_start = impulse;
        }
    }

    /// Advance the monotonic frame counter.
    pub fn next_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Drop every entry whose `current_frame - last_seen_frame` is
    /// greater than `max_age`.
    pub fn prune_stale(&mut self, max_age: u64) {
        let current = self.current_frame;
        let before = self.entries.len();
        self.entries.retain(|_, entry| current.saturating_sub(entry.last_seen_frame) <= max_age);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            log::trace!("manifold cache: pruned {} stale entries at frame {}", pruned, current);
        }
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
