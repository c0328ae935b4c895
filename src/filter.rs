//! Filter classification: layer/mask rejection plus the
//! trigger/solid response-enabled annotation.

use crate::pair::UnorderedPair;

/// Whether a shape participates in physical response or only reports
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Participates in contact response.
    Solid,
    /// Reports overlap only; never resolved by the solver.
    Trigger,
}

/// Layer/mask collision filter.
///
/// A pair `(A, B)` passes iff `(A.layer & B.mask) != 0` **and**
/// `(B.layer & A.mask) != 0`. The default filter matches every layer
/// against every mask and is [`CollisionKind::Solid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    /// The bitmask identifying this shape's own layer(s).
    pub layer: u32,
    /// The bitmask of layers this shape collides with.
    pub mask: u32,
    /// Solid or trigger.
    pub kind: CollisionKind,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: u32::MAX,
            mask: u32::MAX,
            kind: CollisionKind::Solid,
        }
    }
}

impl CollisionFilter {
    /// True if `self` and `other` mutually match each other's mask.
    pub fn matches(&self, other: &CollisionFilter) -> bool {
        (self.layer & other.mask) != 0 && (other.layer & self.mask) != 0
    }
}

/// A candidate pair that survived filtering, annotated with whether
/// the solver should treat it as a physical contact.
#[derive(Debug, Clone, Copy)]
pub struct FilteredPair<T> {
    /// The surviving pair.
    pub pair: UnorderedPair<T>,
    /// `true` iff both sides are [`CollisionKind::Solid`].
    pub response_enabled: bool,
}

/// Classify a set of candidate pairs against a filter provider.
///
/// `filter_of` may return `None`, which is replaced by
/// [`CollisionFilter::default`]. Pairs that fail the mutual
/// layer/mask test are dropped; survivors are annotated with
/// `response_enabled = kindA == Solid && kindB == Solid`.
pub fn classify<T, F>(candidates: Vec<UnorderedPair<T>>, mut filter_of: F) -> Vec<FilteredPair<T>>
where
    F: FnMut(&T) -> Option<CollisionFilter>,
{
    candidates
        .into_iter()
        .filter_map(|pair| {
            let fa = filter_of(&pair.first).unwrap_or_default();
            let fb = filter_of(&pair.second).unwrap_or_default();
            if !fa.matches(&fb) {
                return None;
            }
            let response_enabled = fa.kind == CollisionKind::Solid && fb.kind == CollisionKind::Solid;
            Some(FilteredPair { pair, response_enabled })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(layer: u32, mask: u32) -> CollisionFilter {
        CollisionFilter { layer, mask, kind: CollisionKind::Solid }
    }

    fn trigger(layer: u32, mask: u32) -> CollisionFilter {
        CollisionFilter { layer, mask, kind: CollisionKind::Trigger }
    }

    #[test]
    fn default_matches_everything_and_is_solid() {
        let d = CollisionFilter::default();
        assert!(d.matches(&d));
        assert_eq!(d.kind, CollisionKind::Solid);
    }

    #[test]
    fn mismatched_masks_are_rejected() {
        let a = solid(0b01, 0b01);
        let b = solid(0b10, 0b10);
        assert!(!a.matches(&b));
    }

    #[test]
    fn classify_annotates_trigger_pairs() {
        let pairs = vec![UnorderedPair::new(1u32, 2u32)];
        let out = classify(pairs, |id| {
            Some(if *id == 1 { solid(1, 1) } else { trigger(1, 1) })
        });
        assert_eq!(out.len(), 1);
        assert!(!out[0].response_enabled);
    }

    #[test]
    fn classify_drops_rejected_pairs() {
        let pairs = vec![UnorderedPair::new(1u32, 2u32)];
        let out = classify(pairs, |id| {
            Some(if *id == 1 { solid(0b01, 0b01) } else { solid(0b10, 0b10) })
        });
        assert!(out.is_empty());
    }

    #[test]
    fn classify_empty_input_yields_empty_output() {
        let out: Vec<FilteredPair<u32>> = classify(Vec::new(), |_| None);
        assert!(out.is_empty());
    }

    #[test]
    fn null_filter_resolves_to_default() {
        let pairs = vec![UnorderedPair::new(1u32, 2u32)];
        let out = classify(pairs, |_| None);
        assert_eq!(out.len(), 1);
        assert!(out[0].response_enabled);
    }
}
