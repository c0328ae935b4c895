use std::cmp::Ordering;
use std::hash::Hash;

use crate::broad::BroadPhase;
use crate::pair::UnorderedPair;
use crate::shape::Aabb;

/// Sweep-and-prune broad phase.
///
/// Sorts items by AABB `min.x` ascending (a stable sort, so ties
/// preserve input order) and sweeps an active list: items whose
/// `max.x` falls behind the current item's `min.x` are evicted, and
/// every remaining active item is checked for Y/Z overlap before
/// being emitted as a candidate. Complexity is output-sensitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepAndPrune;

impl SweepAndPrune {
    /// Create a new sweep-and-prune broad phase.
    pub fn new() -> Self {
        Self
    }
}

impl<T> BroadPhase<T> for SweepAndPrune
where
    T: Clone + Eq + Hash,
{
    fn find_potential_pairs(
        &mut self,
        items: &[T],
        bounds_of: &dyn Fn(&T) -> Aabb,
    ) -> Vec<UnorderedPair<T>> {
        let mut indexed: Vec<(usize, Aabb)> = items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, bounds_of(item)))
            .collect();
        indexed.sort_by(|a, b| {
            a.1.min()
                .x
                .partial_cmp(&b.1.min().x)
                .unwrap_or(Ordering::Equal)
        });

        let mut active: Vec<usize> = Vec::new();
        let mut out = Vec::new();

        for cur in 0..indexed.len() {
            let cur_bounds = indexed[cur].1;
            active.retain(|&a| indexed[a].1.max().x >= cur_bounds.min().x);

            for &a in &active {
                let other_bounds = indexed[a].1;
                if overlaps_axis(&other_bounds, &cur_bounds, 1) && overlaps_axis(&other_bounds, &cur_bounds, 2) {
                    out.push(UnorderedPair::new(
                        items[indexed[a].0].clone(),
                        items[indexed[cur].0].clone(),
                    ));
                }
            }

            active.push(cur);
        }

        log::trace!("sweep and prune: {} items, {} candidate pairs", items.len(), out.len());

        out
    }
}

fn overlaps_axis(a: &Aabb, b: &Aabb, axis: usize) -> bool {
    let (amin, amax) = (a.min()[axis], a.max()[axis]);
    let (bmin, bmax) = (b.min()[axis], b.max()[axis]);
    amin <= bmax && amax >= bmin
}
