use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::broad::BroadPhase;
use crate::error::{CollisionError, Result};
use crate::pair::UnorderedPair;
use crate::shape::Aabb;
use crate::Real;

type CellKey = (i64, i64, i64);

/// Uniform spatial hash broad phase.
///
/// Each item's AABB is discretized into integer cell coordinates
/// spanning `[floor(min/c), floor(max/c)]` per axis for a configured
/// cell size `c > 0`. Items are processed in input order; a
/// candidate pair is emitted the first time two items are found to
/// co-occupy a cell, keeping output order a deterministic function
/// of the input sequence rather than of hash-map iteration order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialHash {
    cell_size: Real,
}

impl SpatialHash {
    /// Create a new spatial hash broad phase with the given cell
    /// size. `cell_size` must be finite and `> 0`.
    pub fn new(cell_size: Real) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(CollisionError::InvalidCellSize(cell_size as f64));
        }
        Ok(Self { cell_size })
    }

    fn cells_for(&self, bounds: &Aabb) -> Vec<CellKey> {
        let min = bounds.min();
        let max = bounds.max();
        let x0 = (min.x / self.cell_size).floor() as i64;
        let x1 = (max.x / self.cell_size).floor() as i64;
        let y0 = (min.y / self.cell_size).floor() as i64;
        let y1 = (max.y / self.cell_size).floor() as i64;
        let z0 = (min.z / self.cell_size).floor() as i64;
        let z1 = (max.z / self.cell_size).floor() as i64;

        let mut keys = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1) * (z1 - z0 + 1)).max(1) as usize);
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    keys.push((x, y, z));
                }
            }
        }
        keys
    }
}

impl<T> BroadPhase<T> for SpatialHash
where
    T: Clone + Eq + Hash,
{
    fn find_potential_pairs(
        &mut self,
        items: &[T],
        bounds_of: &dyn Fn(&T) -> Aabb,
    ) -> Vec<UnorderedPair<T>> {
        let mut cell_map: HashMap<CellKey, Vec<usize>> = HashMap::new();
        let mut emitted: HashSet<(usize, usize)> = HashSet::new();
        let mut out = Vec::new();

        for (i, item) in items.iter().enumerate() {
            let bounds = bounds_of(item);
            let cells = self.cells_for(&bounds);

            let mut candidates: Vec<usize> = Vec::new();
            let mut local_seen = HashSet::new();
            for key in &cells {
                if let Some(occupants) = cell_map.get(key) {
                    for &j in occupants {
                        if local_seen.insert(j) {
                            candidates.push(j);
                        }
                    }
                }
            }
            candidates.sort_unstable();

            for j in candidates {
                if emitted.insert((j, i)) {
                    out.push(UnorderedPair::new(items[j].clone(), items[i].clone()));
                }
            }

            for key in cells {
                cell_map.entry(key).or_default().push(i);
            }
        }

        log::trace!(
            "spatial hash: {} items, {} cells, {} candidate pairs",
            items.len(),
            cell_map.len(),
            out.len()
        );

        out
    }
}
