//! The per-frame orchestrator: broad phase, filter, narrow phase,
//! ENTER/STAY/EXIT event diffing, cache discipline, and response
//! dispatch to the built-in contact solver.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use cgmath::Vector3;

use crate::broad::BroadPhase;
use crate::cache::{ManifoldCache, WarmStartImpulse};
use crate::error::{CollisionError, Result};
use crate::event::{CollisionEvent, EventKind};
use crate::filter::{self, CollisionFilter};
use crate::narrow::ContactManifold3D;
use crate::pair::UnorderedPair;
use crate::shape::Aabb;
use crate::solver::{Constraint, ContactSolver, RigidBodyAdapter, SolverConfig, SolverContact};
use crate::Real;

/// Number of frames a manifold may go unrefreshed before
/// [`World::update`] prunes it from the cache, unless overridden with
/// [`World::with_retention_frames`].
pub const DEFAULT_RETENTION_FRAMES: u64 = 1;

struct PreviousContact {
    manifold: ContactManifold3D,
    response_enabled: bool,
}

/// The frame-based orchestrator tying broad phase, filter, narrow
/// phase, event lifecycle, manifold cache, and contact solver
/// together.
///
/// `T` is the host's opaque item identifier; its `Eq`/`Hash`/`Ord`
/// impls determine pair identity and the deterministic response-visit
/// order.
pub struct World<T> {
    broad_phase: Box<dyn BroadPhase<T>>,
    config: SolverConfig,
    retention_frames: u64,
    gravity: Vector3<Real>,
    cache: ManifoldCache<T>,
    previous: HashMap<UnorderedPair<T>, PreviousContact>,
    previous_order: Vec<UnorderedPair<T>>,
    adapter: Option<Box<dyn RigidBodyAdapter<T>>>,
    constraints: Vec<Box<dyn Constraint<T>>>,
}

impl<T> fmt::Debug for World<T>
where
    T: Clone + Eq + Hash + Ord,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("broad_phase", &self.broad_phase)
            .field("retention_frames", &self.retention_frames)
            .field("gravity", &self.gravity)
            .field("previous_pairs", &self.previous_order.len())
            .field("adapter_bound", &self.adapter.is_some())
            .field("constraint_count", &self.constraints.len())
            .finish()
    }
}

impl<T> World<T>
where
    T: Clone + Eq + Hash + Ord,
{
    /// Create a world driven by `broad_phase` with the given solver
    /// configuration. No adapter is bound and gravity is zero; call
    /// [`World::bind_adapter`] and [`World::set_gravity`] before using
    /// [`World::step`].
    pub fn new(broad_phase: Box<dyn BroadPhase<T>>, config: SolverConfig) -> Self {
        Self {
            broad_phase,
            config,
            retention_frames: DEFAULT_RETENTION_FRAMES,
            gravity: Vector3::new(0.0, 0.0, 0.0),
            cache: ManifoldCache::new(),
            previous: HashMap::new(),
            previous_order: Vec::new(),
            adapter: None,
            constraints: Vec::new(),
        }
    }

    /// Override the number of frames a manifold may go unrefreshed
    /// before it is pruned from the cache.
    pub fn with_retention_frames(mut self, frames: u64) -> Self {
        self.retention_frames = frames;
        self
    }

    /// Set the per-step gravity vector applied to dynamic bodies by
    /// [`World::step`].
    pub fn set_gravity(&mut self, gravity: Vector3<Real>) {
        self.gravity = gravity;
    }

    /// Bind the body adapter used by [`World::step`] and by response
    /// dispatch inside [`World::update`].
    pub fn bind_adapter(&mut self, adapter: Box<dyn RigidBodyAdapter<T>>) {
        self.adapter = Some(adapter);
    }

    /// Register a positional constraint, solved every
    /// [`SolverConfig::constraint_iterations`] passes of
    /// [`World::step`].
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint<T>>) {
        self.constraints.push(constraint);
    }

    /// The manifold cache, exposed read-only for host introspection
    /// (e.g. debug overlays).
    pub fn cache(&self) -> &ManifoldCache<T> {
        &self.cache
    }

    /// Run one frame: broad phase, filter, narrow phase, event diff,
    /// cache discipline, and (if an adapter is bound) response
    /// dispatch. Returns the frame's events in ENTER, then STAY, then
    /// EXIT order.
    pub fn update<B, F, N>(&mut self, items: &[T], bounds_of: B, mut filter_of: F, narrow_phase: N) -> Vec<CollisionEvent<T>>
    where
        B: Fn(&T) -> Aabb,
        F: FnMut(&T) -> Option<CollisionFilter>,
        N: Fn(&T, &T) -> Option<ContactManifold3D>,
    {
        let candidates = self.broad_phase.find_potential_pairs(items, &bounds_of);
        log::trace!("broad phase produced {} candidate pairs", candidates.len());
        let survivors = filter::classify(candidates, &mut filter_of);

        let mut curr_order: Vec<UnorderedPair<T>> = Vec::new();
        let mut curr: HashMap<UnorderedPair<T>, PreviousContact> = HashMap::new();

        for survivor in survivors {
            if let Some(manifold) = narrow_phase(&survivor.pair.first, &survivor.pair.second) {
                curr_order.push(survivor.pair.clone());
                curr.insert(
                    survivor.pair,
                    PreviousContact { manifold, response_enabled: survivor.response_enabled },
                );
            }
        }

        let mut events = Vec::with_capacity(curr_order.len() + self.previous_order.len());
        for pair in &curr_order {
            let entry = &curr[pair];
            let kind = if self.previous.contains_key(pair) { EventKind::Stay } else { EventKind::Enter };
            events.push(CollisionEvent {
                pair: pair.clone(),
                kind,
                response_enabled: entry.response_enabled,
                manifold: entry.manifold.clone(),
            });
        }

        let mut exit_count = 0usize;
        for pair in &self.previous_order {
            if !curr.contains_key(pair) {
                let entry = &self.previous[pair];
                events.push(CollisionEvent {
                    pair: pair.clone(),
                    kind: EventKind::Exit,
                    response_enabled: entry.response_enabled,
                    manifold: entry.manifold.clone(),
                });
                exit_count += 1;
            }
        }

        let enter_count = events.iter().filter(|e| e.kind == EventKind::Enter).count();
        let stay_count = events.iter().filter(|e| e.kind == EventKind::Stay).count();
        log::debug!("world update: {} enter, {} stay, {} exit", enter_count, stay_count, exit_count);

        for pair in &curr_order {
            self.cache.put(pair.clone(), curr[pair].manifold.clone());
        }
        self.cache.prune_stale(self.retention_frames);

        self.dispatch_response(&curr_order, &curr);

        self.cache.next_frame();
        self.previous = curr;
        self.previous_order = curr_order;

        events
    }

    /// Advance one physics step: apply gravity, run the positional
    /// constraint loop, run [`World::update`], then integrate
    /// positions. Requires a bound adapter and a finite, positive
    /// `dt`.
    pub fn step<B, F, N>(
        &mut self,
        items: &[T],
        dt: Real,
        bounds_of: B,
        filter_of: F,
        narrow_phase: N,
    ) -> Result<Vec<CollisionEvent<T>>>
    where
        B: Fn(&T) -> Aabb,
        F: FnMut(&T) -> Option<CollisionFilter>,
        N: Fn(&T, &T) -> Option<ContactManifold3D>,
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(CollisionError::NonPositiveDt(dt as f64));
        }
        if self.adapter.is_none() {
            return Err(CollisionError::MissingBodyAdapter);
        }

        let gravity = self.gravity;
        if let Some(adapter) = self.adapter.as_deref_mut() {
            for item in items {
                if adapter.inverse_mass(item) > 0.0 {
                    let v = adapter.velocity(item);
                    adapter.set_velocity(item, v + gravity * dt);
                }
            }
        }

        for _ in 0..self.config.constraint_iterations {
            if let Some(adapter) = self.adapter.as_deref_mut() {
                for constraint in &self.constraints {
                    constraint.solve(adapter, dt);
                }
            }
        }

        let events = self.update(items, bounds_of, filter_of, narrow_phase);

        if let Some(adapter) = self.adapter.as_deref_mut() {
            for item in items {
                if adapter.inverse_mass(item) > 0.0 {
                    let p = adapter.position(item);
                    let v = adapter.velocity(item);
                    adapter.set_position(item, p + v * dt);
                }
            }
        }

        Ok(events)
    }

    fn dispatch_response(&mut self, order: &[UnorderedPair<T>], curr: &HashMap<UnorderedPair<T>, PreviousContact>) {
        if self.adapter.is_none() {
            return;
        }

        let mut responsive: Vec<&UnorderedPair<T>> = order.iter().filter(|pair| curr[*pair].response_enabled).collect();
        if responsive.is_empty() {
            return;
        }
        responsive.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let mut contacts: Vec<SolverContact<T>> = responsive
            .iter()
            .map(|pair| {
                let manifold = &curr[*pair].manifold;
                let warm = self.cache.get_warm_start(pair);
                SolverContact {
                    a: pair.first.clone(),
                    b: pair.second.clone(),
                    normal: manifold.normal,
                    penetration_depth: manifold.penetration_depth,
                    normal_impulse: warm.normal_impulse,
                    tangent_impulse: warm.tangent_impulse,
                }
            })
            .collect();

        if let Some(adapter) = self.adapter.as_deref_mut() {
            ContactSolver::new().resolve(adapter, &mut contacts, &self.config);
        }

        for contact in &contacts {
            let pair = UnorderedPair::new(contact.a.clone(), contact.b.clone());
            self.cache.set_warm_start(
                &pair,
                WarmStartImpulse { normal_impulse: contact.normal_impulse, tangent_impulse: contact.tangent_impulse },
            );
        }
    }
}

fn sort_key<T: Clone + Ord>(pair: &UnorderedPair<T>) -> (T, T) {
    if pair.first <= pair.second {
        (pair.first.clone(), pair.second.clone())
    } else {
        (pair.second.clone(), pair.first.clone())
    }
}
