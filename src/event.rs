//! The ENTER/STAY/EXIT collision event lifecycle emitted by
//! [`crate::world::World::update`].

use crate::narrow::ContactManifold3D;
use crate::pair::UnorderedPair;

/// How a pair's membership in the current frame's contact set
/// compares to the previous frame's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The pair was not in contact last frame and is this frame.
    Enter,
    /// The pair was in contact both last frame and this frame.
    Stay,
    /// The pair was in contact last frame and is not this frame.
    Exit,
}

/// A single frame's collision event for a pair.
///
/// On [`EventKind::Exit`], `manifold` and `response_enabled` reflect
/// the last frame in which the pair was seen, not the (absent)
/// current frame.
#[derive(Debug, Clone)]
pub struct CollisionEvent<T> {
    /// The pair this event concerns.
    pub pair: UnorderedPair<T>,
    /// ENTER, STAY, or EXIT.
    pub kind: EventKind,
    /// Whether both sides of the pair are solid (participate in the
    /// contact solver).
    pub response_enabled: bool,
    /// The manifold that produced this event.
    pub manifold: ContactManifold3D,
}
