//! Separating-axis test for convex 2D polygons.
//!
//! A standalone variant of the narrow phase for callers working in a
//! plane: given two convex polygons as counter-clockwise vertex
//! lists, test every edge normal of both polygons as a candidate
//! separating axis. Independent of the 3D GJK/EPA loop and the
//! frame-based world; callers project their own geometry down to 2D
//! first.

use cgmath::{InnerSpace, Vector2};

use crate::Real;

/// Result of a 2D separating-axis test: the minimum-translation axis
/// and the overlap (penetration) along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap2D {
    /// Unit separating axis, oriented from `a` toward `b`.
    pub axis: Vector2<Real>,
    /// Penetration depth along `axis`.
    pub depth: Real,
}

/// Test two convex polygons (each a counter-clockwise vertex list of
/// at least 3 points) for overlap.
///
/// Returns `None` if any edge normal separates them; otherwise the
/// minimum-penetration axis found across every candidate.
pub fn overlap(a: &[Vector2<Real>], b: &[Vector2<Real>]) -> Option<Overlap2D> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut best: Option<Overlap2D> = None;
    let center_delta = centroid(b) - centroid(a);

    for axis in edge_normals(a).chain(edge_normals(b)) {
        let (min_a, max_a) = project(a, axis);
        let (min_b, max_b) = project(b, axis);
        let overlap_extent = (max_a.min(max_b)) - (min_a.max(min_b));
        if overlap_extent < 0.0 {
            return None;
        }

        let oriented_axis = if axis.dot(center_delta) < 0.0 { -axis } else { axis };
        let candidate = Overlap2D { axis: oriented_axis, depth: overlap_extent };
        best = Some(match best {
            Some(current) if current.depth <= candidate.depth => current,
            _ => candidate,
        });
    }

    best
}

fn centroid(poly: &[Vector2<Real>]) -> Vector2<Real> {
    let sum = poly.iter().fold(Vector2::new(0.0, 0.0), |acc, v| acc + *v);
    sum / (poly.len() as Real)
}

fn project(poly: &[Vector2<Real>], axis: Vector2<Real>) -> (Real, Real) {
    let mut min = Real::INFINITY;
    let mut max = Real::NEG_INFINITY;
    for v in poly {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}

fn edge_normals(poly: &[Vector2<Real>]) -> impl Iterator<Item = Vector2<Real>> + '_ {
    (0..poly.len()).map(move |i| {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let edge = b - a;
        let normal = Vector2::new(edge.y, -edge.x);
        if normal.magnitude2() > Real::EPSILON {
            normal.normalize()
        } else {
            normal
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: Real, cy: Real, half: Real) -> Vec<Vector2<Real>> {
        vec![
            Vector2::new(cx - half, cy - half),
            Vector2::new(cx + half, cy - half),
            Vector2::new(cx + half, cy + half),
            Vector2::new(cx - half, cy + half),
        ]
    }

    #[test]
    fn separated_squares_have_no_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 0.0, 1.0);
        assert!(overlap(&a, &b).is_none());
    }

    #[test]
    fn overlapping_squares_resolve_minimum_axis() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.5, 0.0, 1.0);
        let o = overlap(&a, &b).unwrap();
        assert!((o.depth - 0.5).abs() < 1e-4);
        assert!(o.axis.x > 0.9);
    }

    #[test]
    fn touching_squares_have_zero_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(2.0, 0.0, 1.0);
        let o = overlap(&a, &b).unwrap();
        assert!(o.depth.abs() < 1e-4);
    }

    #[test]
    fn degenerate_polygon_yields_no_overlap() {
        let a = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0)];
        let b = square(0.0, 0.0, 1.0);
        assert!(overlap(&a, &b).is_none());
    }
}
