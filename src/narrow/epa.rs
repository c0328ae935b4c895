//! Expanding polytope penetration extraction.
//!
//! Once GJK has found a tetrahedron enclosing the origin, EPA grows
//! that tetrahedron into the boundary of the Minkowski difference by
//! repeatedly replacing the face closest to the origin with a fan of
//! new faces around a fresh support vertex, until a support in the
//! closest face's normal direction fails to improve on it within
//! tolerance.

use cgmath::{InnerSpace, Point3, Vector3};

use super::support_point::{minkowski_support, SupportPoint};
use super::ContactManifold3D;
use crate::support::Support;
use crate::Real;

pub(crate) fn epa<A, B>(
    mut simplex: Vec<SupportPoint>,
    a: &A,
    b: &B,
    max_iterations: u32,
    tolerance: Real,
) -> ContactManifold3D
where
    A: Support,
    B: Support,
{
    if simplex.len() < 4 {
        return ContactManifold3D::degenerate();
    }

    let mut polytope = Polytope::new(&mut simplex);
    let mut i = 1;
    loop {
        let face = polytope.closest_face_to_origin();
        let candidate = minkowski_support(a, b, face.normal);
        let d = candidate.v.dot(face.normal);

        if d - face.distance < tolerance || i >= max_iterations {
            if i >= max_iterations {
                log::warn!("epa: iteration bound ({}) reached without converging", max_iterations);
            }
            return contact_from_face(&polytope, face);
        }

        polytope.add(candidate);
        i += 1;
    }
}

fn contact_from_face(polytope: &Polytope, face: &Face) -> ContactManifold3D {
    if face.degenerate {
        return ContactManifold3D::degenerate();
    }
    let point = contact_point(polytope, face);
    ContactManifold3D {
        normal: face.normal,
        penetration_depth: face.distance.max(0.0),
        points: vec![point],
    }
}

fn barycentric(p: Vector3<Real>, a: Vector3<Real>, b: Vector3<Real>, c: Vector3<Real>) -> (Real, Real, Real) {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < Real::EPSILON {
        return (1.0, 0.0, 0.0);
    }
    let inv_denom = 1.0 / denom;
    let v = (d11 * d20 - d01 * d21) * inv_denom;
    let w = (d00 * d21 - d01 * d20) * inv_denom;
    let u = 1.0 - v - w;
    (u, v, w)
}

/// Recover a contact point by projecting the face's closest point
/// (`normal * distance`) onto the face via barycentric coordinates,
/// then blending the matching witness points on each shape and
/// taking the midpoint.
fn contact_point(polytope: &Polytope, face: &Face) -> Point3<Real> {
    let target = face.normal * face.distance;
    let va = polytope.vertices[face.vertices[0]].v;
    let vb = polytope.vertices[face.vertices[1]].v;
    let vc = polytope.vertices[face.vertices[2]].v;
    let (u, v, w) = barycentric(target, va, vb, vc);

    let blend = |pick: fn(&SupportPoint) -> Point3<Real>| -> Point3<Real> {
        let pa = pick(&polytope.vertices[face.vertices[0]]);
        let pb = pick(&polytope.vertices[face.vertices[1]]);
        let pc = pick(&polytope.vertices[face.vertices[2]]);
        Point3::new(
            pa.x * u + pb.x * v + pc.x * w,
            pa.y * u + pb.y * v + pc.y * w,
            pa.z * u + pb.z * v + pc.z * w,
        )
    };

    let point_a = blend(|s| s.sup_a);
    let point_b = blend(|s| s.sup_b);
    Point3::new(
        (point_a.x + point_b.x) * 0.5,
        (point_a.y + point_b.y) * 0.5,
        (point_a.z + point_b.z) * 0.5,
    )
}

struct Polytope<'a> {
    vertices: &'a mut Vec<SupportPoint>,
    faces: Vec<Face>,
}

impl<'a> Polytope<'a> {
    fn new(simplex: &'a mut Vec<SupportPoint>) -> Self {
        let faces = Face::initial(simplex);
        Self { vertices: simplex, faces }
    }

    fn closest_face_to_origin(&self) -> &Face {
        let mut face = &self.faces[0];
        for f in &self.faces[1..] {
            if f.distance < face.distance {
                face = f;
            }
        }
        face
    }

    fn add(&mut self, sup: SupportPoint) {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut i = 0;
        while i < self.faces.len() {
            let seen = self.faces[i].normal.dot(sup.v - self.vertices[self.faces[i].vertices[0]].v) > 0.0;
            if seen {
                let face = self.faces.swap_remove(i);
                remove_or_add_edge(&mut edges, (face.vertices[0], face.vertices[1]));
                remove_or_add_edge(&mut edges, (face.vertices[1], face.vertices[2]));
                remove_or_add_edge(&mut edges, (face.vertices[2], face.vertices[0]));
            } else {
                i += 1;
            }
        }

        let n = self.vertices.len();
        self.vertices.push(sup);

        for (a, b) in edges {
            self.faces.push(Face::new(self.vertices, n, a, b));
        }
    }
}

struct Face {
    vertices: [usize; 3],
    normal: Vector3<Real>,
    distance: Real,
    /// Set when the face's three vertices are (nearly) colinear, so
    /// `ab.cross(ac)` has no well-defined direction to normalize.
    /// `normal`/`distance` are a safe zero fallback in that case, not
    /// a real supporting plane.
    degenerate: bool,
}

impl Face {
    fn new(simplex: &[SupportPoint], a: usize, b: usize, c: usize) -> Self {
        let ab = simplex[b].v - simplex[a].v;
        let ac = simplex[c].v - simplex[a].v;
        let raw = ab.cross(ac);
        let degenerate = raw.magnitude2() < Real::EPSILON;
        let (normal, distance) = if degenerate {
            (Vector3::new(0.0, 0.0, 0.0), 0.0)
        } else {
            let normal = raw.normalize();
            let distance = normal.dot(simplex[a].v);
            (normal, distance)
        };
        Self { vertices: [a, b, c], normal, distance, degenerate }
    }

    fn initial(simplex: &[SupportPoint]) -> Vec<Self> {
        vec![
            Self::new(simplex, 3, 2, 1),
            Self::new(simplex, 3, 1, 0),
            Self::new(simplex, 3, 0, 2),
            Self::new(simplex, 2, 0, 1),
        ]
    }
}

fn remove_or_add_edge(edges: &mut Vec<(usize, usize)>, edge: (usize, usize)) {
    for i in 0..edges.len() {
        if edge.0 == edges[i].1 && edge.1 == edges[i].0 {
            edges.remove(i);
            return;
        }
    }
    edges.push(edge);
}
