//! Constructive solid geometry: boolean combination of two shape trees.
//!
//! Along one ray, each operand is reduced to an ordered list of surface
//! hits (a span); even/odd parity over that list answers "is the point at
//! parameter t inside this operand", assuming the operand is locally a
//! closed two-manifold solid. The boolean predicate then selects which
//! candidate surfaces belong to the combined solid.
//!
//! Known limitations, carried deliberately:
//! - a viewing ray whose origin is already inside the combined bounding
//!   box is rejected outright, so looking out from inside a CSG solid
//!   does not resolve;
//! - span construction re-intersects each operand at most
//!   `MAX_REINTERSECTIONS` times, which can undercount surfaces of highly
//!   concave or non-manifold operands.

use std::sync::Arc;

use glint_math::{Aabb, Ray, Vec3, SURFACE_EPS};

use crate::hit::Hit;
use crate::material::Material;
use crate::shape::Shape;

/// Cap on per-operand re-intersections while building a span. Bounds the
/// cost on degenerate geometry at the price of miscounting extreme cases.
const MAX_REINTERSECTIONS: usize = 5;

/// The boolean predicate combining two operand solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    /// Points inside both operands.
    Intersection,
    /// Points inside either operand.
    Union,
    /// Points inside the first operand but not the second.
    Difference,
}

impl CsgOp {
    #[inline]
    fn keeps(self, in_a: bool, in_b: bool) -> bool {
        match self {
            CsgOp::Intersection => in_a && in_b,
            CsgOp::Union => in_a || in_b,
            CsgOp::Difference => in_a && !in_b,
        }
    }
}

/// Ordered entry/exit hits of one operand along one ray.
struct CsgSpan<'a> {
    hits: Vec<Hit<'a>>,
}

impl<'a> CsgSpan<'a> {
    /// Collect the operand's surfaces along `ray` by repeatedly
    /// re-intersecting past each found hit, nudged forward to escape the
    /// surface just found. Every collected hit is re-expressed as a
    /// parameter along the original ray.
    fn build(ray: Ray, shape: &'a Shape) -> Self {
        let mut span = Self { hits: Vec::new() };

        let mut tester = Hit::new(ray);
        shape.intersect(&mut tester);

        let mut count = 0;
        while tester.intersected && count <= MAX_REINTERSECTIONS {
            let t = (tester.ray.at(tester.t) - ray.origin).dot(ray.direction);
            tester.t = t;
            tester.ray = ray;
            span.insert(tester.clone());

            let next = Ray::from_unit(ray.at(t + 2.0 * SURFACE_EPS), ray.direction);
            tester = Hit::new(next);
            shape.intersect(&mut tester);
            count += 1;
        }

        span
    }

    fn insert(&mut self, hit: Hit<'a>) {
        let idx = self.hits.partition_point(|h| h.t < hit.t);
        self.hits.insert(idx, hit);
    }

    /// Even/odd parity: a point is inside after an odd number of surface
    /// crossings before it.
    fn contains(&self, t: f32) -> bool {
        let mut inside = false;
        for hit in &self.hits {
            if hit.t > t {
                return inside;
            }
            inside = !inside;
        }
        inside
    }

    /// The smallest-t candidate over both spans that satisfies the
    /// predicate at its own parameter.
    fn first_satisfying(a: &CsgSpan<'a>, b: &CsgSpan<'a>, op: CsgOp) -> Option<Hit<'a>> {
        let mut best: Option<&Hit<'a>> = None;

        for candidate in a.hits.iter().chain(b.hits.iter()) {
            let in_a = a.contains(candidate.t);
            let in_b = b.contains(candidate.t);
            if !op.keeps(in_a, in_b) {
                continue;
            }
            if best.map_or(true, |held| candidate.t < held.t) {
                best = Some(candidate);
            }
        }

        best.cloned()
    }
}

/// A binary CSG operator over two owned operand subtrees.
pub struct CsgNode {
    a: Shape,
    b: Shape,
    op: CsgOp,
    bbox: Aabb,
    pub cast_shadows: bool,
}

impl CsgNode {
    pub fn new(a: Shape, b: Shape, op: CsgOp) -> Self {
        let bbox = Aabb::union(&a.bounding_box(), &b.bounding_box());
        Self {
            a,
            b,
            op,
            bbox,
            cast_shadows: true,
        }
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        // Rays starting inside the combined solid are not resolved; see
        // the module-level limitation note.
        if self.bbox.contains_point(hit.ray.origin) {
            return false;
        }
        if !self.bbox.hit(&hit.ray) {
            return false;
        }

        let a_span = CsgSpan::build(hit.ray, &self.a);
        let b_span = CsgSpan::build(hit.ray, &self.b);

        if hit.debug {
            log::debug!(
                "csg spans: a={:?} b={:?}",
                a_span.hits.iter().map(|h| h.t).collect::<Vec<_>>(),
                b_span.hits.iter().map(|h| h.t).collect::<Vec<_>>()
            );
        }

        let best = match CsgSpan::first_satisfying(&a_span, &b_span, self.op) {
            Some(best) => best,
            None => return false,
        };

        if hit.intersected && best.t > hit.t {
            return false;
        }

        // Copy everything but the ray into the caller's record
        hit.intersected = true;
        hit.material = best.material;
        hit.normal = best.normal;
        hit.t = best.t;
        hit.u = best.u;
        hit.v = best.v;
        hit.tangent = best.tangent;
        hit.bitangent = best.bitangent;

        true
    }

    pub fn translate(&mut self, t: Vec3) {
        self.a.translate(t);
        self.b.translate(t);
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.a.rotate(axis, angle);
        self.b.rotate(axis, angle);
    }

    pub fn local_origin(&self) -> Vec3 {
        (self.bbox.min + self.bbox.max) / 2.0
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::union(&self.a.bounding_box(), &self.b.bounding_box())
    }

    pub fn update_bounds(&mut self) {
        self.a.update_bounds();
        self.b.update_bounds();
        self.bbox = self.bounding_box();
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.a.set_material(Arc::clone(&material));
        self.b.set_material(material);
    }
}
