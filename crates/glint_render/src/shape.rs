//! The shape hierarchy: a closed sum type over primitives and composites.
//!
//! Every variant answers the same capability set: closest-hit
//! intersection, shadow intersection, translation, rotation, bounding
//! boxes and material assignment. Groups are the structural backbone for
//! composite objects; CSG nodes combine two subtrees with a boolean
//! predicate.

use std::sync::Arc;

use glam::Quat;
use glint_math::{Aabb, Vec3};

use crate::circle::Circle;
use crate::csg::CsgNode;
use crate::hit::Hit;
use crate::material::Material;
use crate::normal_map::NormalMap;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::tube::Tube;

/// Any shape the intersection engine can traverse.
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Circle(Circle),
    Tube(Tube),
    Triangle(Triangle),
    Group(ShapeGroup),
    Csg(Box<CsgNode>),
    /// Decorator that perturbs the wrapped shape's normals by a texture.
    NormalMap(NormalMap),
}

impl Shape {
    /// Resolve the closest hit along the record's ray, improving the
    /// record in place. Returns whether this call improved it.
    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        match self {
            Shape::Sphere(s) => s.intersect(hit),
            Shape::Plane(p) => p.intersect(hit),
            Shape::Circle(c) => c.intersect(hit),
            Shape::Tube(t) => t.intersect(hit),
            Shape::Triangle(t) => t.intersect(hit),
            Shape::Group(g) => g.intersect(hit),
            Shape::Csg(c) => c.intersect(hit),
            Shape::NormalMap(n) => n.intersect(hit),
        }
    }

    /// Like `intersect`, but shapes with shadow casting disabled report
    /// no hit, making them invisible to shadow rays only.
    pub fn shadow_intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        match self {
            Shape::Sphere(s) => s.cast_shadows && s.intersect(hit),
            Shape::Plane(p) => p.cast_shadows && p.intersect(hit),
            Shape::Circle(c) => c.cast_shadows && c.intersect(hit),
            Shape::Tube(t) => t.cast_shadows && t.intersect(hit),
            Shape::Triangle(t) => t.cast_shadows && t.intersect(hit),
            Shape::Group(g) => g.shadow_intersect(hit),
            Shape::Csg(c) => c.cast_shadows && c.intersect(hit),
            Shape::NormalMap(n) => n.shadow_intersect(hit),
        }
    }

    pub fn translate(&mut self, t: Vec3) {
        match self {
            Shape::Sphere(s) => s.translate(t),
            Shape::Plane(p) => p.translate(t),
            Shape::Circle(c) => c.translate(t),
            Shape::Tube(tu) => tu.translate(t),
            Shape::Triangle(tr) => tr.translate(t),
            Shape::Group(g) => g.translate(t),
            Shape::Csg(c) => c.translate(t),
            Shape::NormalMap(n) => n.translate(t),
        }
    }

    /// Rotate the shape about its own local origin.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        match self {
            Shape::Sphere(s) => s.rotate(axis, angle),
            Shape::Plane(p) => p.rotate(axis, angle),
            Shape::Circle(c) => c.rotate(axis, angle),
            Shape::Tube(t) => t.rotate(axis, angle),
            Shape::Triangle(t) => t.rotate(axis, angle),
            Shape::Group(g) => g.rotate(axis, angle),
            Shape::Csg(c) => c.rotate(axis, angle),
            Shape::NormalMap(n) => n.rotate(axis, angle),
        }
    }

    /// Rotate about an arbitrary pivot: shift to the pivot, rotate in
    /// place, then move back along the rotated offset.
    pub fn rotate_about(&mut self, pivot: Vec3, axis: Vec3, angle: f32) {
        let shift = self.local_origin() - pivot;
        self.translate(-shift);
        self.rotate(axis, angle);
        let rotated = Quat::from_axis_angle(axis.normalize(), angle) * shift;
        self.translate(rotated);
    }

    /// The shape's local-coordinate origin, the pivot for `rotate`.
    pub fn local_origin(&self) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.center,
            Shape::Plane(p) => p.origin,
            Shape::Circle(c) => c.origin,
            Shape::Tube(t) => t.origin,
            Shape::Triangle(t) => t.centroid(),
            Shape::Group(g) => g.local_origin(),
            Shape::Csg(c) => c.local_origin(),
            Shape::NormalMap(n) => n.local_origin(),
        }
    }

    /// Recompute the bounding box from current parameters.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Plane(p) => p.bounding_box(),
            Shape::Circle(c) => c.bounding_box(),
            Shape::Tube(t) => t.bounding_box(),
            Shape::Triangle(t) => t.bounding_box(),
            Shape::Group(g) => g.bounding_box(),
            Shape::Csg(c) => c.bounding_box(),
            Shape::NormalMap(n) => n.bounding_box(),
        }
    }

    /// Refresh cached boxes after transforms. Traversals trust cached
    /// boxes, so callers must invoke this once per frame after any
    /// animation-driven mutation.
    pub fn update_bounds(&mut self) {
        match self {
            Shape::Group(g) => g.update_bounds(),
            Shape::Csg(c) => c.update_bounds(),
            Shape::NormalMap(n) => n.update_bounds(),
            // Primitives compute their box on demand
            _ => {}
        }
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        match self {
            Shape::Sphere(s) => s.set_material(material),
            Shape::Plane(p) => p.set_material(material),
            Shape::Circle(c) => c.set_material(material),
            Shape::Tube(t) => t.set_material(material),
            Shape::Triangle(t) => t.set_material(material),
            Shape::Group(g) => g.set_material(material),
            Shape::Csg(c) => c.set_material(material),
            Shape::NormalMap(n) => n.set_material(material),
        }
    }

    pub fn set_cast_shadows(&mut self, cast: bool) {
        match self {
            Shape::Sphere(s) => s.cast_shadows = cast,
            Shape::Plane(p) => p.cast_shadows = cast,
            Shape::Circle(c) => c.cast_shadows = cast,
            Shape::Tube(t) => t.cast_shadows = cast,
            Shape::Triangle(t) => t.cast_shadows = cast,
            Shape::Group(g) => g.set_cast_shadows(cast),
            Shape::Csg(c) => c.cast_shadows = cast,
            Shape::NormalMap(n) => n.set_cast_shadows(cast),
        }
    }
}

/// An owned, ordered collection of shapes traversed as one shape.
///
/// The group caches the union of its members' boxes and culls whole
/// traversals against it before cascading into members.
pub struct ShapeGroup {
    pub members: Vec<Shape>,
    bbox: Aabb,
}

impl ShapeGroup {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Capsule: an open tube closed by a sphere at each end.
    pub fn capsule(
        origin: Vec3,
        end: Vec3,
        radius: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let axis = (end - origin).normalize();
        let mut group = Self::new();
        group.add(Shape::Tube(Tube::between(
            origin,
            end,
            radius,
            u,
            Arc::clone(&material),
        )));
        group.add(Shape::Sphere(Sphere::with_frame(
            origin,
            u,
            -axis,
            radius,
            Arc::clone(&material),
        )));
        group.add(Shape::Sphere(Sphere::with_frame(
            end, u, axis, radius, material,
        )));
        group
    }

    /// Cylinder: an open tube closed by a disk at each end.
    pub fn cylinder(
        origin: Vec3,
        end: Vec3,
        radius: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let axis = (end - origin).normalize();
        let mut group = Self::new();
        group.add(Shape::Tube(Tube::between(
            origin,
            end,
            radius,
            u,
            Arc::clone(&material),
        )));
        group.add(Shape::Circle(Circle::new(
            origin,
            -axis,
            radius,
            u,
            Arc::clone(&material),
        )));
        group.add(Shape::Circle(Circle::new(end, axis, radius, u, material)));
        group
    }

    /// Add a member, refreshing the cached box.
    pub fn add(&mut self, shape: Shape) {
        self.members.push(shape);
        self.update_bounds();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        if !self.bbox.hit(&hit.ray) {
            return false;
        }

        let mut improved = false;
        for member in &self.members {
            if member.intersect(hit) {
                improved = true;
            }
        }
        improved
    }

    pub fn shadow_intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        if !self.bbox.hit(&hit.ray) {
            return false;
        }

        let mut improved = false;
        for member in &self.members {
            if member.shadow_intersect(hit) {
                improved = true;
            }
        }
        improved
    }

    pub fn translate(&mut self, t: Vec3) {
        for member in &mut self.members {
            member.translate(t);
        }
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        for member in &mut self.members {
            member.rotate(axis, angle);
        }
    }

    pub fn local_origin(&self) -> Vec3 {
        // An empty group has no box; its midpoint would be NaN
        if self.members.is_empty() {
            return Vec3::ZERO;
        }
        (self.bbox.min + self.bbox.max) / 2.0
    }

    /// Union of member boxes, recomputed from scratch.
    pub fn bounding_box(&self) -> Aabb {
        let mut bbox = Aabb::EMPTY;
        for member in &self.members {
            bbox = Aabb::union(&bbox, &member.bounding_box());
        }
        bbox
    }

    /// Refresh this group's cached box and every composite below it.
    pub fn update_bounds(&mut self) {
        for member in &mut self.members {
            member.update_bounds();
        }
        self.bbox = self.bounding_box();
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        for member in &mut self.members {
            member.set_material(Arc::clone(&material));
        }
    }

    pub fn set_cast_shadows(&mut self, cast: bool) {
        for member in &mut self.members {
            member.set_cast_shadows(cast);
        }
    }
}

impl Default for ShapeGroup {
    fn default() -> Self {
        Self::new()
    }
}
