//! Triangle primitive.

use std::sync::Arc;

use glam::Quat;
use glint_math::{Aabb, Vec3, RAY_T_MIN, SURFACE_EPS};

use crate::hit::Hit;
use crate::material::Material;

/// A triangle with three corners in order.
pub struct Triangle {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    material: Arc<Material>,
    pub cast_shadows: bool,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<Material>) -> Self {
        Self {
            a,
            b,
            c,
            material,
            cast_shadows: true,
        }
    }

    /// Centroid, used as the local origin for pivoted rotation.
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }

    /// Plane test followed by an area-ratio barycentric containment check.
    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        let edge_a = self.b - self.a;
        let edge_b = self.c - self.a;
        let n = edge_a.cross(edge_b).normalize();

        let n_dot_d = n.dot(hit.ray.direction);
        if n_dot_d.abs() < SURFACE_EPS {
            return false;
        }

        let offset = n.dot(self.a);
        let t = (offset - n.dot(hit.ray.origin)) / n_dot_d;

        if t < RAY_T_MIN || (hit.intersected && hit.t < t) {
            return false;
        }

        // Barycentric classification by sub-triangle areas; for points
        // inside the triangle the three ratios sum to one.
        let p = hit.ray.at(t);

        let area_a = (self.b - p).cross(self.c - p).length() / 2.0;
        let area_b = (p - self.a).cross(self.c - self.a).length() / 2.0;
        let area_c = (p - self.a).cross(self.b - self.a).length() / 2.0;
        let area_all = (self.c - self.a).cross(self.b - self.a).length() / 2.0;

        let sum = (area_a + area_b + area_c) / area_all;
        if !(-SURFACE_EPS..=1.0 + SURFACE_EPS).contains(&sum) {
            return false;
        }

        hit.t = t;
        hit.intersected = true;
        hit.material = Some(&self.material);
        hit.normal = n;

        true
    }

    pub fn translate(&mut self, t: Vec3) {
        self.a += t;
        self.b += t;
        self.c += t;
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        self.a = rot * self.a;
        self.b = rot * self.b;
        self.c = rot * self.c;
    }

    pub fn bounding_box(&self) -> Aabb {
        let min = self.a.min(self.b.min(self.c));
        let max = self.a.max(self.b.max(self.c));
        Aabb::from_points(min, max)
    }
}
