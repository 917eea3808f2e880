//! Bounded rectangle primitive.

use std::sync::Arc;

use glam::Quat;
use glint_math::{Aabb, Vec3, RAY_T_MIN, SURFACE_EPS};

use crate::hit::Hit;
use crate::material::Material;

/// A finite rectangle: a plane bounded by `width` along `u` and `height`
/// along `v`, anchored at `origin` (its corner, or its center when built
/// with `centered`).
pub struct Plane {
    pub origin: Vec3,
    normal: Vec3,
    u: Vec3,
    v: Vec3,
    width: f32,
    height: f32,
    material: Arc<Material>,
    pub cast_shadows: bool,
}

impl Plane {
    /// Create a rectangle anchored at its corner.
    ///
    /// `u` seeds the in-plane axes; it is re-orthogonalized against the
    /// normal so callers only need a rough tangent hint.
    pub fn new(
        origin: Vec3,
        normal: Vec3,
        width: f32,
        height: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let normal = normal.normalize();
        let v = u.cross(normal);
        let u = v.cross(normal);
        Self {
            origin,
            normal,
            u,
            v,
            width,
            height,
            material,
            cast_shadows: true,
        }
    }

    /// Create a rectangle anchored at its center.
    pub fn centered(
        center: Vec3,
        normal: Vec3,
        width: f32,
        height: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let mut plane = Self::new(center, normal, width, height, u, material);
        let offset = plane.u * (-width / 2.0) + plane.v * (-height / 2.0);
        plane.origin += offset;
        plane
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        let offset = self.origin.dot(self.normal);

        // Near-parallel rays never produce a stable hit
        let n_dot_d = self.normal.dot(hit.ray.direction);
        if n_dot_d.abs() < SURFACE_EPS {
            return false;
        }

        let t = (offset - self.normal.dot(hit.ray.origin)) / n_dot_d;
        if t < RAY_T_MIN || (hit.intersected && hit.t < t) {
            return false;
        }

        // Reject hits outside the rectangle bounds
        let local = hit.ray.at(t) - self.origin;
        let hit_u = local.dot(self.u);
        let hit_v = local.dot(self.v);
        if hit_u < 0.0 || hit_u > self.width || hit_v < 0.0 || hit_v > self.height {
            return false;
        }

        hit.t = t;
        hit.intersected = true;
        hit.material = Some(&self.material);
        hit.normal = self.normal;
        hit.u = hit_u;
        hit.v = hit_v;
        hit.tangent = self.u;
        hit.bitangent = self.v;

        true
    }

    pub fn translate(&mut self, t: Vec3) {
        self.origin += t;
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        self.normal = rot * self.normal;
        self.u = rot * self.u;
        self.v = rot * self.v;
    }

    pub fn bounding_box(&self) -> Aabb {
        let c1 = self.origin + self.u * self.width + self.v * self.height + self.normal;
        let c2 = self.origin - self.normal;
        Aabb::from_points(c1, c2)
    }
}
