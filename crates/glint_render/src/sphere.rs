//! Sphere primitive.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::Quat;
use glint_math::{Aabb, Vec3};

use crate::hit::Hit;
use crate::material::Material;

/// A sphere with a local orientation frame.
///
/// The `up`/`meridian`/`east` axes anchor the spherical UV parametrization
/// so textures rotate with the shape.
pub struct Sphere {
    pub center: Vec3,
    radius: f32,
    up: Vec3,
    meridian: Vec3,
    east: Vec3,
    material: Arc<Material>,
    pub cast_shadows: bool,
}

impl Sphere {
    /// Create a sphere with the default Y-up orientation frame.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self::with_frame(center, Vec3::Y, Vec3::Z, radius, material)
    }

    /// Create a sphere with an explicit orientation frame.
    ///
    /// `meridian` is re-orthogonalized against `up`.
    pub fn with_frame(
        center: Vec3,
        up: Vec3,
        meridian: Vec3,
        radius: f32,
        material: Arc<Material>,
    ) -> Self {
        let up = up.normalize();
        let east = up.cross(meridian).normalize_or(Vec3::X);
        let meridian = east.cross(up);
        Self {
            center,
            radius,
            up,
            meridian,
            east,
            material,
            cast_shadows: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }

    /// Quadratic ray test. Improves `hit` only with the closest root in
    /// front of the self-intersection epsilon.
    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        // Shift the ray so the sphere sits at the origin; this simplifies
        // the quadratic coefficients.
        let origin = hit.ray.origin - self.center;
        let dir = hit.ray.direction;

        let a = dir.length_squared();
        let b = 2.0 * dir.dot(origin);
        let c = origin.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / (2.0 * a);
        let t2 = (-b + sqrtd) / (2.0 * a);

        let t = if hit.improves(t1) {
            t1
        } else if hit.improves(t2) {
            t2
        } else {
            return false;
        };

        hit.t = t;
        hit.intersected = true;
        hit.material = Some(&self.material);

        let mut normal = (hit.position() - self.center).normalize();
        // Keep the normal facing the incoming ray
        if dir.dot(normal) > 0.0 {
            normal = -normal;
        }
        hit.normal = normal;

        // Spherical UV relative to the local frame
        let theta = (-normal.dot(self.up)).clamp(-1.0, 1.0).acos();
        let phi = (-normal.dot(self.meridian)).atan2(normal.dot(self.east)) + PI;
        hit.u = phi / (2.0 * PI);
        hit.v = theta / PI;

        hit.tangent = self.up.cross(normal);
        hit.bitangent = normal.cross(hit.tangent);

        true
    }

    pub fn translate(&mut self, t: Vec3) {
        self.center += t;
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        self.up = rot * self.up;
        self.meridian = rot * self.meridian;
        self.east = rot * self.east;
    }

    pub fn bounding_box(&self) -> Aabb {
        let diagonal = Vec3::splat(self.radius);
        Aabb::from_points(self.center - diagonal, self.center + diagonal)
    }
}
