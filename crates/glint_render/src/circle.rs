//! Bounded disk primitive.

use std::sync::Arc;

use glam::Quat;
use glint_math::{Aabb, Vec3, RAY_T_MIN, SURFACE_EPS};

use crate::hit::Hit;
use crate::material::Material;

/// A flat disk: a plane test bounded by distance from the center.
pub struct Circle {
    pub origin: Vec3,
    normal: Vec3,
    radius: f32,
    u: Vec3,
    v: Vec3,
    material: Arc<Material>,
    pub cast_shadows: bool,
}

impl Circle {
    pub fn new(origin: Vec3, normal: Vec3, radius: f32, u: Vec3, material: Arc<Material>) -> Self {
        let normal = normal.normalize();
        let v = u.cross(normal);
        let u = v.cross(normal);
        Self {
            origin,
            normal,
            radius,
            u,
            v,
            material,
            cast_shadows: true,
        }
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        let n_dot_d = self.normal.dot(hit.ray.direction);
        if n_dot_d.abs() < SURFACE_EPS {
            return false;
        }

        let offset = self.origin.dot(self.normal);
        let t = (offset - self.normal.dot(hit.ray.origin)) / n_dot_d;

        if t < RAY_T_MIN || (hit.intersected && hit.t < t) {
            return false;
        }

        if (hit.ray.at(t) - self.origin).length() > self.radius {
            return false;
        }

        hit.t = t;
        hit.intersected = true;
        hit.material = Some(&self.material);

        let mut normal = self.normal;
        if hit.ray.direction.dot(normal) > 0.0 {
            normal = -normal;
        }
        hit.normal = normal;

        // UV anchored at the disk's corner so one texture tile covers the
        // whole disk without repeating.
        let local = hit.position() - self.origin;
        hit.u = local.dot(self.u) / 2.0 + self.radius;
        hit.v = local.dot(self.v) / 2.0 + self.radius;

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
        let spread = self.u.abs() * self.radius + self.v.abs() * self.radius
            + self.normal.abs() * SURFACE_EPS;
        Aabb::from_points(self.origin - spread, self.origin + spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Ray;

    fn disk() -> Circle {
        Circle::new(
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            Vec3::X,
            Arc::new(Material::solid(1.0, 1.0, 1.0)),
        )
    }

    #[test]
    fn test_circle_hit_inside_radius() {
        let circle = disk();
        let mut hit = Hit::new(Ray::new(Vec3::new(0.5, 2.0, 0.0), Vec3::NEG_Y));
        assert!(circle.intersect(&mut hit));
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_outside_radius_misses() {
        let circle = disk();
        let mut hit = Hit::new(Ray::new(Vec3::new(1.5, 2.0, 0.0), Vec3::NEG_Y));
        assert!(!circle.intersect(&mut hit));
    }

    #[test]
    fn test_circle_normal_faces_ray() {
        let circle = disk();

        // From above, the +Y normal already faces the ray
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y));
        assert!(circle.intersect(&mut hit));
        assert_eq!(hit.normal, Vec3::Y);

        // From below it must flip
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y));
        assert!(circle.intersect(&mut hit));
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_circle_parallel_ray_misses() {
        let circle = disk();
        let mut hit = Hit::new(Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X));
        assert!(!circle.intersect(&mut hit));
    }

    #[test]
    fn test_circle_bounding_box_spans_disk() {
        let circle = disk();
        let bbox = circle.bounding_box();
        assert!(bbox.contains_point(Vec3::new(0.9, 0.0, 0.0)));
        assert!(bbox.contains_point(Vec3::new(0.0, 0.0, -0.9)));
        assert!(!bbox.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }
}
