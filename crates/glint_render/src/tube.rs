//! Open cylindrical tube primitive (lateral surface only).
//!
//! End caps are composed separately: a cylinder is a tube plus two disks,
//! a capsule a tube plus two spheres (see `ShapeGroup`).

use std::sync::Arc;

use glam::{Mat3, Quat};
use glint_math::{Aabb, Vec3, RAY_T_MIN};

use crate::hit::Hit;
use crate::material::Material;

pub struct Tube {
    pub origin: Vec3,
    axis: Vec3,
    radius: f32,
    length: f32,
    u: Vec3,
    material: Arc<Material>,
    pub cast_shadows: bool,
}

impl Tube {
    pub fn new(
        origin: Vec3,
        axis: Vec3,
        radius: f32,
        length: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let axis = axis.normalize();
        let v = axis.cross(u);
        let u = axis.cross(v);
        Self {
            origin,
            axis,
            radius,
            length,
            u,
            material,
            cast_shadows: true,
        }
    }

    /// Build a tube spanning two end points.
    pub fn between(
        origin: Vec3,
        end: Vec3,
        radius: f32,
        u: Vec3,
        material: Arc<Material>,
    ) -> Self {
        let axis = end - origin;
        Self::new(origin, axis.normalize(), radius, axis.length(), u, material)
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = material;
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        // Rotate the ray into the tube's local frame, axis along local Y,
        // then solve the 2-D circle equation in local X/Z.
        let rot = Mat3::from_cols(
            self.u.normalize(),
            self.axis,
            self.u.cross(self.axis).normalize(),
        );
        let local_origin = rot.transpose() * (hit.ray.origin - self.origin);
        let local_dir = rot.transpose() * hit.ray.direction;

        let a = local_dir.x * local_dir.x + local_dir.z * local_dir.z;
        if a < 1e-12 {
            // Ray parallel to the axis never crosses the lateral surface
            return false;
        }
        let b = 2.0 * (local_dir.x * local_origin.x + local_dir.z * local_origin.z);
        let c = local_origin.x * local_origin.x + local_origin.z * local_origin.z
            - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();
        let mut t1 = (-b + sqrtd) / (2.0 * a);
        let mut t2 = (-b - sqrtd) / (2.0 * a);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        let at = |t: f32| local_origin + local_dir * t;
        let t1y = at(t1).y;
        let t2y = at(t2).y;

        let t = if t1 > RAY_T_MIN && t1y >= 0.0 && t1y <= self.length {
            t1
        } else if t2 > RAY_T_MIN && t2y >= 0.0 && t2y <= self.length {
            t2
        } else {
            return false;
        };

        if hit.intersected && t > hit.t {
            return false;
        }

        let mut local_normal = at(t);
        local_normal.y = 0.0;
        let normal = (rot * local_normal).normalize();

        hit.t = t;
        hit.intersected = true;
        hit.material = Some(&self.material);
        hit.normal = normal;

        hit.u = (hit.position() - self.origin).dot(self.axis) / self.length;
        hit.v = normal.dot(self.u).clamp(-1.0, 1.0).acos();

        hit.tangent = self.axis;
        hit.bitangent = normal.cross(hit.tangent);

        true
    }

    pub fn translate(&mut self, t: Vec3) {
        self.origin += t;
    }

    pub fn rotate(&mut self, rot_axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(rot_axis.normalize(), angle);
        self.axis = rot * self.axis;
        self.u = rot * self.u;
    }

    /// Conservative box: the swept segment grown by the radius on every
    /// axis. Looser than an exact cylinder box but always containing it.
    pub fn bounding_box(&self) -> Aabb {
        let end = self.origin + self.axis * self.length;
        Aabb::from_points(self.origin, end).grown(Vec3::splat(self.radius))
    }
}
