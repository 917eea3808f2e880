//! Normal-map decorator: perturbs an inner shape's hit normals.

use std::sync::Arc;

use glint_math::{Aabb, Vec3};

use crate::hit::Hit;
use crate::material::Material;
use crate::shape::Shape;
use crate::texture::Texture;

/// Wraps a shape and bends its surface normals by a texture lookup.
///
/// The map encodes a tangent-space direction as a color: 0.5 per channel
/// is no offset, and the decoded offset is applied in the hit's
/// tangent/bitangent/normal frame. Intersection geometry (distance, uv,
/// bounds) is entirely the inner shape's.
pub struct NormalMap {
    inner: Box<Shape>,
    map: Texture,
    factor: f32,
}

impl NormalMap {
    pub fn new(inner: Shape, map: Texture) -> Self {
        Self::with_factor(inner, map, 1.0)
    }

    /// `factor` scales the decoded offset before it bends the normal.
    pub fn with_factor(inner: Shape, map: Texture, factor: f32) -> Self {
        Self {
            inner: Box::new(inner),
            map,
            factor,
        }
    }

    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        if !self.inner.intersect(hit) {
            return false;
        }

        // Recenter the color around zero so the map can push the normal
        // both ways, then restore the full range.
        let offset =
            (self.map.color_at(hit.u, hit.v) - Vec3::splat(0.5)) * 2.0 * self.factor;
        let world_offset =
            offset.x * hit.tangent + offset.y * hit.bitangent + offset.z * hit.normal;

        if hit.debug {
            log::debug!("normal map offset {offset:?} world {world_offset:?}");
        }

        hit.normal = (hit.normal + world_offset).normalize();
        true
    }

    pub fn shadow_intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        // Shadow rays only need occlusion; the perturbed normal is
        // irrelevant to them.
        self.inner.shadow_intersect(hit)
    }

    pub fn translate(&mut self, t: Vec3) {
        self.inner.translate(t);
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.inner.rotate(axis, angle);
    }

    pub fn local_origin(&self) -> Vec3 {
        self.inner.local_origin()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.inner.bounding_box()
    }

    pub fn update_bounds(&mut self) {
        self.inner.update_bounds();
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.inner.set_material(material);
    }

    pub fn set_cast_shadows(&mut self, cast: bool) {
        self.inner.set_cast_shadows(cast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use glint_math::Ray;

    fn floor() -> Shape {
        Shape::Plane(Plane::centered(
            Vec3::ZERO,
            Vec3::Y,
            4.0,
            4.0,
            Vec3::X,
            Arc::new(Material::solid(1.0, 1.0, 1.0)),
        ))
    }

    #[test]
    fn test_neutral_map_keeps_normal() {
        let mapped = NormalMap::new(floor(), Texture::Solid(Color::splat(0.5)));
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y));
        assert!(mapped.intersect(&mut hit));
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_map_tilts_normal_along_tangent() {
        // Full red: offset (+1, 0, 0) in the tangent frame
        let mapped = NormalMap::new(floor(), Texture::Solid(Color::new(1.0, 0.5, 0.5)));
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y));
        assert!(mapped.intersect(&mut hit));

        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Y).length() > 0.1);
        // Tilted toward the hit's tangent axis, nowhere else
        assert!(hit.normal.dot(hit.tangent) > 0.0);
        assert!(hit.normal.dot(hit.bitangent).abs() < 1e-5);
    }

    #[test]
    fn test_factor_scales_the_tilt() {
        let map = Texture::Solid(Color::new(1.0, 0.5, 0.5));
        let strong = NormalMap::with_factor(floor(), map, 1.0);
        let weak = NormalMap::with_factor(
            floor(),
            Texture::Solid(Color::new(1.0, 0.5, 0.5)),
            0.1,
        );

        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y);
        let mut strong_hit = Hit::new(ray);
        assert!(strong.intersect(&mut strong_hit));
        let mut weak_hit = Hit::new(ray);
        assert!(weak.intersect(&mut weak_hit));

        assert!(strong_hit.normal.dot(Vec3::Y) < weak_hit.normal.dot(Vec3::Y));
    }

    #[test]
    fn test_miss_stays_miss() {
        let mapped = NormalMap::new(floor(), Texture::Solid(Color::splat(0.5)));
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y));
        assert!(!mapped.intersect(&mut hit));
        assert!(!hit.intersected);
    }

    #[test]
    fn test_geometry_is_the_inner_shapes() {
        let sphere = Shape::Sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::new(Material::solid(1.0, 1.0, 1.0)),
        ));
        let expected = sphere.bounding_box();
        let mapped = NormalMap::new(sphere, Texture::Solid(Color::splat(0.5)));

        assert_eq!(mapped.bounding_box(), expected);

        let mut hit = Hit::new(Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(mapped.intersect(&mut hit));
        assert!((hit.t - 4.0).abs() < 1e-4);
    }
}
