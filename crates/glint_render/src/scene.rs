//! Scene: the shape graph, the lights, and the background material.

use std::sync::Arc;

use rand::RngCore;

use crate::hit::Hit;
use crate::light::Light;
use crate::material::{Color, Material};
use crate::shape::{Shape, ShapeGroup};

pub struct Scene {
    /// Root group; every traversal starts at its bounding box.
    pub shapes: ShapeGroup,
    pub lights: Vec<Light>,
    /// Shaded for rays that escape the scene. Usually a skybox or a
    /// solid color.
    pub background: Arc<Material>,
}

impl Scene {
    pub fn new(background: Arc<Material>) -> Self {
        Self {
            shapes: ShapeGroup::new(),
            lights: Vec::new(),
            background,
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.add(shape);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Refresh cached bounds after shapes have been moved in place.
    pub fn update_bounds(&mut self) {
        self.shapes.update_bounds();
    }

    /// Resolve the closest hit for the record's ray.
    pub fn intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        self.shapes.intersect(hit)
    }

    /// Occlusion variant: shapes flagged `cast_shadows = false` are
    /// skipped.
    pub fn shadow_intersect<'a>(&'a self, hit: &mut Hit<'a>) -> bool {
        self.shapes.shadow_intersect(hit)
    }

    /// Shade a resolved hit, or the background if the ray escaped.
    pub fn shade(&self, hit: &Hit<'_>, rng: &mut dyn RngCore) -> Color {
        if hit.intersected {
            match hit.material {
                Some(material) => material.shade(hit, self, rng),
                None => Color::ZERO,
            }
        } else {
            self.background.shade(hit, self, rng)
        }
    }
}
