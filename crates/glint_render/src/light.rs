//! Light sources and the shadow-ray occlusion test.

use glam::Quat;
use rand::RngCore;

use glint_math::{Ray, Vec3, RAY_T_MIN};

use crate::hit::Hit;
use crate::material::Color;
use crate::sampling::random_on_sphere;
use crate::scene::Scene;

/// How far away the sun's virtual position sits along its direction.
const SUN_DISTANCE: f32 = 1e5;

pub enum Light {
    /// Constant fill sampled just off the surface along the normal, so
    /// nearby geometry darkens it.
    Ambient { color: Color },
    /// Directional light placed at a large fixed distance.
    Sun { color: Color, direction: Vec3 },
    /// Point light, optionally exempt from casting shadows.
    Point {
        origin: Vec3,
        color: Color,
        cast_shadows: bool,
    },
    /// Spherical area light: occlusion is averaged over random points on
    /// the sphere's surface, giving soft shadow edges.
    SoftSphere {
        origin: Vec3,
        color: Color,
        cast_shadows: bool,
        radius: f32,
        samples: u32,
    },
}

impl Light {
    pub fn ambient(color: Color) -> Self {
        Light::Ambient { color }
    }

    pub fn sun(color: Color, direction: Vec3) -> Self {
        Light::Sun {
            color,
            direction: direction.normalize(),
        }
    }

    pub fn point(origin: Vec3, color: Color) -> Self {
        Light::Point {
            origin,
            color,
            cast_shadows: true,
        }
    }

    pub fn soft_sphere(origin: Vec3, color: Color, radius: f32, samples: u32) -> Self {
        Light::SoftSphere {
            origin,
            color,
            cast_shadows: true,
            radius,
            samples,
        }
    }

    /// A position to aim a shadow ray at for the given hit. Area lights
    /// draw a fresh random point per call.
    pub fn sample_position(&self, hit: &Hit<'_>, rng: &mut dyn RngCore) -> Vec3 {
        match self {
            Light::Ambient { .. } => hit.position() + hit.normal,
            Light::Sun { direction, .. } => hit.position() - *direction * SUN_DISTANCE,
            Light::Point { origin, .. } => *origin,
            Light::SoftSphere { origin, radius, .. } => *origin + random_on_sphere(rng, *radius),
        }
    }

    /// The light's contribution at the hit, after shadow occlusion.
    pub fn radiance(&self, hit: &Hit<'_>, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        match self {
            Light::Ambient { color } | Light::Sun { color, .. } => {
                let sample = self.sample_position(hit, rng);
                if occluded(scene, sample, hit.position()) {
                    Color::ZERO
                } else {
                    *color
                }
            }
            Light::Point {
                origin,
                color,
                cast_shadows,
            } => {
                if *cast_shadows && occluded(scene, *origin, hit.position()) {
                    Color::ZERO
                } else {
                    *color
                }
            }
            Light::SoftSphere {
                color,
                cast_shadows,
                samples,
                ..
            } => {
                if !*cast_shadows {
                    return *color;
                }
                let mut lit = 0u32;
                for _ in 0..*samples {
                    let sample = self.sample_position(hit, rng);
                    if !occluded(scene, sample, hit.position()) {
                        lit += 1;
                    }
                }
                *color * (lit as f32 / (*samples).max(1) as f32)
            }
        }
    }

    pub fn translate(&mut self, t: Vec3) {
        match self {
            Light::Point { origin, .. } | Light::SoftSphere { origin, .. } => *origin += t,
            Light::Ambient { .. } | Light::Sun { .. } => {}
        }
    }

    /// Rotate about the world origin.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        match self {
            Light::Point { origin, .. } | Light::SoftSphere { origin, .. } => {
                *origin = rot * *origin;
            }
            Light::Ambient { .. } | Light::Sun { .. } => {}
        }
    }
}

/// Shadow test: cast from the light sample toward the surface point and
/// see whether anything shadow-opaque sits strictly between them.
fn occluded(scene: &Scene, sample: Vec3, surface: Vec3) -> bool {
    let to_surface = surface - sample;
    let distance = to_surface.length();
    if distance <= RAY_T_MIN {
        return false;
    }

    let mut shadow = Hit::new(Ray::new(sample, to_surface));
    scene.shadow_intersect(&mut shadow);

    shadow.intersected && shadow.t > RAY_T_MIN && shadow.t < distance - RAY_T_MIN
}
