//! Surface textures: color as a function of local (u, v) coordinates.
//!
//! External texture providers (image-backed lookups, procedural noise)
//! plug in through the `TextureSource` trait; the engine itself only ever
//! asks for `color_at(u, v)`.

use std::sync::Arc;

use glint_math::Vec3;

use crate::material::Color;

/// Anything that can answer a color lookup at local surface coordinates.
pub trait TextureSource: Send + Sync {
    fn color_at(&self, u: f32, v: f32) -> Color;
}

/// Built-in texture kinds plus an escape hatch for external sources.
pub enum Texture {
    /// A single flat color everywhere.
    Solid(Color),
    /// Sine-based checkerboard in black and white.
    Checker { scale: f32 },
    /// Visualizes (u, v) directly; debugging aid.
    Uv,
    /// Derives a normal-map color from a height field: the source's
    /// channel mean is sampled at `step` offsets along u and v and the
    /// finite-difference surface normal is encoded into 0-1 range. Feeds
    /// `NormalMap`.
    Bump { source: Arc<Texture>, step: f32 },
    /// Externally provided lookup (image, noise, ...).
    Custom(Arc<dyn TextureSource>),
}

impl Texture {
    pub fn color_at(&self, u: f32, v: f32) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker { scale } => {
                let su = (scale * u).sin();
                let sv = (scale * v).sin();
                if (su > 0.0) == (sv > 0.0) {
                    Color::ONE
                } else {
                    Color::ZERO
                }
            }
            Texture::Uv => Color::new(u, v, 0.0),
            Texture::Bump { source, step } => {
                let height = |u: f32, v: f32| {
                    let c = source.color_at(u, v);
                    (c.x + c.y + c.z) / 3.0
                };
                let a = Vec3::new(u, v, height(u, v));
                let b = Vec3::new(u + step, v, height(u + step, v));
                let c = Vec3::new(u, v + step, height(u, v + step));

                let normal = (b - a).cross(c - a).normalize();
                normal / 2.0 + Vec3::splat(0.5)
            }
            Texture::Custom(source) => source.color_at(u, v),
        }
    }

    /// Bump-to-normal conversion of a height texture with the default
    /// sampling step.
    pub fn bump(source: Arc<Texture>) -> Self {
        Texture::Bump {
            source,
            step: 0.005,
        }
    }
}
