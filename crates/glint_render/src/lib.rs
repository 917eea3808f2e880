//! Glint render engine - recursive CPU ray tracing.
//!
//! A Whitted-style recursive ray tracer: primary rays resolve the nearest
//! surface through a shape hierarchy with bounding-box culling (including
//! boolean CSG combination), and a composable material tree turns each hit
//! into a color via shadow-tested lights and bounded reflection/refraction
//! recursion.

mod camera;
mod circle;
mod csg;
mod hit;
mod light;
mod material;
mod normal_map;
mod plane;
mod renderer;
mod sampling;
mod scene;
mod shape;
mod sphere;
mod texture;
mod triangle;
mod tube;

pub use camera::PerspectiveCamera;
pub use circle::Circle;
pub use csg::{CsgNode, CsgOp};
pub use hit::{Hit, BOUNCES_UNSET};
pub use light::Light;
pub use material::{Color, Material};
pub use normal_map::NormalMap;
pub use plane::Plane;
pub use renderer::{render, Framebuffer, DEPTH_MISS};
pub use scene::Scene;
pub use shape::{Shape, ShapeGroup};
pub use sphere::Sphere;
pub use texture::{Texture, TextureSource};
pub use triangle::Triangle;
pub use tube::Tube;

/// Re-export the math types the public API is expressed in.
pub use glint_math::{Aabb, Interval, Ray, Vec2, Vec3, RAY_T_MIN, SURFACE_EPS};
