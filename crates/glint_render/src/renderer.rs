//! The render loop and the framebuffers it fills.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use glint_math::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::hit::Hit;
use crate::material::Color;
use crate::scene::Scene;

/// Depth value of a pixel whose every sample escaped the scene. Replaced
/// by the frame's maximum depth after the render pass.
pub const DEPTH_MISS: f32 = -1.0;

/// A width x height grid of linear RGB values.
#[derive(Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Component-wise maximum over all pixels.
    pub fn max(&self) -> Color {
        self.pixels
            .iter()
            .fold(Color::splat(f32::NEG_INFINITY), |acc, p| acc.max(*p))
    }

    /// Component-wise minimum over all pixels.
    pub fn min(&self) -> Color {
        self.pixels
            .iter()
            .fold(Color::splat(f32::INFINITY), |acc, p| acc.min(*p))
    }

    /// Rescale all pixels into [0, 1] by the frame's min and max.
    pub fn normalize(&mut self) {
        let min = self.min();
        let range = (self.max() - min).max(Vec3::splat(1e-12));
        for pixel in &mut self.pixels {
            *pixel = (*pixel - min) / range;
        }
    }

    /// Average of the square neighbourhood of side `radius` around the
    /// pixel, clipped to the frame. A radius of one or less is a no-op.
    pub fn box_blurred_at(&self, x: usize, y: usize, radius: i32) -> Color {
        if radius <= 1 {
            return self.get(x, y);
        }

        let half = radius / 2;
        let mut count = 0;
        let mut sum = Color::ZERO;

        for ox in -half..half {
            let sx = x as i32 + ox;
            if sx <= 0 || sx >= self.width as i32 {
                continue;
            }
            for oy in -half..half {
                let sy = y as i32 + oy;
                if sy <= 0 || sy >= self.height as i32 {
                    continue;
                }
                count += 1;
                sum += self.get(sx as usize, sy as usize);
            }
        }

        if count == 0 {
            return self.get(x, y);
        }
        sum / count as f32
    }

    /// Pack into 8-bit RGBA with a gamma of 2.0.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            let gamma = pixel.max(Vec3::ZERO).powf(0.5).min(Vec3::ONE);
            out.push((gamma.x * 255.0) as u8);
            out.push((gamma.y * 255.0) as u8);
            out.push((gamma.z * 255.0) as u8);
            out.push(255);
        }
        out
    }
}

/// Trace the scene through the camera into a color and a depth buffer.
///
/// Rows are rendered in parallel; each row owns a seeded RNG so runs are
/// reproducible regardless of scheduling. A pixel's depth is the average
/// hit distance over its samples, or `DEPTH_MISS` when every sample
/// escaped; after the pass, missed depths are replaced by the frame's
/// maximum so the depth map stays continuous at the silhouette.
pub fn render(
    scene: &Scene,
    camera: &PerspectiveCamera,
    width: usize,
    height: usize,
) -> (Framebuffer, Framebuffer) {
    let samples = camera.samples_per_pixel.max(1);
    info!(
        "rendering {}x{} with {} sample(s) per pixel",
        width, height, samples
    );

    let rows: Vec<(Vec<Color>, Vec<Color>)> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut rng =
                StdRng::seed_from_u64((y as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ 0x5eed);
            let mut colors = Vec::with_capacity(width);
            let mut depths = Vec::with_capacity(width);

            for x in 0..width {
                let coords = Vec2::new(x as f32 / width as f32, y as f32 / height as f32);

                let mut color_sum = Color::ZERO;
                let mut depth_sum = 0.0f32;

                for _ in 0..samples {
                    let mut hit = Hit::new(camera.make_ray(coords, &mut rng));
                    scene.intersect(&mut hit);
                    color_sum += scene.shade(&hit, &mut rng);

                    if hit.intersected {
                        depth_sum += hit.t;
                    } else {
                        depth_sum = DEPTH_MISS * samples as f32;
                    }
                }

                colors.push(color_sum / samples as f32);
                depths.push(Vec3::splat(depth_sum / samples as f32));
            }

            (colors, depths)
        })
        .collect();

    let mut image = Framebuffer::new(width, height);
    let mut depth = Framebuffer::new(width, height);
    for (y, (colors, depths)) in rows.into_iter().enumerate() {
        for (x, color) in colors.into_iter().enumerate() {
            image.set(x, y, color);
        }
        for (x, d) in depths.into_iter().enumerate() {
            depth.set(x, y, d);
        }
    }

    let max_depth = depth.max();
    for pixel in depth.pixels_mut() {
        if pixel.x == DEPTH_MISS {
            *pixel = max_depth;
        }
    }

    info!("render finished");
    (image, depth)
}
