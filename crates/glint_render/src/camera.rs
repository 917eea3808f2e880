//! Perspective camera with a thin-lens aperture.

use glam::Quat;
use rand::RngCore;

use glint_math::{Ray, Vec2, Vec3};

use crate::renderer::Framebuffer;
use crate::sampling::gen_centered;

/// Pinhole camera extended with a lens: primary rays start from a point
/// jittered across the aperture and pass through the focal-plane point of
/// their pixel, so geometry off the focal plane blurs.
pub struct PerspectiveCamera {
    pub origin: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Image-plane extent at unit distance, from the vertical field of
    /// view and aspect ratio.
    width: f32,
    height: f32,
    near: f32,
    pub aperture_size: f32,
    pub focal_length: f32,
    /// Orthonormal view basis; `w` points against the gaze.
    u: Vec3,
    v: Vec3,
    w: Vec3,
    pub samples_per_pixel: u32,
    /// Apply the depth-based blur post-process after rendering.
    pub blur_compensation: bool,
}

impl PerspectiveCamera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: Vec3,
        look_at: Vec3,
        up: Vec3,
        fovy: f32,
        aspect: f32,
        near: f32,
        aperture_size: f32,
        focal_length: f32,
    ) -> Self {
        let height = 2.0 * (fovy / 2.0).tan();
        let width = height * aspect;

        let mut camera = Self {
            origin,
            look_at,
            up,
            width,
            height,
            near,
            aperture_size,
            focal_length,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            samples_per_pixel: 1,
            blur_compensation: false,
        };
        camera.update();
        camera
    }

    /// Recompute the view basis from origin, look-at and up.
    pub fn update(&mut self) {
        let gaze = (self.look_at - self.origin).normalize();
        self.w = -gaze;
        self.u = self.up.cross(self.w).normalize();
        self.v = self.w.cross(self.u);
    }

    /// The focal-plane point behind normalized image coordinates in
    /// [0, 1] x [0, 1].
    fn through_point(&self, coords: Vec2) -> Vec3 {
        let x = coords.x;
        let y = coords.y;
        self.origin
            + (-((2.0 * x - 1.0) * (self.width / 2.0) * self.u)
                - ((2.0 * y - 1.0) * (self.height / 2.0) * self.v)
                - self.near * self.w)
                * self.focal_length
    }

    /// A primary ray for the pixel, its source jittered across the lens
    /// plane by the aperture size.
    pub fn make_ray(&self, coords: Vec2, rng: &mut dyn RngCore) -> Ray {
        let du = gen_centered(rng) * self.aperture_size;
        let dv = gen_centered(rng) * self.aperture_size;
        let source = self.origin + du * self.u + dv * self.v;

        Ray::new(source, self.through_point(coords) - source)
    }

    /// Jitter-free variant for the depth pass.
    pub fn make_depth_ray(&self, coords: Vec2) -> Ray {
        Ray::new(self.origin, self.through_point(coords) - self.origin)
    }

    /// Depth-based blur pass: out-of-focus pixels get a box blur whose
    /// radius grows with their distance from the focal plane. Runs only
    /// when `blur_compensation` is set; consumes the depth buffer.
    pub fn apply_depth_of_field(&self, image: &mut Framebuffer, depth: &mut Framebuffer) {
        if !self.blur_compensation {
            return;
        }

        for pixel in depth.pixels_mut() {
            let dist = (pixel.x - self.focal_length).abs().sqrt();
            *pixel = Vec3::splat(dist);
        }
        depth.normalize();

        let sharp = image.clone();
        let image_unit = (image.width() + image.height()) as f32 / 2.0;

        for y in 0..image.height() {
            for x in 0..image.width() {
                let blur = depth.get(x, y).x;
                let radius = (blur * image_unit * self.aperture_size) as i32;
                image.set(x, y, sharp.box_blurred_at(x, y, radius));
            }
        }
    }

    pub fn translate(&mut self, t: Vec3) {
        self.origin += t;
    }

    /// Rotate the view basis in place; origin stays put.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        self.u = rot * self.u;
        self.v = rot * self.v;
        self.w = rot * self.w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::Y,
            FRAC_PI_2,
            1.0,
            1.0,
            0.0,
            1.0,
        )
    }

    #[test]
    fn test_center_ray_follows_gaze() {
        let cam = camera();
        let ray = cam.make_depth_ray(Vec2::new(0.5, 0.5));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(ray.origin, Vec3::ZERO);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let cam = camera();
        assert!(cam.u.dot(cam.v).abs() < 1e-6);
        assert!(cam.u.dot(cam.w).abs() < 1e-6);
        assert!((cam.u.length() - 1.0).abs() < 1e-6);
        assert!((cam.v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_image_x_spans_horizontal_fov() {
        let cam = camera();
        let left = cam.make_depth_ray(Vec2::new(0.0, 0.5));
        let right = cam.make_depth_ray(Vec2::new(1.0, 0.5));
        // Opposite horizontal components, matched vertical
        assert!(left.direction.x * right.direction.x < 0.0);
        assert!((left.direction.y - right.direction.y).abs() < 1e-5);
    }

    #[test]
    fn test_zero_aperture_ray_is_deterministic() {
        let cam = camera();
        let mut rng = StdRng::seed_from_u64(3);
        let a = cam.make_ray(Vec2::new(0.25, 0.75), &mut rng);
        let b = cam.make_ray(Vec2::new(0.25, 0.75), &mut rng);
        assert_eq!(a.origin, b.origin);
        assert!((a.direction - b.direction).length() < 1e-6);
    }

    #[test]
    fn test_aperture_jitters_source_in_lens_plane() {
        let mut cam = camera();
        cam.aperture_size = 0.5;
        let mut rng = StdRng::seed_from_u64(3);
        let ray = cam.make_ray(Vec2::new(0.5, 0.5), &mut rng);
        // Source moved off the origin, but only within the u-v plane
        assert!(ray.origin != Vec3::ZERO);
        assert!(ray.origin.dot(cam.w).abs() < 1e-6);
        assert!(ray.origin.length() <= 0.5 * 2.0_f32.sqrt() / 2.0 + 1e-5);
    }

    #[test]
    fn test_rotate_turns_gaze() {
        let mut cam = camera();
        cam.rotate(Vec3::Y, FRAC_PI_2);
        let ray = cam.make_depth_ray(Vec2::new(0.5, 0.5));
        // Gaze was -Z; a quarter turn about Y brings it to -X
        assert!((ray.direction - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_translate_moves_origin() {
        let mut cam = camera();
        cam.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.origin, Vec3::new(1.0, 2.0, 3.0));
    }
}
