use crate::Vec3;

/// A ray in 3D space with a unit-length direction.
///
/// The direction is normalized at construction; handing a ray a non-unit
/// direction anywhere else is a defect. This keeps every `t` along the ray
/// a real distance, which the shadow tests and CSG span remapping rely on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized here.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        debug_assert!(direction.is_finite());
        Self { origin, direction }
    }

    /// Create a ray from an already unit-length direction.
    #[inline]
    pub fn from_unit(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!((direction.length() - 1.0).abs() < 1e-4);
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(2.0), Vec3::new(3.0, 2.0, 3.0));
        assert_eq!(ray.at(-1.0), Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_ray_t_is_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        let p = ray.at(5.0);
        assert!((p.length() - 5.0).abs() < 1e-5);
    }
}
