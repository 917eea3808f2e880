// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Candidate hits at or below this ray parameter are rejected as
/// self-intersections ("surface acne").
pub const RAY_T_MIN: f32 = 1e-4;

/// Tolerance for near-parallel and on-surface classification tests.
pub const SURFACE_EPS: f32 = 1e-4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_axis_angle_rotation() {
        let rot = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let v = rot * Vec3::X;
        assert!((v - Vec3::NEG_Z).length() < 1e-6);
    }
}
