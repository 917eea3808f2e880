//! Random sampling helpers.
//!
//! All randomness flows through an explicit `RngCore` handle so parallel
//! traversals never share mutable RNG state. Glossy reflection instead
//! derives its seed from the hit position, keeping its noise pattern
//! stable across re-renders of the same point.

use glint_math::Vec3;
use rand::RngCore;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Uniform sample in [-0.5, 0.5).
#[inline]
pub fn gen_centered(rng: &mut dyn RngCore) -> f32 {
    gen_f32(rng) - 0.5
}

/// Random point on a sphere of the given radius.
pub fn random_on_sphere(rng: &mut dyn RngCore, radius: f32) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_centered(rng),
            gen_centered(rng),
            gen_centered(rng),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-8 && len_sq <= 0.25 {
            return v / len_sq.sqrt() * radius;
        }
    }
}

/// Deterministic seed from a quantized world position.
///
/// Positions are rounded to 1e-3 before hashing so neighbouring samples
/// of the same surface point agree, which keeps glossy noise spatially
/// stable under anti-aliasing and parallel execution.
pub fn position_seed(p: Vec3) -> u64 {
    let qx = (p.x * 1000.0).round().to_bits() as u64;
    let qy = (p.y * 1000.0).round().to_bits() as u64;
    let qz = (p.z * 1000.0).round().to_bits() as u64;

    let mut h = qx.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    h ^= qy.rotate_left(21);
    h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h ^= qz.rotate_left(42);
    h.wrapping_mul(0x94d0_49bb_1331_11eb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_on_sphere_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = random_on_sphere(&mut rng, 2.5);
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_position_seed_deterministic() {
        let p = Vec3::new(1.25, -3.5, 0.125);
        assert_eq!(position_seed(p), position_seed(p));
    }

    #[test]
    fn test_position_seed_quantizes() {
        // Points closer than the quantum hash identically
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = a + Vec3::splat(1e-5);
        assert_eq!(position_seed(a), position_seed(b));

        // Clearly separated points do not
        let c = a + Vec3::splat(0.1);
        assert_ne!(position_seed(a), position_seed(c));
    }
}
