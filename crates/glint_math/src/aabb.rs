use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used to cheaply reject ray/shape tests.
///
/// Boxes are derived data: always recomputable from a shape's current
/// parameters, never authoritative on their own. A stale box costs
/// performance, not correctness, as long as callers refresh cached boxes
/// after transforming shapes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points (any two opposite corners).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            min: a.min(b),
            max: a.max(b),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create a degenerate AABB around a single point.
    pub fn from_point(p: Vec3) -> Self {
        Self::from_points(p, p)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn union(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Grow the box outward by the given margin on every side.
    pub fn grown(&self, margin: Vec3) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Test whether a point lies inside the box (inclusive).
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.x <= p.x
            && p.x <= self.max.x
            && self.min.y <= p.y
            && p.y <= self.max.y
            && self.min.z <= p.z
            && p.z <= self.max.z
    }

    /// Slab-test ray intersection.
    ///
    /// A hit requires the slab overlap to be non-empty and to end in front
    /// of the ray origin. Rays parallel to an axis are rejected when their
    /// origin lies outside that axis' slab.
    pub fn hit(&self, ray: &Ray) -> bool {
        let mut overlap = Interval::UNIVERSE;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir != 0.0 {
                let t1 = (self.min[axis] - origin) / dir;
                let t2 = (self.max[axis] - origin) / dir;

                overlap.min = overlap.min.max(t1.min(t2));
                overlap.max = overlap.max.min(t1.max(t2));
            } else if !Interval::new(self.min[axis], self.max[axis]).surrounds(origin) {
                return false;
            }
        }

        overlap.max > overlap.min && overlap.max > 0.0
    }

    /// Pad near-zero extents so flat shapes still get a usable slab.
    fn pad_to_minimums(&mut self) {
        let delta = 1e-4;
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] < delta {
                self.min[axis] -= delta / 2.0;
                self.max[axis] += delta / 2.0;
            }
        }
    }

    /// A box containing nothing; the identity for `union`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, 6.0));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 6.0));
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let b = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let u = Aabb::union(&a, &b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_union_with_empty() {
        let a = Aabb::from_points(Vec3::NEG_ONE, Vec3::ONE);
        let u = Aabb::union(&Aabb::EMPTY, &a);
        assert_eq!(u, a);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Ray pointing at the box
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&ray));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_hit_axis_parallel() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Parallel to X inside the Y/Z slabs
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(aabb.hit(&ray));

        // Parallel to X but outside the Y slab
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_hit_from_inside() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(2.0));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::splat(3.0)));
    }

    #[test]
    fn test_flat_aabb_is_padded() {
        // A flat rectangle still needs a slab with volume
        let aabb = Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(aabb.max.y > aabb.min.y);

        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(aabb.hit(&ray));
    }
}
