//! Closest-hit accumulator threaded through one intersection traversal.

use crate::material::Material;
use glint_math::{Ray, Vec3, RAY_T_MIN};

/// Sentinel for an unset bounce budget: the first recursive material to
/// shade this hit installs its own configured maximum.
pub const BOUNCES_UNSET: i32 = -1;

/// Record of the closest valid hit found so far along one ray.
///
/// Exactly one traversal owns a `Hit` at a time; shapes receive it by
/// mutable borrow and may only improve it (smaller valid `t`). The
/// material reference borrows from the scene's shape graph and never
/// outlives the traversal.
#[derive(Clone)]
pub struct Hit<'a> {
    /// The ray this traversal is resolving.
    pub ray: Ray,
    /// Distance along the ray; only meaningful when `intersected` is true.
    pub t: f32,
    /// Local surface coordinates at the hit.
    pub u: f32,
    pub v: f32,
    /// Surface frame at the hit.
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    /// Whether any shape has claimed this record.
    pub intersected: bool,
    /// Material of the hit shape, borrowed from the scene graph.
    pub material: Option<&'a Material>,
    /// Remaining reflective/refractive bounces. `BOUNCES_UNSET` until a
    /// recursive material installs its maximum; 0 means exhausted and
    /// further recursion must yield black.
    pub bounces_left: i32,
    /// Diagnostics toggle; shading paths may log extra detail when set.
    pub debug: bool,
}

impl<'a> Hit<'a> {
    /// Start a fresh traversal for `ray`.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            t: 0.0,
            u: 0.0,
            v: 0.0,
            normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
            bitangent: Vec3::ZERO,
            intersected: false,
            material: None,
            bounces_left: BOUNCES_UNSET,
            debug: false,
        }
    }

    /// The world-space hit position.
    pub fn position(&self) -> Vec3 {
        self.ray.at(self.t)
    }

    /// Whether a candidate `t` would improve this record: in front of the
    /// self-intersection epsilon and closer than any held hit.
    pub fn improves(&self, t: f32) -> bool {
        t > RAY_T_MIN && (!self.intersected || t < self.t)
    }
}
