//! The material tree: composable shading models evaluated per hit.
//!
//! Leaves query lights or textures; reflective and refractive leaves cast
//! new rays into the scene and recurse through `Scene::shade`. The bounce
//! budget on the `Hit` record bounds that recursion: an unset budget is
//! replaced by the material's configured maximum, an exhausted budget
//! yields black, and every recursive cast hands the child one bounce less.

use std::sync::Arc;

use glint_math::{Ray, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::hit::{Hit, BOUNCES_UNSET};
use crate::plane::Plane;
use crate::sampling::{gen_f32, position_seed};
use crate::scene::Scene;
use crate::texture::Texture;

/// Color type alias (linear RGB, typically 0-1).
pub type Color = Vec3;

pub enum Material {
    /// Pass-through texture lookup at the hit's (u, v).
    Texture(Texture),
    /// Visualizes the absolute surface normal; debugging aid.
    SurfaceNormal,
    /// Lambertian response summed over all scene lights.
    Diffuse { color: Arc<Material> },
    /// Specular highlight with a Phong exponent.
    Specular { color: Arc<Material>, exponent: f32 },
    /// Diffuse and specular in one pass over the lights, with independent
    /// color sources for each term.
    Phong {
        diffuse: Arc<Material>,
        specular: Arc<Material>,
        exponent: f32,
    },
    /// Perfect reflection, tinted.
    Mirror { tint: Arc<Material>, max_bounces: i32 },
    /// Jittered reflection averaged over several samples. The jitter RNG
    /// is seeded from the hit position so the noise pattern is stable
    /// across re-renders and across parallel workers.
    Glossy {
        tint: Arc<Material>,
        max_bounces: i32,
        samples: u32,
        roughness: f32,
    },
    /// Dielectric refraction with mirror fallback on total internal
    /// reflection.
    Glass {
        tint: Arc<Material>,
        ior: f32,
        max_bounces: i32,
    },
    /// Schlick reflectance as a grayscale factor; the mix weight for
    /// Fresnel-style blends.
    Schlick { ior: f32 },
    /// Maps the ray direction onto the six faces of a unit cube and into
    /// per-face sub-regions of one atlas texture.
    Skybox { atlas: Texture },
    /// Sum of any number of sub-materials.
    Add(Vec<Arc<Material>>),
    /// Component-wise product of two sub-materials.
    Multiply(Arc<Material>, Arc<Material>),
    /// Blend of two materials by a spatially-varying factor material,
    /// with a linear scale and bias. Saturated factors short-circuit to
    /// a pure side without evaluating the other.
    Mix {
        a: Option<Arc<Material>>,
        b: Option<Arc<Material>>,
        factor: Arc<Material>,
        scale: f32,
        bias: f32,
    },
}

impl Material {
    /// A flat color leaf.
    pub fn solid(r: f32, g: f32, b: f32) -> Self {
        Material::Texture(Texture::Solid(Color::new(r, g, b)))
    }

    /// Mix with a constant factor color.
    pub fn const_mix(a: Arc<Material>, b: Arc<Material>, factor: Color) -> Self {
        Material::Mix {
            a: Some(a),
            b: Some(b),
            factor: Arc::new(Material::Texture(Texture::Solid(factor))),
            scale: 1.0,
            bias: 0.0,
        }
    }

    /// Angle-dependent blend of a mirror and a glass of the same color:
    /// Schlick reflectance weighs the mirror side.
    pub fn fresnel(color: Arc<Material>, ior: f32, max_bounces: i32) -> Self {
        Material::Mix {
            a: Some(Arc::new(Material::Mirror {
                tint: Arc::clone(&color),
                max_bounces,
            })),
            b: Some(Arc::new(Material::Glass {
                tint: color,
                ior,
                max_bounces,
            })),
            factor: Arc::new(Material::Schlick { ior }),
            scale: 1.0,
            bias: 0.0,
        }
    }

    /// Evaluate this material for a resolved hit.
    pub fn shade(&self, hit: &Hit<'_>, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        match self {
            Material::Texture(texture) => texture.color_at(hit.u, hit.v),
            Material::SurfaceNormal => hit.normal.abs(),
            Material::Diffuse { color } => self.shade_diffuse(hit, scene, rng, color),
            Material::Specular { color, exponent } => {
                self.shade_specular(hit, scene, rng, color, *exponent)
            }
            Material::Phong {
                diffuse,
                specular,
                exponent,
            } => self.shade_phong(hit, scene, rng, diffuse, specular, *exponent),
            Material::Mirror { tint, max_bounces } => {
                self.shade_mirror(hit, scene, rng, tint, *max_bounces)
            }
            Material::Glossy {
                tint,
                max_bounces,
                samples,
                roughness,
            } => self.shade_glossy(hit, scene, rng, tint, *max_bounces, *samples, *roughness),
            Material::Glass {
                tint,
                ior,
                max_bounces,
            } => self.shade_glass(hit, scene, rng, tint, *ior, *max_bounces),
            Material::Schlick { ior } => Color::splat(schlick_reflectance(hit, *ior)),
            Material::Skybox { atlas } => shade_skybox(hit, atlas),
            Material::Add(components) => components
                .iter()
                .map(|m| m.shade(hit, scene, rng))
                .sum::<Vec3>(),
            Material::Multiply(a, b) => a.shade(hit, scene, rng) * b.shade(hit, scene, rng),
            Material::Mix {
                a,
                b,
                factor,
                scale,
                bias,
            } => self.shade_mix(hit, scene, rng, a.as_deref(), b.as_deref(), factor, *scale, *bias),
        }
    }

    fn shade_diffuse(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        color: &Arc<Material>,
    ) -> Color {
        let mut sum = Color::ZERO;
        for light in &scene.lights {
            let l = (light.sample_position(hit, rng) - hit.position()).normalize();
            let factor = l.dot(hit.normal);
            if factor > 0.0 {
                sum += factor * light.radiance(hit, scene, rng);
            }
        }
        sum * color.shade(hit, scene, rng)
    }

    fn shade_specular(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        color: &Arc<Material>,
        exponent: f32,
    ) -> Color {
        let mut sum = Color::ZERO;
        let eye = -hit.ray.direction;
        for light in &scene.lights {
            let l = (light.sample_position(hit, rng) - hit.position()).normalize();
            let r = reflect(-l, hit.normal);
            let factor = r.dot(eye);
            if factor > 0.0 {
                sum += factor.powf(exponent) * light.radiance(hit, scene, rng);
            }
        }
        sum * color.shade(hit, scene, rng)
    }

    fn shade_phong(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        diffuse: &Arc<Material>,
        specular: &Arc<Material>,
        exponent: f32,
    ) -> Color {
        let mut sum = Color::ZERO;
        let eye = -hit.ray.direction;
        for light in &scene.lights {
            let l = (light.sample_position(hit, rng) - hit.position()).normalize();
            let r = reflect(-l, hit.normal);

            let diffuse_factor = l.dot(hit.normal);
            if diffuse_factor > 0.0 {
                let light_color = diffuse_factor * light.radiance(hit, scene, rng);
                sum += light_color * diffuse.shade(hit, scene, rng);
            }

            let specular_factor = r.dot(eye);
            if specular_factor > 0.0 {
                let light_color = specular_factor.powf(exponent) * light.radiance(hit, scene, rng);
                sum += light_color * specular.shade(hit, scene, rng);
            }
        }
        sum
    }

    fn shade_mirror(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        tint: &Arc<Material>,
        max_bounces: i32,
    ) -> Color {
        let bounces = match child_bounces(hit.bounces_left, max_bounces) {
            Some(b) => b,
            None => return Color::ZERO,
        };

        let reflected = Ray::from_unit(hit.position(), reflect(hit.ray.direction, hit.normal));
        let mut child = Hit::new(reflected);
        child.bounces_left = bounces;
        child.debug = hit.debug;

        scene.intersect(&mut child);
        scene.shade(&child, rng) * tint.shade(hit, scene, rng)
    }

    fn shade_glossy(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        tint: &Arc<Material>,
        max_bounces: i32,
        samples: u32,
        roughness: f32,
    ) -> Color {
        let bounces = match child_bounces(hit.bounces_left, max_bounces) {
            Some(b) => b,
            None => return Color::ZERO,
        };

        let reflected = reflect(hit.ray.direction, hit.normal);
        let position = hit.position();

        // Deterministic jitter: repeated shades of the same point see the
        // same sample pattern, independent of the caller's RNG.
        let mut jitter_rng = StdRng::seed_from_u64(position_seed(position));

        let mut sum = Color::ZERO;
        for _ in 0..samples {
            let du = roughness * gen_f32(&mut jitter_rng) - roughness / 2.0;
            let dv = roughness * gen_f32(&mut jitter_rng) - roughness / 2.0;
            let dir = reflected + du * hit.tangent + dv * hit.bitangent;

            let mut sample = Hit::new(Ray::new(position, dir));
            sample.bounces_left = bounces;
            sample.debug = hit.debug;

            scene.intersect(&mut sample);
            sum += scene.shade(&sample, &mut jitter_rng);
        }
        sum /= samples as f32;

        sum * tint.shade(hit, scene, rng)
    }

    fn shade_glass(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        tint: &Arc<Material>,
        ior: f32,
        max_bounces: i32,
    ) -> Color {
        let bounces = match child_bounces(hit.bounces_left, max_bounces) {
            Some(b) => b,
            None => return Color::ZERO,
        };

        let out = refract_direction(hit.ray.direction, hit.normal, ior);
        let mut child = Hit::new(Ray::new(hit.position(), out));
        child.bounces_left = bounces;
        child.debug = hit.debug;

        scene.intersect(&mut child);
        scene.shade(&child, rng) * tint.shade(hit, scene, rng)
    }

    #[allow(clippy::too_many_arguments)]
    fn shade_mix(
        &self,
        hit: &Hit<'_>,
        scene: &Scene,
        rng: &mut dyn RngCore,
        a: Option<&Material>,
        b: Option<&Material>,
        factor: &Arc<Material>,
        scale: f32,
        bias: f32,
    ) -> Color {
        let fac = factor.shade(hit, scene, rng) * scale + Color::splat(bias);

        let shade_side = |side: Option<&Material>, rng: &mut dyn RngCore| match side {
            Some(material) => material.shade(hit, scene, rng),
            None => Color::ZERO,
        };

        if fac.x >= 1.0 && fac.y >= 1.0 && fac.z >= 1.0 {
            shade_side(a, rng)
        } else if fac.x <= 0.0 && fac.y <= 0.0 && fac.z <= 0.0 {
            shade_side(b, rng)
        } else {
            let inv = Color::ONE - fac;
            fac * shade_side(a, rng) + inv * shade_side(b, rng)
        }
    }
}

/// The child budget for one recursive cast, or `None` when the budget is
/// exhausted and the material must yield black instead of recursing.
fn child_bounces(current: i32, max_bounces: i32) -> Option<i32> {
    let budget = if current == BOUNCES_UNSET {
        max_bounces
    } else {
        current
    };
    if budget <= 0 {
        None
    } else {
        Some(budget - 1)
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refraction by the ratio of indices of refraction, swapping the ratio
/// and flipping the normal when the ray exits rather than enters. Falls
/// back to pure reflection on total internal reflection.
pub(crate) fn refract_direction(incoming: Vec3, normal: Vec3, ior: f32) -> Vec3 {
    let mut n = normal;
    let mut ratio = 1.0 / ior;
    if n.dot(incoming) > 0.0 {
        ratio = ior;
        n = -n;
    }

    let cos_theta = (-incoming).dot(n);
    let out_perp = ratio * (incoming + cos_theta * n);
    let discriminant = 1.0 - out_perp.length_squared();

    if discriminant < 0.0 {
        reflect(incoming, n)
    } else {
        out_perp - discriminant.sqrt() * n
    }
}

/// Schlick's approximation of dielectric reflectance at the hit's
/// incidence angle.
fn schlick_reflectance(hit: &Hit<'_>, ior: f32) -> f32 {
    let incoming = hit.ray.direction;
    let mut n = hit.normal;
    if n.dot(incoming) > 0.0 {
        n = -n;
    }

    let cos_theta = (-incoming).dot(n);
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}

/// Map a ray direction onto the six faces of an origin-centered unit cube
/// and look the result up in the matching sub-region of the atlas.
fn shade_skybox(hit: &Hit<'_>, atlas: &Texture) -> Color {
    // Bottom-left corners of each face's region in the atlas (a 4x3
    // cross layout).
    const TOP_ORIGIN: Vec2 = Vec2::new(2.0 / 4.0, 0.0);
    const BOT_ORIGIN: Vec2 = Vec2::new(2.0 / 4.0, 2.0 / 3.0);
    const BACK_ORIGIN: Vec2 = Vec2::new(0.0, 1.0 / 3.0);
    const FRONT_ORIGIN: Vec2 = Vec2::new(2.0 / 4.0, 1.0 / 3.0);
    const LEFT_ORIGIN: Vec2 = Vec2::new(1.0 / 4.0, 1.0 / 3.0);
    const RIGHT_ORIGIN: Vec2 = Vec2::new(3.0 / 4.0, 1.0 / 3.0);

    let null = Arc::new(Material::solid(1.0, 0.0, 1.0));
    let face = |point: Vec3, normal: Vec3, u: Vec3| {
        Plane::centered(point, normal, 2.0, 2.0, u, Arc::clone(&null))
    };

    let front = face(Vec3::Z, Vec3::Z, Vec3::NEG_X);
    let back = face(Vec3::NEG_Z, Vec3::NEG_Z, Vec3::X);
    let right = face(Vec3::X, Vec3::X, Vec3::Z);
    let left = face(Vec3::NEG_X, Vec3::NEG_X, Vec3::NEG_Z);
    let bot = face(Vec3::Y, Vec3::Y, Vec3::NEG_X);
    let top = face(Vec3::NEG_Y, Vec3::Y, Vec3::X);

    let mut probe = Hit::new(Ray::from_unit(Vec3::ZERO, hit.ray.direction));

    let origin = if front.intersect(&mut probe) {
        FRONT_ORIGIN
    } else if back.intersect(&mut probe) {
        BACK_ORIGIN
    } else if left.intersect(&mut probe) {
        LEFT_ORIGIN
    } else if right.intersect(&mut probe) {
        RIGHT_ORIGIN
    } else if top.intersect(&mut probe) {
        TOP_ORIGIN
    } else if bot.intersect(&mut probe) {
        BOT_ORIGIN
    } else {
        return Color::ZERO;
    };

    let coords = origin + Vec2::new(probe.u, probe.v) * Vec2::new(1.0 / 8.0, 1.0 / 6.0);
    atlas.color_at(coords.x, coords.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use crate::shape::Shape;
    use crate::sphere::Sphere;
    use glint_math::Ray;

    fn empty_scene(background: Material) -> Scene {
        Scene::new(Arc::new(background))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn surface_hit<'a>(material: &'a Material) -> Hit<'a> {
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y));
        hit.t = 2.0;
        hit.intersected = true;
        hit.normal = Vec3::Y;
        hit.tangent = Vec3::X;
        hit.bitangent = Vec3::Z;
        hit.material = Some(material);
        hit
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(v, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_refract_matched_ior_is_undeviated() {
        // Normal incidence with matched indices: straight through
        let out = refract_direction(Vec3::NEG_Y, Vec3::Y, 1.0);
        assert!((out - Vec3::NEG_Y).length() < 1e-6);

        // Oblique incidence with matched indices is also undeviated
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract_direction(incoming, Vec3::Y, 1.0);
        assert!((out - incoming).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal_entering() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract_direction(incoming, Vec3::Y, 1.5);
        // Entering denser glass: the transmitted ray hugs the normal
        assert!(out.y < 0.0);
        assert!(out.x.abs() < incoming.x.abs());
        assert!((out.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection_reflects() {
        // Grazing exit from a dense medium: no real transmitted ray
        let incoming = Vec3::new(0.9, 0.435_889_9, 0.0).normalize();
        let out = refract_direction(incoming, Vec3::Y, 2.4);
        // Reflected about the flipped normal: stays below the surface
        assert!((out.length() - 1.0).abs() < 1e-4);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_mirror_with_zero_budget_is_black() {
        let tint = Arc::new(Material::solid(1.0, 1.0, 1.0));
        let mirror = Material::Mirror {
            tint,
            max_bounces: 0,
        };
        // A bright background that would leak through if the budget were
        // ignored
        let scene = empty_scene(Material::solid(1.0, 1.0, 1.0));

        let hit = surface_hit(&mirror);
        let color = mirror.shade(&hit, &scene, &mut rng());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_mirror_exhausted_budget_is_black() {
        let tint = Arc::new(Material::solid(1.0, 1.0, 1.0));
        let mirror = Material::Mirror {
            tint,
            max_bounces: 8,
        };
        let scene = empty_scene(Material::solid(1.0, 1.0, 1.0));

        let mut hit = surface_hit(&mirror);
        hit.bounces_left = 0;
        let color = mirror.shade(&hit, &scene, &mut rng());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_mirror_reflects_background() {
        let tint = Arc::new(Material::solid(0.5, 0.5, 0.5));
        let mirror = Material::Mirror {
            tint,
            max_bounces: 4,
        };
        let scene = empty_scene(Material::solid(1.0, 0.0, 0.0));

        let hit = surface_hit(&mirror);
        let color = mirror.shade(&hit, &scene, &mut rng());
        assert!((color - Color::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let tint = Arc::new(Material::solid(1.0, 1.0, 1.0));
        let mirror = Arc::new(Material::Mirror {
            tint,
            max_bounces: 16,
        });

        let mut scene = empty_scene(Material::solid(0.0, 0.0, 0.0));
        scene.add_shape(Shape::Sphere(Sphere::new(
            Vec3::new(0.0, 103.0, 0.0),
            100.0,
            Arc::clone(&mirror),
        )));
        scene.add_shape(Shape::Sphere(Sphere::new(
            Vec3::new(0.0, -103.0, 0.0),
            100.0,
            mirror,
        )));

        // A ray bouncing between the two mirror spheres must come back
        // black once the budget runs out, not hang
        let mut hit = Hit::new(Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Y));
        scene.intersect(&mut hit);
        assert!(hit.intersected);
        let color = scene.shade(&hit, &mut rng());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_add_sums_components() {
        let add = Material::Add(vec![
            Arc::new(Material::solid(0.25, 0.0, 0.0)),
            Arc::new(Material::solid(0.25, 0.5, 0.0)),
        ]);
        let scene = empty_scene(Material::solid(0.0, 0.0, 0.0));
        let hit = surface_hit(&add);
        assert_eq!(
            add.shade(&hit, &scene, &mut rng()),
            Color::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn test_multiply_is_componentwise() {
        let mul = Material::Multiply(
            Arc::new(Material::solid(0.5, 1.0, 0.0)),
            Arc::new(Material::solid(0.5, 0.5, 1.0)),
        );
        let scene = empty_scene(Material::solid(0.0, 0.0, 0.0));
        let hit = surface_hit(&mul);
        assert_eq!(
            mul.shade(&hit, &scene, &mut rng()),
            Color::new(0.25, 0.5, 0.0)
        );
    }

    #[test]
    fn test_mix_saturated_factor_short_circuits() {
        let a = Arc::new(Material::solid(1.0, 0.0, 0.0));
        let b = Arc::new(Material::solid(0.0, 1.0, 0.0));
        let scene = empty_scene(Material::solid(0.0, 0.0, 0.0));

        let all_a = Material::const_mix(Arc::clone(&a), Arc::clone(&b), Color::ONE);
        let hit = surface_hit(&all_a);
        assert_eq!(
            all_a.shade(&hit, &scene, &mut rng()),
            Color::new(1.0, 0.0, 0.0)
        );

        let all_b = Material::const_mix(a, b, Color::ZERO);
        let hit = surface_hit(&all_b);
        assert_eq!(
            all_b.shade(&hit, &scene, &mut rng()),
            Color::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_mix_blends() {
        let a = Arc::new(Material::solid(1.0, 0.0, 0.0));
        let b = Arc::new(Material::solid(0.0, 1.0, 0.0));
        let mix = Material::const_mix(a, b, Color::splat(0.25));
        let scene = empty_scene(Material::solid(0.0, 0.0, 0.0));
        let hit = surface_hit(&mix);
        let color = mix.shade(&hit, &scene, &mut rng());
        assert!((color - Color::new(0.25, 0.75, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_diffuse_proportional_to_cosine() {
        let diffuse = Material::Diffuse {
            color: Arc::new(Material::solid(1.0, 1.0, 1.0)),
        };
        let mut scene = empty_scene(Material::solid(0.0, 0.0, 0.0));
        scene.add_light(Light::point(Vec3::new(0.0, 10.0, 0.0), Color::ONE));

        let hit = surface_hit(&diffuse);
        let color = diffuse.shade(&hit, &scene, &mut rng());
        // Light directly overhead of an upward-facing surface: N.L = 1
        assert!((color - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_glossy_shading_is_reproducible() {
        let glossy = Material::Glossy {
            tint: Arc::new(Material::solid(1.0, 1.0, 1.0)),
            max_bounces: 2,
            samples: 8,
            roughness: 0.3,
        };
        // A background that varies with direction, so jitter matters
        let scene = empty_scene(Material::Skybox { atlas: Texture::Uv });

        let hit = surface_hit(&glossy);
        let first = glossy.shade(&hit, &scene, &mut rng());
        let second = glossy.shade(&hit, &scene, &mut StdRng::seed_from_u64(999));
        assert_eq!(first, second);
    }

    #[test]
    fn test_schlick_grows_toward_grazing() {
        let schlick = Material::Schlick { ior: 1.5 };
        let scene = empty_scene(Material::solid(0.0, 0.0, 0.0));

        let head_on = surface_hit(&schlick);
        let head_on_f = schlick.shade(&head_on, &scene, &mut rng()).x;

        let mut grazing = surface_hit(&schlick);
        grazing.ray = Ray::new(
            Vec3::new(-5.0, 2.1, 0.0),
            Vec3::new(1.0, -0.02, 0.0),
        );
        let grazing_f = schlick.shade(&grazing, &scene, &mut rng()).x;

        assert!(grazing_f > head_on_f);
        assert!(head_on_f > 0.0);
    }

    #[test]
    fn test_skybox_picks_face_regions() {
        // Straight up maps into the top face's atlas region
        let hit = Hit::new(Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let up = shade_skybox(&hit, &Texture::Uv);
        assert!(up.x >= 0.5 && up.x <= 0.75);
        assert!(up.y <= 1.0 / 3.0);

        // +Z maps into the front face's region
        let hit = Hit::new(Ray::new(Vec3::ZERO, Vec3::Z));
        let front = shade_skybox(&hit, &Texture::Uv);
        assert!(front.x >= 0.5 && front.x <= 0.75);
        assert!(front.y >= 1.0 / 3.0 && front.y <= 2.0 / 3.0);
    }
}
