//! Renders a small demo scene to `simple_scene.png`.
//!
//! Run with `RUST_LOG=info cargo run --release --example simple_scene`.

use std::f32::consts::{FRAC_PI_3, PI};
use std::sync::Arc;

use anyhow::{Context, Result};

use glint_render::{
    render, Color, CsgNode, CsgOp, Light, Material, PerspectiveCamera, Plane, Scene, Shape,
    ShapeGroup, Sphere, Texture, Vec3,
};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = Scene::new(Arc::new(Material::solid(0.55, 0.7, 0.9)));

    // Checkered floor
    let checker = Arc::new(Material::Diffuse {
        color: Arc::new(Material::Texture(Texture::Checker { scale: PI })),
    });
    scene.add_shape(Shape::Plane(Plane::centered(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        40.0,
        40.0,
        Vec3::X,
        checker,
    )));

    // A sphere with a spherical bite taken out of it
    let mut carved = CsgNode::new(
        Shape::Sphere(Sphere::new(
            Vec3::new(0.0, 0.0, 0.0),
            1.0,
            Arc::new(Material::solid(1.0, 1.0, 1.0)),
        )),
        Shape::Sphere(Sphere::new(
            Vec3::new(0.7, 0.4, 0.7),
            0.8,
            Arc::new(Material::solid(1.0, 1.0, 1.0)),
        )),
        CsgOp::Difference,
    );
    carved.set_material(Arc::new(Material::Phong {
        diffuse: Arc::new(Material::solid(0.8, 0.25, 0.2)),
        specular: Arc::new(Material::solid(0.9, 0.9, 0.9)),
        exponent: 32.0,
    }));
    scene.add_shape(Shape::Csg(Box::new(carved)));

    // Mirror sphere off to the left
    scene.add_shape(Shape::Sphere(Sphere::new(
        Vec3::new(-2.2, 0.0, -0.5),
        1.0,
        Arc::new(Material::Mirror {
            tint: Arc::new(Material::solid(0.9, 0.9, 0.95)),
            max_bounces: 4,
        }),
    )));

    // Fresnel glass sphere on the right
    scene.add_shape(Shape::Sphere(Sphere::new(
        Vec3::new(2.2, 0.0, -0.5),
        1.0,
        Arc::new(Material::fresnel(
            Arc::new(Material::solid(0.95, 0.95, 1.0)),
            1.5,
            6,
        )),
    )));

    // Capsule lying behind the spheres
    let capsule = ShapeGroup::capsule(
        Vec3::new(-1.0, -0.6, -3.0),
        Vec3::new(1.0, -0.6, -3.0),
        0.4,
        Vec3::Y,
        Arc::new(Material::Diffuse {
            color: Arc::new(Material::solid(0.2, 0.5, 0.8)),
        }),
    );
    scene.add_shape(Shape::Group(capsule));

    scene.add_light(Light::ambient(Color::splat(0.08)));
    scene.add_light(Light::sun(
        Color::splat(0.6),
        Vec3::new(-0.4, -1.0, -0.3),
    ));
    scene.add_light(Light::soft_sphere(
        Vec3::new(4.0, 6.0, 4.0),
        Color::splat(0.7),
        0.8,
        8,
    ));

    let mut camera = PerspectiveCamera::new(
        Vec3::new(0.0, 1.2, 5.0),
        Vec3::new(0.0, 0.0, -0.5),
        Vec3::Y,
        FRAC_PI_3,
        WIDTH as f32 / HEIGHT as f32,
        1.0,
        0.02,
        1.0,
    );
    camera.samples_per_pixel = 4;

    let (mut image_buf, mut depth) = render(&scene, &camera, WIDTH, HEIGHT);
    camera.apply_depth_of_field(&mut image_buf, &mut depth);

    let rgba = image_buf.to_rgba();
    let out = image::RgbaImage::from_raw(WIDTH as u32, HEIGHT as u32, rgba)
        .context("framebuffer size mismatch")?;
    out.save("simple_scene.png")
        .context("failed to write simple_scene.png")?;

    log::info!("wrote simple_scene.png");
    Ok(())
}
