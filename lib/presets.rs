use glam::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SceneError;
use crate::environment::{Constant, Sky};
use crate::light::Light;
use crate::material::Material;
use crate::scene::{Scene, View};
use crate::sphere::Sphere;
use crate::util::{rand_in_unit_disc, rand_on_unit_sphere};
use crate::world::World;

pub const NAMES: [&str; 3] = ["mirrors", "single", "random"];

pub fn build(name: &str, seed: u64) -> Result<Scene, SceneError> {
    let scene = match name.to_ascii_lowercase().as_str() {
        "mirrors" => mirrors(),
        "single" => single(),
        "random" => random(seed),
        _ => return Err(SceneError::UnknownPreset(name.to_string())),
    };

    tracing::debug!(
        preset = %scene.name,
        spheres = scene.world.spheres.len(),
        lights = scene.world.lights.len(),
        "built preset scene"
    );

    Ok(scene)
}

/// Three mirrored spheres on a large matte ground sphere.
fn mirrors() -> Scene {
    let ground = Material::matte(Vec3::new(0.5, 0.5, 0.5));
    let chrome = Material::new(Vec3::splat(0.1), Vec3::splat(0.8), 64.0);
    let copper = Material::new(Vec3::new(0.4, 0.15, 0.05), Vec3::new(0.6, 0.35, 0.2), 32.0);
    let glossy_blue = Material::new(Vec3::new(0.05, 0.1, 0.5), Vec3::splat(0.3), 128.0);

    let world = World::new()
        .with_sphere(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground))
        .with_sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, chrome))
        .with_sphere(Sphere::new(Vec3::new(-2.2, 0.7, 0.6), 0.7, copper))
        .with_sphere(Sphere::new(Vec3::new(2.0, 0.6, 0.9), 0.6, glossy_blue))
        .with_light(Light::new(Vec3::new(-6.0, 12.0, 8.0), Vec3::splat(0.7)))
        .with_light(Light::new(Vec3::new(8.0, 6.0, 4.0), Vec3::new(0.4, 0.35, 0.3)));

    let view = View { origin: Vec3::new(0.0, 2.5, 8.0), target: Vec3::new(0.0, 0.8, 0.0), up: Vec3::Y, fov: 40.0 };

    Scene { name: "mirrors".to_string(), world, environment: Box::new(Sky::default()), view, bounce_limit: 4 }
}

/// A unit white sphere lit from the camera position.
fn single() -> Scene {
    let world = World::new()
        .with_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::matte(Vec3::ONE)))
        .with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE));

    let view = View { origin: Vec3::new(0.0, 0.0, 5.0), target: Vec3::ZERO, up: Vec3::Y, fov: 45.0 };

    Scene {
        name: "single".to_string(),
        world,
        environment: Box::new(Constant(Vec3::splat(0.2))),
        view,
        bounce_limit: 1,
    }
}

/// Grid of small jittered spheres, a mix of matte and mirrored, around
/// three large ones. Same seed, same scene.
fn random(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new();

    world.spheres.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::matte(Vec3::new(0.5, 0.5, 0.5)),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose: f32 = rng.gen();

            let material = if choose < 0.8 {
                let diffuse = (rand_on_unit_sphere(&mut rng) * rand_on_unit_sphere(&mut rng)).abs();
                Material::matte(diffuse)
            } else {
                let tint = (Vec3::splat(0.4) + rand_on_unit_sphere(&mut rng) * 0.6).clamp(Vec3::ZERO, Vec3::ONE);
                Material::new(tint * 0.2, tint * 0.8, rng.gen_range(8.0..128.0))
            };

            let jitter = (rand_in_unit_disc(&mut rng) + Vec2::ONE) * 0.45;
            let center = Vec3::new(a as f32 + jitter.x, 0.2, b as f32 + jitter.y);

            world.spheres.push(Sphere::new(center, 0.2, material));
        }
    }

    world.spheres.push(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::new(Vec3::ZERO, Vec3::splat(0.95), 256.0),
    ));
    world.spheres.push(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, Material::matte(Vec3::new(0.4, 0.2, 0.1))));
    world.spheres.push(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::new(Vec3::new(0.14, 0.12, 0.1), Vec3::new(0.7, 0.6, 0.5), 64.0),
    ));

    world.lights.push(Light::new(Vec3::new(10.0, 20.0, 10.0), Vec3::splat(0.8)));
    world.lights.push(Light::new(Vec3::new(-10.0, 15.0, -5.0), Vec3::splat(0.3)));

    let view = View { origin: Vec3::new(13.0, 2.0, 3.0), target: Vec3::ZERO, up: Vec3::Y, fov: 20.0 };

    Scene { name: "random".to_string(), world, environment: Box::new(Sky::default()), view, bounce_limit: 3 }
}
