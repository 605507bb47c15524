//! JSON scene files.
//!
//! The tracing kernel assumes well-formed geometry, so every check on
//! user-supplied numbers happens here before a `Scene` is built.

use std::path::{Path, PathBuf};

use glam::*;
use serde::Deserialize;

use crate::environment::{Constant, CubeMap, Environment, Sky};
use crate::light::Light;
use crate::material::Material;
use crate::scene::{Scene, View};
use crate::sphere::Sphere;
use crate::util::is_near_zero;
use crate::world::World;
use crate::MAX_BOUNCES;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    pub camera: CameraConfig,
    #[serde(default = "default_bounce_limit")]
    pub bounce_limit: u32,
    pub spheres: Vec<SphereConfig>,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub origin: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereConfig {
    pub center: [f32; 3],
    pub radius: f32,
    #[serde(default)]
    pub material: MaterialConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConfig {
    pub diffuse: [f32; 3],
    #[serde(default)]
    pub specular: [f32; 3],
    #[serde(default)]
    pub shininess: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        MaterialConfig { diffuse: [1.0; 3], specular: [0.0; 3], shininess: 0.0 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightConfig {
    pub position: [f32; 3],
    pub intensity: [f32; 3],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EnvironmentConfig {
    Constant {
        color: [f32; 3],
    },
    #[serde(rename_all = "camelCase")]
    Sky {
        horizon: [f32; 3],
        zenith: [f32; 3],
    },
    #[serde(rename_all = "camelCase")]
    CubeMap {
        /// +X, -X, +Y, -Y, +Z, -Z
        faces: [PathBuf; 6],
        #[serde(default)]
        swap_yz: bool,
    },
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let sky = Sky::default();
        EnvironmentConfig::Sky { horizon: sky.horizon.to_array(), zenith: sky.zenith.to_array() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Scene validation error: {0}")]
    Invalid(String),

    #[error("Unknown preset scene: {0}")]
    UnknownPreset(String),
}

const fn default_bounce_limit() -> u32 {
    MAX_BOUNCES
}

const fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

const fn default_fov() -> f32 {
    45.0
}

/// Read, validate and build a scene. Relative cube-map paths resolve
/// against the scene file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let file: SceneFile = serde_json::from_str(&content)?;

    validate_scene(&file)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());

    tracing::info!(
        scene = %name,
        spheres = file.spheres.len(),
        lights = file.lights.len(),
        "loaded scene file"
    );

    return build_scene(name, file, base_dir);
}

pub fn validate_scene(file: &SceneFile) -> Result<(), SceneError> {
    let camera = &file.camera;
    check_finite("camera.origin", camera.origin)?;
    check_finite("camera.target", camera.target)?;
    check_finite("camera.up", camera.up)?;

    let forward = Vec3::from(camera.origin) - Vec3::from(camera.target);
    let up = Vec3::from(camera.up);
    if is_near_zero(forward) {
        return Err(invalid("camera.origin must differ from camera.target"));
    }
    if is_near_zero(up) {
        return Err(invalid("camera.up must be non-zero"));
    }
    // the camera basis is up x forward, which vanishes when they line up
    if up.normalize().cross(forward.normalize()).length_squared() < 1e-8 {
        return Err(invalid("camera.up must not be parallel to the view direction"));
    }
    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(invalid(format!("camera.fov must be in (0, 180), got {}", camera.fov)));
    }

    if file.spheres.is_empty() {
        return Err(invalid("scene must contain at least one sphere"));
    }

    for (i, sphere) in file.spheres.iter().enumerate() {
        check_finite(&format!("spheres[{i}].center"), sphere.center)?;
        if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
            return Err(invalid(format!("spheres[{i}].radius must be positive, got {}", sphere.radius)));
        }

        let material = &sphere.material;
        check_non_negative(&format!("spheres[{i}].material.diffuse"), material.diffuse)?;
        check_non_negative(&format!("spheres[{i}].material.specular"), material.specular)?;
        if !(material.shininess.is_finite() && material.shininess >= 0.0) {
            return Err(invalid(format!(
                "spheres[{i}].material.shininess must be non-negative, got {}",
                material.shininess
            )));
        }
    }

    for (i, light) in file.lights.iter().enumerate() {
        check_finite(&format!("lights[{i}].position"), light.position)?;
        check_non_negative(&format!("lights[{i}].intensity"), light.intensity)?;
    }

    match &file.environment {
        EnvironmentConfig::Constant { color } => check_non_negative("environment.color", *color)?,
        EnvironmentConfig::Sky { horizon, zenith } => {
            check_non_negative("environment.horizon", *horizon)?;
            check_non_negative("environment.zenith", *zenith)?;
        }
        EnvironmentConfig::CubeMap { .. } => {}
    }

    Ok(())
}

fn build_scene(name: String, file: SceneFile, base_dir: &Path) -> Result<Scene, SceneError> {
    let mut world = World::new();

    for sphere in &file.spheres {
        let m = &sphere.material;
        let material = Material::new(Vec3::from(m.diffuse), Vec3::from(m.specular), m.shininess);
        world.spheres.push(Sphere::new(Vec3::from(sphere.center), sphere.radius, material));
    }

    for light in &file.lights {
        world.lights.push(Light::new(Vec3::from(light.position), Vec3::from(light.intensity)));
    }

    if world.lights.is_empty() {
        tracing::warn!(scene = %name, "scene has no lights, only reflections of the environment will be visible");
    }

    let environment: Box<dyn Environment> = match file.environment {
        EnvironmentConfig::Constant { color } => Box::new(Constant(Vec3::from(color))),
        EnvironmentConfig::Sky { horizon, zenith } => {
            Box::new(Sky { horizon: Vec3::from(horizon), zenith: Vec3::from(zenith) })
        }
        EnvironmentConfig::CubeMap { faces, swap_yz } => {
            let paths: Vec<PathBuf> = faces.iter().map(|face| base_dir.join(face)).collect();
            Box::new(CubeMap::open(&paths, swap_yz)?)
        }
    };

    let view = View {
        origin: Vec3::from(file.camera.origin),
        target: Vec3::from(file.camera.target),
        up: Vec3::from(file.camera.up),
        fov: file.camera.fov,
    };

    Ok(Scene { name, world, environment, view, bounce_limit: clamp_bounce_limit(file.bounce_limit) })
}

/// Limits above `MAX_BOUNCES` are accepted; the tracer's loop bound caps them.
pub fn clamp_bounce_limit(limit: u32) -> u32 {
    if limit > MAX_BOUNCES {
        tracing::warn!(requested = limit, max = MAX_BOUNCES, "bounce limit above maximum, clamping");
        return MAX_BOUNCES;
    }
    limit
}

fn invalid(message: impl Into<String>) -> SceneError {
    SceneError::Invalid(message.into())
}

fn check_finite(field: &str, value: [f32; 3]) -> Result<(), SceneError> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(invalid(format!("{field} must contain finite values")))
    }
}

fn check_non_negative(field: &str, value: [f32; 3]) -> Result<(), SceneError> {
    check_finite(field, value)?;
    if value.iter().all(|v| *v >= 0.0) {
        Ok(())
    } else {
        Err(invalid(format!("{field} must not be negative")))
    }
}
