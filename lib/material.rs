use glam::*;

use crate::Color;

/// Blinn-Phong surface description. `specular` doubles as the mirror
/// reflectivity carried into reflection bounces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Material {
    pub const fn new(diffuse: Color, specular: Color, shininess: f32) -> Material {
        Material { diffuse, specular, shininess }
    }

    pub const fn matte(diffuse: Color) -> Material {
        Material { diffuse, specular: Vec3::ZERO, shininess: 0.0 }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::matte(Vec3::ONE)
    }
}
