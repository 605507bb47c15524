use glam::*;

use crate::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    pub const fn new(position: Vec3, intensity: Color) -> Light {
        Light { position, intensity }
    }
}
