use glam::*;

use crate::material::Material;

/// Nearest intersection found by `World::intersect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub position: Vec3,
    pub normal: Vec3,
    pub material: Material,
}
