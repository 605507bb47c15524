use glam::*;

use crate::camera::Camera;
use crate::environment::Environment;
use crate::world::World;

/// Where the camera sits; the aspect ratio is supplied at render time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub origin: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
}

impl View {
    pub fn camera(&self, aspect_ratio: f32) -> Camera {
        Camera::new(self.origin, self.target, self.up, self.fov, aspect_ratio)
    }
}

/// Everything needed to render a frame.
pub struct Scene {
    pub name: String,
    pub world: World,
    pub environment: Box<dyn Environment>,
    pub view: View,
    pub bounce_limit: u32,
}
