use glam::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same origin, unit-length direction. The direction must be non-zero.
    pub fn normalized(&self) -> Ray {
        Ray::new(self.origin, self.direction.normalize())
    }
}
