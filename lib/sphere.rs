use glam::*;

use crate::hit::Hit;
use crate::material::Material;
use crate::ray::Ray;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32, material: Material) -> Sphere {
        return Sphere { center, radius, material };
    }

    /// Near-root intersection for a ray with a unit-length direction.
    ///
    /// Only the entry point `t = -b - sqrt(disc)` is considered, so a ray
    /// starting inside the sphere reports no hit. A grazing ray (zero
    /// discriminant) is a miss as well, and so is anything that computes
    /// to NaN.
    pub fn raycast(&self, r: &Ray, t_min: f32, t_max: f32) -> Option<Hit> {
        let oc = r.origin - self.center;
        let half_b = r.direction.dot(oc);
        let c = oc.length_squared() - (self.radius * self.radius);

        let discriminant = (half_b * half_b) - c;

        if !(discriminant > 0.0) {
            return None;
        }

        let t = -half_b - discriminant.sqrt();

        if !(t > t_min && t < t_max) {
            return None;
        }

        let position = r.at(t);
        let normal = (position - self.center).normalize();

        return Some(Hit { t, position, normal, material: self.material });
    }
}
