use glam::*;

use crate::hit::Hit;
use crate::light::Light;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::Color;

/// Minimum accepted hit distance. Keeps rays leaving a surface from
/// hitting that same surface again.
pub const HIT_EPSILON: f32 = 0.0001;

/// Upper bound for the nearest-hit search.
pub const FAR_T: f32 = 1e30;

/// Read-only scene: spheres and point lights, searched exhaustively.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl World {
    pub fn new() -> World {
        World { spheres: Vec::new(), lights: Vec::new() }
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> World {
        self.spheres.push(sphere);
        self
    }

    pub fn with_light(mut self, light: Light) -> World {
        self.lights.push(light);
        self
    }

    /// Nearest sphere hit along `r`. The direction is normalized first so
    /// `Hit::t` is a true distance.
    pub fn intersect(&self, r: &Ray) -> Option<Hit> {
        let r = r.normalized();
        let mut result = None;
        let mut t_nearest = FAR_T;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.raycast(&r, HIT_EPSILON, t_nearest) {
                t_nearest = hit.t;
                result = Some(hit);
            }
        }

        return result;
    }

    /// Direct Blinn-Phong illumination at a surface point.
    ///
    /// Each light is tested with a shadow ray; any hit along it blocks the
    /// light completely, even a hit farther away than the light itself.
    /// `view` is treated as a point: the view vector is `view - position`.
    /// Degenerate view or half vectors collapse to zero rather than NaN.
    pub fn shade(&self, material: &Material, position: Vec3, normal: Vec3, view: Vec3) -> Color {
        let mut color = Color::ZERO;

        for light in &self.lights {
            let light_dir = (light.position - position).normalize();

            if self.intersect(&Ray::new(position, light_dir)).is_some() {
                continue;
            }

            let view_dir = (view - position).normalize_or_zero();
            let half_dir = (light_dir + view_dir).normalize_or_zero();
            let spec_angle = normal.dot(half_dir).max(0.0);

            color += material.diffuse * normal.dot(light_dir).max(0.0) * light.intensity;
            color += material.specular * spec_angle.powf(material.shininess) * light.intensity;
        }

        return color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_matte() -> Material {
        Material::matte(Vec3::ONE)
    }

    #[test]
    fn test_intersect_empty_world() {
        let r = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(World::new().intersect(&r).is_none());
    }

    #[test]
    fn test_intersect_picks_nearest_regardless_of_order() {
        let far = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Material::matte(Vec3::X));
        let near = Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, Material::matte(Vec3::Y));
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let a = World::new().with_sphere(far).with_sphere(near).intersect(&r).unwrap();
        let b = World::new().with_sphere(near).with_sphere(far).intersect(&r).unwrap();

        assert_eq!(a.t, 3.0);
        assert_eq!(a.material.diffuse, Vec3::Y);
        assert_eq!(a, b);
    }

    #[test]
    fn test_intersect_normalizes_direction() {
        let world = World::new().with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()));
        let r = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -20.0));
        let hit = world.intersect(&r).unwrap();
        assert_eq!(hit.t, 4.0);
        assert_eq!(hit.position, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_intersect_is_deterministic() {
        let world = World::new()
            .with_sphere(Sphere::new(Vec3::new(0.3, -0.2, 0.0), 1.1, white_matte()))
            .with_sphere(Sphere::new(Vec3::new(-2.0, 0.5, -3.0), 0.7, white_matte()));
        let r = Ray::new(Vec3::new(0.1, 0.4, 6.0), Vec3::new(-0.05, -0.1, -1.0));

        let first = world.intersect(&r).unwrap();
        for _ in 0..16 {
            let again = world.intersect(&r).unwrap();
            assert_eq!(first.t.to_bits(), again.t.to_bits());
            assert_eq!(first.position, again.position);
            assert_eq!(first.normal, again.normal);
        }
    }

    #[test]
    fn test_intersect_nan_ray_reports_no_hit() {
        let world = World::new()
            .with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()))
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, white_matte()));
        let r = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(<f32>::NAN));
        assert!(world.intersect(&r).is_none());
    }

    #[test]
    fn test_surface_point_does_not_self_intersect() {
        let world = World::new().with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()));
        let r = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(world.intersect(&r).is_none());
    }

    #[test]
    fn test_shade_lit_diffuse() {
        let world = World::new()
            .with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()))
            .with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE));
        let p = Vec3::new(0.0, 0.0, 1.0);
        let color = world.shade(&white_matte(), p, Vec3::Z, Vec3::Z);
        assert_eq!(color, Vec3::ONE);
    }

    #[test]
    fn test_shade_without_lights_is_black() {
        let world = World::new().with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()));
        let color = world.shade(&white_matte(), Vec3::Z, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shade_occluded_light_contributes_nothing() {
        let shiny = Material::new(Vec3::ONE, Vec3::ONE, 8.0);
        let world = World::new()
            .with_sphere(Sphere::new(Vec3::ZERO, 1.0, shiny))
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 0.5, white_matte()))
            .with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE));
        let color = world.shade(&shiny, Vec3::Z, Vec3::Z, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shade_occluder_beyond_light_still_shadows() {
        let world = World::new()
            .with_sphere(Sphere::new(Vec3::ZERO, 1.0, white_matte()))
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0, white_matte()))
            .with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE));
        let color = world.shade(&white_matte(), Vec3::Z, Vec3::Z, Vec3::Z);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shade_light_below_horizon_has_no_diffuse() {
        let world = World::new().with_light(Light::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE));
        let color = world.shade(&white_matte(), Vec3::Z, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shade_sums_lights() {
        let world = World::new()
            .with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.25, 0.0, 0.0)))
            .with_light(Light::new(Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.5, 0.0)));
        let color = world.shade(&white_matte(), Vec3::Z, Vec3::Z, Vec3::Z);
        assert_eq!(color, Vec3::new(0.25, 0.5, 0.0));
    }

    #[test]
    fn test_shade_specular_highlight() {
        let glossy = Material::new(Vec3::ZERO, Vec3::splat(0.5), 16.0);
        let world = World::new().with_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(2.0)));
        // light, view and normal all aligned: half vector equals the normal
        let color = world.shade(&glossy, Vec3::Z, Vec3::Z, Vec3::new(0.0, 0.0, 5.0));
        assert!(color.abs_diff_eq(Vec3::ONE, 1e-6));
    }
}
