use glam::*;
use rand::Rng;
use rand_distr::*;

pub fn is_near_zero(v: Vec3) -> bool {
    return v.abs_diff_eq(Vec3::ZERO, 1e-6);
}

pub fn rand_on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    return Vec3::from(UnitSphere.sample(rng));
}

pub fn rand_in_unit_disc<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    return Vec2::from(UnitDisc.sample(rng));
}

/// Mirror `v` about `normal`. `normal` must be unit length.
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    return v - (2.0 * v.dot(normal) * normal);
}
