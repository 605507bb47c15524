use glam::*;

use crate::environment::Environment;
use crate::hit::Hit;
use crate::ray::Ray;
use crate::util::reflect;
use crate::world::World;
use crate::{Color, MAX_BOUNCES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// The primary ray hit scene geometry.
    Hit,
    /// The primary ray escaped straight to the environment.
    Background,
}

impl Coverage {
    pub fn alpha(self) -> f32 {
        match self {
            Coverage::Hit => 1.0,
            Coverage::Background => 0.0,
        }
    }
}

/// Result of tracing one primary ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    pub color: Color,
    pub coverage: Coverage,
    /// Reflection rays cast after the primary hit.
    pub bounces: u32,
}

impl Trace {
    pub fn rgba(&self) -> Vec4 {
        self.color.extend(self.coverage.alpha())
    }
}

/// Primary hit plus an iterative chain of mirror reflections.
///
/// Holds only shared references, so one tracer can serve every pixel of a
/// frame from any number of threads.
pub struct Tracer<'a, E: Environment + ?Sized> {
    world: &'a World,
    environment: &'a E,
    bounce_limit: u32,
}

impl<'a, E: Environment + ?Sized> Tracer<'a, E> {
    pub fn new(world: &'a World, environment: &'a E, bounce_limit: u32) -> Tracer<'a, E> {
        Tracer { world, environment, bounce_limit }
    }

    pub fn bounce_limit(&self) -> u32 {
        self.bounce_limit
    }

    pub fn trace(&self, r: &Ray) -> Trace {
        let Some(primary) = self.world.intersect(r) else {
            return Trace {
                color: self.environment.sample(r.direction),
                coverage: Coverage::Background,
                bounces: 0,
            };
        };

        let mut view = (-r.direction).normalize();
        let mut color = self.shade(&primary, view);
        let mut attenuation = primary.material.specular;
        let mut hit = primary;
        let mut bounces = 0;

        for bounce in 0..MAX_BOUNCES {
            if bounce >= self.bounce_limit {
                break;
            }
            if is_absorbed(attenuation) {
                break;
            }

            let reflected = Ray::new(hit.position, reflect(-view, hit.normal).normalize());
            bounces += 1;

            match self.world.intersect(&reflected) {
                Some(next) => {
                    view = (-reflected.direction).normalize();
                    color += attenuation * self.shade(&next, view);
                    attenuation *= next.material.specular;
                    hit = next;
                }
                None => {
                    color += attenuation * self.environment.sample(reflected.direction);
                    break;
                }
            }
        }

        return Trace { color, coverage: Coverage::Hit, bounces };
    }

    fn shade(&self, hit: &Hit, view: Vec3) -> Color {
        self.world.shade(&hit.material, hit.position, hit.normal, view)
    }
}

/// No channel left to carry reflected light.
fn is_absorbed(attenuation: Color) -> bool {
    attenuation.x + attenuation.y + attenuation.z <= 0.0
}
