pub mod camera;
pub mod config;
pub mod environment;
pub mod hit;
pub mod light;
pub mod material;
pub mod presets;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod tracer;
pub mod util;
pub mod world;

/// Linear RGB, unbounded above.
pub type Color = glam::Vec3;

/// Hard cap on reflection rays per primary ray. Runtime bounce limits
/// larger than this are cut off by the tracer's loop bound.
pub const MAX_BOUNCES: u32 = 8;

pub use environment::Environment;
pub use hit::Hit;
pub use light::Light;
pub use material::Material;
pub use ray::Ray;
pub use sphere::Sphere;
pub use tracer::{Coverage, Trace, Tracer};
pub use world::World;
