use std::path::Path;

use glam::*;
use image::Rgb32FImage;

use crate::config::SceneError;
use crate::Color;

/// Direction-indexed colour source for rays that leave the scene.
pub trait Environment: Send + Sync {
    fn sample(&self, direction: Vec3) -> Color;
}

impl<F> Environment for F
where
    F: Fn(Vec3) -> Color + Send + Sync,
{
    fn sample(&self, direction: Vec3) -> Color {
        self(direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub Color);

impl Environment for Constant {
    fn sample(&self, _direction: Vec3) -> Color {
        self.0
    }
}

/// Vertical blend from `horizon` (straight down) to `zenith` (straight up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sky {
    pub horizon: Color,
    pub zenith: Color,
}

impl Default for Sky {
    fn default() -> Self {
        Sky { horizon: Color::new(1.0, 1.0, 1.0), zenith: Color::new(0.5, 0.7, 1.0) }
    }
}

impl Environment for Sky {
    fn sample(&self, direction: Vec3) -> Color {
        let t = 0.5 * (direction.normalize().y + 1.0);
        return self.horizon.lerp(self.zenith, t);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::PosX, Face::NegX, Face::PosY, Face::NegY, Face::PosZ, Face::NegZ];

    /// Face and `(s, t)` texture coordinates in `[0, 1]` for a direction,
    /// following the OpenGL cube-map selection table.
    pub fn locate(d: Vec3) -> (Face, Vec2) {
        let a = d.abs();

        let (face, sc, tc, ma) = if a.x >= a.y && a.x >= a.z {
            if d.x >= 0.0 {
                (Face::PosX, -d.z, -d.y, a.x)
            } else {
                (Face::NegX, d.z, -d.y, a.x)
            }
        } else if a.y >= a.z {
            if d.y >= 0.0 {
                (Face::PosY, d.x, d.z, a.y)
            } else {
                (Face::NegY, d.x, -d.z, a.y)
            }
        } else if d.z >= 0.0 {
            (Face::PosZ, d.x, -d.y, a.z)
        } else {
            (Face::NegZ, -d.x, -d.y, a.z)
        };

        let st = Vec2::new(sc / ma + 1.0, tc / ma + 1.0) * 0.5;
        return (face, st);
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Six square faces sampled with nearest-texel lookup.
pub struct CubeMap {
    faces: Vec<Rgb32FImage>,
    size: u32,
    /// Look up `dir.xzy`, for face sets authored with Z up.
    pub swap_yz: bool,
}

impl CubeMap {
    /// Faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn from_faces(faces: Vec<Rgb32FImage>, swap_yz: bool) -> Result<CubeMap, SceneError> {
        if faces.len() != Face::ALL.len() {
            return Err(SceneError::Invalid(format!("cube map needs 6 faces, got {}", faces.len())));
        }

        let size = faces[0].width();
        for (face, img) in Face::ALL.iter().zip(&faces) {
            if img.width() != size || img.height() != size || size == 0 {
                return Err(SceneError::Invalid(format!(
                    "cube map face {:?} is {}x{}, expected {}x{}",
                    face,
                    img.width(),
                    img.height(),
                    size,
                    size
                )));
            }
        }

        Ok(CubeMap { faces, size, swap_yz })
    }

    pub fn open<P: AsRef<Path>>(paths: &[P], swap_yz: bool) -> Result<CubeMap, SceneError> {
        let mut faces = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            tracing::debug!(path = %path.display(), "loading cube map face");
            faces.push(image::open(path)?.into_rgb32f());
        }
        let map = CubeMap::from_faces(faces, swap_yz)?;
        tracing::debug!(size = map.face_size(), swap_yz, "cube map loaded");
        Ok(map)
    }

    pub fn face_size(&self) -> u32 {
        self.size
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        let d = if self.swap_yz { direction.xzy() } else { direction };
        let (face, st) = Face::locate(d);

        let max = (self.size - 1) as f32;
        let x = (st.x * self.size as f32).floor().clamp(0.0, max) as u32;
        let y = (st.y * self.size as f32).floor().clamp(0.0, max) as u32;

        let texel = self.faces[face.index()].get_pixel(x, y);
        return Color::new(texel[0], texel[1], texel[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_faces(size: u32) -> Vec<Rgb32FImage> {
        Face::ALL
            .iter()
            .map(|f| {
                let v = f.index() as f32 / 10.0;
                Rgb32FImage::from_pixel(size, size, Rgb([v, v, v]))
            })
            .collect()
    }

    #[test]
    fn test_constant_ignores_direction() {
        let env = Constant(Color::splat(0.2));
        assert_eq!(env.sample(Vec3::X), Color::splat(0.2));
        assert_eq!(env.sample(-Vec3::Y), Color::splat(0.2));
    }

    #[test]
    fn test_closure_environment() {
        let env = |d: Vec3| d.abs();
        assert_eq!(env.sample(Vec3::new(0.0, -1.0, 0.0)), Vec3::Y);
    }

    #[test]
    fn test_sky_endpoints() {
        let sky = Sky::default();
        assert!(sky.sample(Vec3::Y).abs_diff_eq(sky.zenith, 1e-6));
        assert!(sky.sample(-Vec3::Y * 3.0).abs_diff_eq(sky.horizon, 1e-6));
    }

    #[test]
    fn test_locate_axis_directions() {
        assert_eq!(Face::locate(Vec3::X).0, Face::PosX);
        assert_eq!(Face::locate(-Vec3::X).0, Face::NegX);
        assert_eq!(Face::locate(Vec3::Y).0, Face::PosY);
        assert_eq!(Face::locate(-Vec3::Y).0, Face::NegY);
        assert_eq!(Face::locate(Vec3::Z).0, Face::PosZ);
        assert_eq!(Face::locate(-Vec3::Z).0, Face::NegZ);
        assert_eq!(Face::locate(Vec3::Z).1, Vec2::splat(0.5));
    }

    #[test]
    fn test_locate_face_corners() {
        // +Z face: s grows with x, t grows with -y
        let (face, st) = Face::locate(Vec3::new(0.99, -0.99, 1.0));
        assert_eq!(face, Face::PosZ);
        assert!(st.x > 0.99 && st.y > 0.99);
    }

    #[test]
    fn test_cube_map_samples_matching_face() {
        let map = CubeMap::from_faces(solid_faces(4), false).unwrap();
        assert_eq!(map.face_size(), 4);
        assert_eq!(map.sample(Vec3::X), Color::splat(0.0));
        assert_eq!(map.sample(-Vec3::Z), Color::splat(0.5));
    }

    #[test]
    fn test_cube_map_swap_yz() {
        let map = CubeMap::from_faces(solid_faces(2), true).unwrap();
        // +Y in the scene reads the +Z face
        assert_eq!(map.sample(Vec3::Y), Color::splat(0.4));
        assert_eq!(map.sample(Vec3::Z), Color::splat(0.2));
    }

    #[test]
    fn test_cube_map_open_from_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];
        for (i, name) in names.iter().enumerate() {
            let v = if i == 0 { 255 } else { 0 };
            image::RgbImage::from_pixel(3, 3, Rgb([v, 0, 0])).save(dir.path().join(name)).unwrap();
        }

        let paths: Vec<_> = names.iter().map(|name| dir.path().join(name)).collect();
        let map = CubeMap::open(&paths, false).unwrap();

        assert_eq!(map.face_size(), 3);
        assert_eq!(map.sample(Vec3::X), Color::new(1.0, 0.0, 0.0));
        assert_eq!(map.sample(-Vec3::X), Color::ZERO);
    }

    #[test]
    fn test_cube_map_rejects_wrong_face_count() {
        let mut faces = solid_faces(2);
        faces.pop();
        assert!(matches!(CubeMap::from_faces(faces, false), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_cube_map_rejects_mismatched_faces() {
        let mut faces = solid_faces(2);
        faces[3] = Rgb32FImage::new(2, 3);
        assert!(matches!(CubeMap::from_faces(faces, false), Err(SceneError::Invalid(_))));
    }
}
