use std::time::Instant;

use glam::*;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::scene::Scene;
use crate::tracer::{Coverage, Trace, Tracer};
use crate::Color;

#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub bounce_limit: u32,
    /// Keep coverage in the alpha channel instead of writing opaque pixels.
    pub transparent_background: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub hit_pixels: u64,
    pub background_pixels: u64,
    pub reflection_rays: u64,
}

pub struct Frame {
    pub image: RgbaImage,
    pub stats: FrameStats,
}

/// One primary ray through the centre of every pixel. Rows are traced in
/// parallel; each pixel is independent of every other.
#[tracing::instrument(skip_all, fields(scene = %scene.name, width = settings.width, height = settings.height))]
pub fn render(scene: &Scene, settings: &RenderSettings) -> Frame {
    let started = Instant::now();

    let width = settings.width as usize;
    let height = settings.height as usize;
    let aspect_ratio = settings.width as f32 / settings.height.max(1) as f32;
    let camera = scene.view.camera(aspect_ratio);
    let tracer = Tracer::new(&scene.world, scene.environment.as_ref(), settings.bounce_limit);
    tracing::debug!(bounce_limit = tracer.bounce_limit(), "tracing primary rays");

    let mut traces = vec![Trace { color: Color::ZERO, coverage: Coverage::Background, bounces: 0 }; width * height];

    traces.par_chunks_mut(width.max(1)).enumerate().for_each(|(y, row)| {
        let v = (height - 1 - y) as f32 + 0.5;
        for (x, slot) in row.iter_mut().enumerate() {
            let u = x as f32 + 0.5;
            let ray = camera.primary_ray(u / width as f32, v / height as f32);
            *slot = tracer.trace(&ray);
        }
    });

    let mut image = RgbaImage::new(settings.width, settings.height);
    let mut stats = FrameStats::default();

    for (i, trace) in traces.iter().enumerate() {
        match trace.coverage {
            Coverage::Hit => stats.hit_pixels += 1,
            Coverage::Background => stats.background_pixels += 1,
        }
        stats.reflection_rays += trace.bounces as u64;

        let rgba = if settings.transparent_background { trace.rgba() } else { trace.color.extend(1.0) };
        image.put_pixel((i % width) as u32, (i / width) as u32, to_rgba(rgba));
    }

    tracing::info!(
        hit_pixels = stats.hit_pixels,
        background_pixels = stats.background_pixels,
        reflection_rays = stats.reflection_rays,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "frame rendered"
    );

    Frame { image, stats }
}

/// Linear colour to 8-bit. Clamping only happens here, never inside the
/// tracer.
pub fn to_rgba(color: Vec4) -> Rgba<u8> {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    return Rgba([c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, c.w.round() as u8]);
}
