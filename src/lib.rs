pub mod color;
pub mod command;
pub mod config;
pub mod geometry;
pub mod render;
pub mod rng;
pub mod tree;

use std::time::Instant;

use command::DrawCommand;
use config::TreeParams;
use geometry::Point;

/// Vertical gap between the trunk base and the bottom canvas edge.
pub const BASE_MARGIN: f32 = 80.0;

pub struct Scene {
    pub w: usize,
    pub h: usize,
    pub commands: Vec<DrawCommand>,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Render one tree: recursive command generation, then rasterization.
/// The trunk is rooted at the bottom-center of the canvas, pointing up.
pub fn generate(w: usize, h: usize, params: &TreeParams) -> (Scene, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let origin = Point::new(w as f32 / 2.0, h as f32 - BASE_MARGIN);

    let t = Instant::now();
    let commands = tree::render(origin, 0.0, params);
    timings.push(Timing {
        name: "tree",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let rgba = render::rasterize(&commands, w, h);
    timings.push(Timing {
        name: "raster",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let scene = Scene {
        w,
        h,
        commands,
        rgba,
    };

    (scene, timings)
}
