use std::net::SocketAddr;

use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use treegen::color::Color;
use treegen::config::TreeParams;
use treegen::rng::Rng;

#[derive(Deserialize)]
struct GenerateRequest {
    width: Option<usize>,
    height: Option<usize>,
    /// When set, every tree parameter is randomized from this seed and the
    /// individual fields below are ignored.
    random_seed: Option<u64>,
    length: Option<f32>,
    branch_width: Option<f32>,
    curve: Option<f32>,
    curve2: Option<f32>,
    branch_color: Option<String>,
    leaf_color: Option<String>,
}

#[derive(Serialize)]
struct GenerateResponse {
    data_url: String,
    params: EffectiveParams,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

/// Echo of the parameters actually used, so the UI can display what a
/// randomize produced.
#[derive(Serialize)]
struct EffectiveParams {
    length: f32,
    branch_width: f32,
    curve: f32,
    curve2: f32,
    branch_color: String,
    leaf_color: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> String {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .expect("PNG encode failed");
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    format!("data:image/png;base64,{}", b64)
}

fn css_rgb(c: Color) -> String {
    format!("rgb({},{},{})", c.r, c.g, c.b)
}

async fn generate_handler(Json(req): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let width = req.width.unwrap_or(1024);
    let height = req.height.unwrap_or(1024);

    let defaults = TreeParams::default();
    let params = match req.random_seed {
        Some(seed) => TreeParams::random(&mut Rng::new(seed)),
        None => TreeParams {
            length: req.length.unwrap_or(defaults.length),
            branch_width: req.branch_width.unwrap_or(defaults.branch_width),
            angle_spread: req.curve.unwrap_or(defaults.angle_spread),
            curve_offset: req.curve2.unwrap_or(defaults.curve_offset),
            // Unparseable color strings fall back to the defaults, the way
            // a canvas ignores an invalid style assignment.
            branch_color: req
                .branch_color
                .as_deref()
                .and_then(Color::parse)
                .unwrap_or(defaults.branch_color),
            leaf_color: req
                .leaf_color
                .as_deref()
                .and_then(Color::parse)
                .unwrap_or(defaults.leaf_color),
        },
    };

    let response = tokio::task::spawn_blocking(move || {
        let (scene, timings) = treegen::generate(width, height, &params);

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        GenerateResponse {
            data_url: encode_png(&scene.rgba, width, height),
            params: EffectiveParams {
                length: params.length,
                branch_width: params.branch_width,
                curve: params.angle_spread,
                curve2: params.curve_offset,
                branch_color: css_rgb(params.branch_color),
                leaf_color: css_rgb(params.leaf_color),
            },
            timings: timing_entries,
            width,
            height,
        }
    })
    .await
    .unwrap();

    Json(response)
}

#[tokio::main]
async fn main() {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("treegen server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
