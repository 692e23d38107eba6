use std::path::PathBuf;

use treegen::config::TreeParams;
use treegen::rng::Rng;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let width: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1024);
    let height: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1024);
    let out_dir: PathBuf = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    // With a seed, parameters are randomized; without, the classic default
    // brown/green tree is drawn.
    let seed: Option<u64> = args.get(4).and_then(|s| s.parse().ok());

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let params = match seed {
        Some(seed) => TreeParams::random(&mut Rng::new(seed)),
        None => TreeParams::default(),
    };

    eprintln!(
        "Rendering {}x{} tree: length={}, width={:.1}, spread={:.1}, curve={:.1}",
        width, height, params.length, params.branch_width, params.angle_spread, params.curve_offset
    );

    let (scene, timings) = treegen::generate(width, height, &params);

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "  {:20} {:8} draw commands",
        "commands",
        scene.commands.len()
    );

    let path = out_dir.join("tree.png");
    image::save_buffer(
        &path,
        &scene.rgba,
        width as u32,
        height as u32,
        image::ColorType::Rgba8,
    )
    .expect("failed to save image");
    eprintln!("Saved {}", path.display());
}
