use rayon::prelude::*;

use crate::color::Color;
use crate::command::DrawCommand;
use crate::geometry::{Point, cubic_point};

/// Soft drop shadow painted under every primitive. Cosmetic, matches the
/// fixed canvas shadow of the original tree.
pub const SHADOW_BLUR: f32 = 15.0;
const SHADOW_ALPHA: f32 = 0.6;

/// One scan-convertible primitive, flattened into canvas coordinates.
enum Shape {
    /// Thick polyline with round joins/caps (a flattened branch stroke).
    Stroke { segs: Vec<[Point; 2]>, half_w: f32 },
    /// Chord-closed circular segment (a leaf marker). `chord` holds the arc
    /// endpoints; `center_side` is the sign of the chord-line test at the
    /// circle center, so the filled side is the one opposite it.
    Sector {
        center: Point,
        radius: f32,
        chord: [Point; 2],
        center_side: f32,
    },
}

struct Prim {
    shape: Shape,
    color: Color,
    /// Inflated bounds: x0, y0, x1, y1.
    bbox: [f32; 4],
}

#[inline]
fn seg_dist(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = apx - t * abx;
    let dy = apy - t * aby;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
fn chord_side(p: Point, chord: &[Point; 2]) -> f32 {
    let [a, b] = chord;
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn prepare(cmd: &DrawCommand) -> Prim {
    match cmd {
        DrawCommand::StrokeCurve {
            frame,
            ctrl1,
            ctrl2,
            end,
            color,
            width,
        } => {
            // Flatten in local space, then push every sample through the
            // frame. Step count scales with the control polygon length.
            let poly_len = (ctrl1.x.hypot(ctrl1.y)
                + (ctrl2.x - ctrl1.x).hypot(ctrl2.y - ctrl1.y)
                + (end.x - ctrl2.x).hypot(end.y - ctrl2.y))
                .max(1.0);
            let steps = ((poly_len / 4.0).ceil() as usize).clamp(8, 64);
            let mut pts = Vec::with_capacity(steps + 1);
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                pts.push(frame.to_canvas(cubic_point(*ctrl1, *ctrl2, *end, t)));
            }
            let segs: Vec<[Point; 2]> = pts.windows(2).map(|w| [w[0], w[1]]).collect();

            let half_w = (width / 2.0).max(0.0);
            let pad = half_w + SHADOW_BLUR + 1.0;
            let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
            for p in &pts {
                x0 = x0.min(p.x);
                y0 = y0.min(p.y);
                x1 = x1.max(p.x);
                y1 = y1.max(p.y);
            }
            Prim {
                shape: Shape::Stroke { segs, half_w },
                color: *color,
                bbox: [x0 - pad, y0 - pad, x1 + pad, y1 + pad],
            }
        }
        DrawCommand::FillArc {
            frame,
            center,
            radius,
            start_angle,
            end_angle,
            color,
        } => {
            let c = frame.to_canvas(*center);
            // Rotation carries the arc's angular range along; radius is
            // unchanged (frames never scale).
            let s = start_angle + frame.angle;
            let e = end_angle + frame.angle;
            let a = Point::new(c.x + radius * s.cos(), c.y + radius * s.sin());
            let b = Point::new(c.x + radius * e.cos(), c.y + radius * e.sin());
            let chord = [a, b];
            let pad = SHADOW_BLUR + 1.0;
            Prim {
                shape: Shape::Sector {
                    center: c,
                    radius: *radius,
                    center_side: chord_side(c, &chord),
                    chord,
                },
                color: *color,
                bbox: [
                    c.x - radius - pad,
                    c.y - radius - pad,
                    c.x + radius + pad,
                    c.y + radius + pad,
                ],
            }
        }
    }
}

/// Coverage of one primitive at a pixel center: (shadow alpha, fill alpha).
#[inline]
fn coverage(prim: &Prim, p: Point) -> (f32, f32) {
    // Signed distance to the filled silhouette; negative inside.
    let d = match &prim.shape {
        Shape::Stroke { segs, half_w } => {
            let mut min = f32::MAX;
            for s in segs {
                min = min.min(seg_dist(p, s[0], s[1]));
            }
            min - half_w
        }
        Shape::Sector {
            center,
            radius,
            chord,
            center_side,
        } => {
            if chord_side(p, chord) * center_side > 0.0 {
                // Center side of the chord: outside the filled segment.
                return (0.0, 0.0);
            }
            let dx = p.x - center.x;
            let dy = p.y - center.y;
            (dx * dx + dy * dy).sqrt() - radius
        }
    };
    let fill = (0.5 - d).clamp(0.0, 1.0);
    let shadow = if d > 0.0 && d < SHADOW_BLUR {
        let t = 1.0 - d / SHADOW_BLUR;
        t * t * SHADOW_ALPHA
    } else {
        0.0
    };
    (shadow, fill)
}

#[inline]
fn over(dst: &mut [f32; 4], color: Color, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let out_a = alpha + dst[3] * (1.0 - alpha);
    if out_a > 0.0 {
        dst[0] = (color.r * alpha + dst[0] * dst[3] * (1.0 - alpha)) / out_a;
        dst[1] = (color.g * alpha + dst[1] * dst[3] * (1.0 - alpha)) / out_a;
        dst[2] = (color.b * alpha + dst[2] * dst[3] * (1.0 - alpha)) / out_a;
    }
    dst[3] = out_a;
}

/// Scan-convert a command sequence onto a transparent RGBA canvas.
///
/// Every pixel composites the commands in emission order, so rows can be
/// rasterized in parallel without disturbing painter's order.
pub fn rasterize(commands: &[DrawCommand], w: usize, h: usize) -> Vec<u8> {
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let prims: Vec<Prim> = commands.iter().map(prepare).collect();

    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        let py = y as f32 + 0.5;
        let row_prims: Vec<&Prim> = prims
            .iter()
            .filter(|pr| py >= pr.bbox[1] && py <= pr.bbox[3] && pr.bbox[2] > 0.0)
            .collect();
        if row_prims.is_empty() {
            return;
        }
        for x in 0..w {
            let p = Point::new(x as f32 + 0.5, py);
            let mut px = [0f32; 4];
            let mut touched = false;
            for prim in &row_prims {
                if p.x < prim.bbox[0] || p.x > prim.bbox[2] {
                    continue;
                }
                let (shadow, fill) = coverage(prim, p);
                if shadow > 0.0 {
                    over(&mut px, Color::BLACK, shadow);
                    touched = true;
                }
                if fill > 0.0 {
                    over(&mut px, prim.color, fill);
                    touched = true;
                }
            }
            if touched {
                let out = &mut row[x * 4..x * 4 + 4];
                out[0] = px[0].clamp(0.0, 255.0).round() as u8;
                out[1] = px[1].clamp(0.0, 255.0).round() as u8;
                out[2] = px[2].clamp(0.0, 255.0).round() as u8;
                out[3] = (px[3] * 255.0).clamp(0.0, 255.0).round() as u8;
            }
        }
    });

    rgba
}
