use std::f32::consts::FRAC_PI_2;

use crate::command::{DrawCommand, Recorder};
use crate::config::TreeParams;
use crate::geometry::Point;

/// Branches shorter than this become leaves instead of recursing.
pub const LEAF_THRESHOLD: f32 = 5.0;
/// Per-level length shrink. Strictly below 1, so recursion always bottoms out.
pub const LENGTH_DECAY: f32 = 0.75;
/// Per-level stroke width shrink. Cosmetic; termination is governed by length.
pub const WIDTH_DECAY: f32 = 0.6;
/// Radius of the arc-sector leaf marker.
pub const LEAF_RADIUS: f32 = 10.0;

/// Generate the draw-command sequence for one tree rooted at `origin`.
///
/// `angle_deg` is the trunk's tilt from vertical (0 points straight up).
/// Parameters are frozen for the whole traversal; the recursion threads them
/// explicitly instead of reading shared state, so the same call always
/// produces the same sequence.
pub fn render(origin: Point, angle_deg: f32, params: &TreeParams) -> Vec<DrawCommand> {
    let mut rec = Recorder::new();
    branch(&mut rec, origin, params.length, angle_deg, params.branch_width, params);
    rec.into_commands()
}

fn branch(
    rec: &mut Recorder,
    base: Point,
    len: f32,
    angle_deg: f32,
    width: f32,
    params: &TreeParams,
) {
    rec.with_frame(base, angle_deg, |rec| {
        // Both control points sit halfway up the branch. Negative-angle
        // branches get a symmetric pair, others an opposed pair, so the
        // curvature leans with the branch direction.
        let off = params.curve_offset;
        let (x1, x2) = if angle_deg < 0.0 { (off, off) } else { (off, -off) };
        let mid = -len / 2.0;
        rec.stroke_curve(
            Point::new(x1, mid),
            Point::new(x2, mid),
            Point::new(0.0, -len),
            params.branch_color,
            width,
        );

        // Negated comparison so a non-finite length still terminates.
        if !(len >= LEAF_THRESHOLD) {
            rec.fill_arc(
                Point::new(0.0, -len),
                LEAF_RADIUS,
                0.0,
                FRAC_PI_2,
                params.leaf_color,
            );
            return;
        }

        let tip = Point::new(0.0, -len);
        let child_len = len * LENGTH_DECAY;
        let child_width = width * WIDTH_DECAY;
        branch(rec, tip, child_len, angle_deg + params.angle_spread, child_width, params);
        branch(rec, tip, child_len, angle_deg - params.angle_spread, child_width, params);
    });
}

/// Recursion depth at which every branch of a tree with this trunk length
/// turns into a leaf. All siblings shrink by the same factor, so the depth
/// is uniform across the whole tree.
pub fn leaf_depth(length: f32) -> u32 {
    let mut len = length;
    let mut depth = 0;
    while len >= LEAF_THRESHOLD {
        len *= LENGTH_DECAY;
        depth += 1;
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn count(commands: &[DrawCommand]) -> (usize, usize) {
        let strokes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCurve { .. }))
            .count();
        (strokes, commands.len() - strokes)
    }

    #[test]
    fn short_trunk_is_a_single_leaf() {
        let params = TreeParams {
            length: 4.0,
            ..TreeParams::default()
        };
        let cmds = render(Point::new(0.0, 0.0), 0.0, &params);
        // Degenerate stub stroke plus the leaf marker, nothing else.
        let (strokes, arcs) = count(&cmds);
        assert_eq!((strokes, arcs), (1, 1));
        match &cmds[1] {
            DrawCommand::FillArc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
                ..
            } => {
                assert_eq!(*center, Point::new(0.0, -4.0));
                assert_eq!(*radius, LEAF_RADIUS);
                assert_eq!(*start_angle, 0.0);
                assert!((end_angle - FRAC_PI_2).abs() < 1e-6);
                assert_eq!(*color, Color::GREEN);
            }
            other => panic!("expected leaf arc, got {other:?}"),
        }
    }

    #[test]
    fn zero_length_still_terminates_with_a_leaf_at_origin() {
        let params = TreeParams {
            length: 0.0,
            ..TreeParams::default()
        };
        let cmds = render(Point::new(50.0, 50.0), 0.0, &params);
        let (strokes, arcs) = count(&cmds);
        assert_eq!((strokes, arcs), (1, 1));
        assert_eq!(cmds[1].frame().origin, Point::new(50.0, 50.0));
    }

    #[test]
    fn command_counts_match_full_binary_tree() {
        for length in [5.0, 20.0, 120.0] {
            let params = TreeParams {
                length,
                ..TreeParams::default()
            };
            let cmds = render(Point::new(0.0, 0.0), 0.0, &params);
            let d = leaf_depth(length);
            let (strokes, arcs) = count(&cmds);
            // Every node strokes its branch; each of the 2^d leaves adds an arc.
            assert_eq!(strokes as u64, (1u64 << (d + 1)) - 1, "length {length}");
            assert_eq!(arcs as u64, 1u64 << d, "length {length}");
        }
    }

    #[test]
    fn default_tree_depth_matches_shrink_formula() {
        // 120 * 0.75^11 ≈ 5.07 is still a branch; one more level is not.
        assert_eq!(leaf_depth(120.0), 12);
        assert_eq!(leaf_depth(4.9), 0);
    }

    #[test]
    fn control_points_lean_with_branch_direction() {
        let params = TreeParams {
            length: 4.0,
            curve_offset: 30.0,
            ..TreeParams::default()
        };
        let ctrl_xs = |angle: f32| {
            let cmds = render(Point::new(0.0, 0.0), angle, &params);
            match &cmds[0] {
                DrawCommand::StrokeCurve { ctrl1, ctrl2, .. } => {
                    assert_eq!(ctrl1.y, -2.0);
                    assert_eq!(ctrl2.y, -2.0);
                    (ctrl1.x, ctrl2.x)
                }
                other => panic!("expected stroke, got {other:?}"),
            }
        };
        assert_eq!(ctrl_xs(-10.0), (30.0, 30.0));
        assert_eq!(ctrl_xs(10.0), (30.0, -30.0));
        // Zero angle takes the opposed pair, same as positive.
        assert_eq!(ctrl_xs(0.0), (30.0, -30.0));
    }

    #[test]
    fn rotation_accumulates_down_the_recursion() {
        let params = TreeParams {
            length: 10.0,
            angle_spread: 10.0,
            ..TreeParams::default()
        };
        let cmds = render(Point::new(0.0, 0.0), 0.0, &params);
        // Commands are emitted depth-first: trunk, then the left subtree.
        // Left child carries angle parameter 0+10, rotating its frame to 10°;
        // the left grandchild's parameter is 10+10, composing to 30° absolute.
        let trunk = cmds[0].frame();
        let left = cmds[1].frame();
        let left_left = cmds[2].frame();
        assert!(trunk.angle.abs() < 1e-6);
        assert!((left.angle - 10f32.to_radians()).abs() < 1e-5);
        assert!((left_left.angle - 30f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn widths_shrink_while_colors_stay_fixed() {
        let params = TreeParams {
            length: 5.0,
            branch_width: 15.0,
            ..TreeParams::default()
        };
        let cmds = render(Point::new(0.0, 0.0), 0.0, &params);
        let widths: Vec<f32> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeCurve { width, color, .. } => {
                    assert_eq!(*color, Color::BROWN);
                    Some(*width)
                }
                _ => None,
            })
            .collect();
        assert_eq!(widths[0], 15.0);
        assert!(widths.iter().skip(1).all(|w| (*w - 9.0).abs() < 1e-5));
    }

    #[test]
    fn default_render_is_deterministic() {
        let params = TreeParams::default();
        let origin = Point::new(400.0, 520.0);
        let a = render(origin, 0.0, &params);
        let b = render(origin, 0.0, &params);
        assert_eq!(a, b);
        // Full binary tree of depth 12: 8191 strokes + 4096 leaves.
        assert_eq!(a.len(), 12287);
        match &a[0] {
            DrawCommand::StrokeCurve { frame, end, width, .. } => {
                assert_eq!(frame.origin, origin);
                assert_eq!(*end, Point::new(0.0, -120.0));
                assert_eq!(*width, 15.0);
            }
            other => panic!("expected trunk stroke, got {other:?}"),
        }
    }
}
