use crate::color::Color;
use crate::rng::Rng;

/// All tunable parameters — exposed as UI inputs in the frontend.
/// Frozen for the duration of one render call; callers mutate their own
/// copy between redraws.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    /// Trunk length in pixels. Every level shrinks it by a fixed factor.
    pub length: f32,
    /// Trunk stroke width in pixels.
    pub branch_width: f32,
    /// Degrees added/subtracted per level for the left/right child.
    pub angle_spread: f32,
    /// Sideways control-point offset that bends each branch stroke.
    pub curve_offset: f32,
    pub branch_color: Color,
    pub leaf_color: Color,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            length: 120.0,
            branch_width: 15.0,
            angle_spread: 10.0,
            curve_offset: 0.0,
            branch_color: Color::BROWN,
            leaf_color: Color::GREEN,
        }
    }
}

impl TreeParams {
    /// Sample a randomized parameter set. Length is an integer in [100,120);
    /// color channels stay fractional on purpose.
    pub fn random(rng: &mut Rng) -> Self {
        let color = |rng: &mut Rng| {
            Color::new(
                rng.range_f32(0.0, 255.0),
                rng.range_f32(0.0, 255.0),
                rng.range_f32(0.0, 255.0),
            )
        };
        Self {
            length: rng.range_f32(0.0, 20.0).floor() + 100.0,
            branch_width: rng.range_f32(1.0, 71.0),
            angle_spread: rng.range_f32(2.0, 22.0),
            curve_offset: rng.range_f32(0.0, 50.0),
            branch_color: color(rng),
            leaf_color: color(rng),
        }
    }
}
