/// Canvas-convention geometry: y grows downward, positive rotation is
/// clockwise, and a branch drawn toward (0, -len) points up the screen.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Accumulated translate+rotate transform of one drawing scope.
/// Children compose relative to their parent: translations are applied in
/// the parent's rotated frame and rotation angles add.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub origin: Point,
    /// Radians, clockwise from vertical in canvas coordinates.
    pub angle: f32,
}

impl Frame {
    pub const IDENTITY: Frame = Frame {
        origin: Point::new(0.0, 0.0),
        angle: 0.0,
    };

    pub fn child(&self, translate: Point, rotate_deg: f32) -> Frame {
        Frame {
            origin: self.to_canvas(translate),
            angle: self.angle + rotate_deg.to_radians(),
        }
    }

    /// Map a point in this frame's local coordinates to canvas coordinates.
    #[inline]
    pub fn to_canvas(&self, p: Point) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        Point::new(
            self.origin.x + p.x * cos - p.y * sin,
            self.origin.y + p.x * sin + p.y * cos,
        )
    }
}

/// Cubic bezier point at parameter t for a curve starting at the local
/// origin (every branch stroke starts at (0,0) in its own frame).
#[inline]
pub fn cubic_point(c1: Point, c2: Point, end: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b1 * c1.x + b2 * c2.x + b3 * end.x,
        b1 * c1.y + b2 * c2.y + b3 * end.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_frame_accumulates_rotation() {
        let root = Frame::IDENTITY.child(Point::new(100.0, 200.0), 10.0);
        let kid = root.child(Point::new(0.0, -50.0), 20.0);
        assert!((kid.angle - 30f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn child_translation_is_applied_in_rotated_frame() {
        // Rotate 90° clockwise, then move "up" the local axis: in canvas
        // coordinates that heads in +x.
        let f = Frame::IDENTITY.child(Point::new(0.0, 0.0), 90.0);
        let kid = f.child(Point::new(0.0, -10.0), 0.0);
        assert!((kid.origin.x - 10.0).abs() < 1e-4);
        assert!(kid.origin.y.abs() < 1e-4);
    }

    #[test]
    fn unrotated_frame_translates_directly() {
        let f = Frame::IDENTITY.child(Point::new(3.0, 4.0), 0.0);
        assert_eq!(f.to_canvas(Point::new(1.0, 1.0)), Point::new(4.0, 5.0));
    }

    #[test]
    fn cubic_endpoints_match() {
        let c1 = Point::new(30.0, -60.0);
        let c2 = Point::new(-30.0, -60.0);
        let end = Point::new(0.0, -120.0);
        let start = cubic_point(c1, c2, end, 0.0);
        assert!(start.x.abs() < 1e-6 && start.y.abs() < 1e-6);
        let tip = cubic_point(c1, c2, end, 1.0);
        assert!((tip.x - end.x).abs() < 1e-4 && (tip.y - end.y).abs() < 1e-4);
    }
}
