use crate::color::Color;
use crate::geometry::{Frame, Point};

/// One drawing primitive, decoupled from any rendering backend. Geometry is
/// kept in the emitting scope's local coordinates together with the
/// accumulated frame, so consumers can either replay the transform stack or
/// flatten to canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Cubic curve from the local origin (0,0) to `end`.
    StrokeCurve {
        frame: Frame,
        ctrl1: Point,
        ctrl2: Point,
        end: Point,
        color: Color,
        width: f32,
    },
    /// Arc sector marker (leaf), swept counter-to-clockwise per canvas
    /// convention and closed by the chord when filled.
    FillArc {
        frame: Frame,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn frame(&self) -> Frame {
        match self {
            DrawCommand::StrokeCurve { frame, .. } => *frame,
            DrawCommand::FillArc { frame, .. } => *frame,
        }
    }
}

/// Drawing-surface stand-in that records commands instead of painting.
/// A frame stack mirrors canvas save/translate/rotate/restore; the scoped
/// `with_frame` guarantees the stack is popped on every exit path, so each
/// recursive drawing scope leaves the surface exactly as it found it.
pub struct Recorder {
    frames: Vec<Frame>,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::IDENTITY],
            commands: Vec::new(),
        }
    }

    fn frame(&self) -> Frame {
        // The base identity frame is never popped; with_frame only pops
        // what it pushed.
        self.frames.last().copied().unwrap_or(Frame::IDENTITY)
    }

    /// Enter a child scope translated by `translate` (in the current local
    /// frame) and rotated by `rotate_deg`, run `f`, then restore.
    pub fn with_frame<R>(
        &mut self,
        translate: Point,
        rotate_deg: f32,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let child = self.frame().child(translate, rotate_deg);
        self.frames.push(child);
        let out = f(self);
        self.frames.pop();
        out
    }

    pub fn stroke_curve(&mut self, ctrl1: Point, ctrl2: Point, end: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeCurve {
            frame: self.frame(),
            ctrl1,
            ctrl2,
            end,
            color,
            width,
        });
    }

    pub fn fill_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::FillArc {
            frame: self.frame(),
            center,
            radius,
            start_angle,
            end_angle,
            color,
        });
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}
