// Drawing surface the field renders onto. The canvas implementation lives in
// canvas.rs, RecordingSurface keeps a command list for headless use.

use crate::color::Color;
use crate::particle::Size;
use std::convert::Infallible;
use vecmath::Vector2;

pub trait Surface {
    type Error;

    fn size(&self) -> Size;

    fn resize(&mut self, size: Size);

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    },
}

/// Records every draw call. The command list restarts on each clear, so it
/// always holds the most recent frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        RecordingSurface {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears seen, one per rendered frame
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
        Ok(())
    }
}
