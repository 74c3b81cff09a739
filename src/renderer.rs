pub mod cpu_surface;

pub use cpu_surface::CpuSurface;

use palette::Srgba;

use crate::{
    geometry::{Point, Rect, Size, Vector},
    image::Image,
    text::TextPaint,
};

/// Drawing target a composite renders into.
///
/// `I` is the image handle type the surface knows how to draw. Coordinates
/// are relative to the current translation.
pub trait Surface<I> {
    /// Draws `text` so its baseline starts at `baseline`.
    fn draw_text(&mut self, text: &str, baseline: Point, paint: &TextPaint);

    /// Draws `image` with its top-left corner at `origin`.
    fn draw_image(&mut self, image: &I, origin: Point);

    /// Restricts further drawing to `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Moves the coordinate origin by `offset`.
    fn translate(&mut self, offset: Vector);
}

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        baseline: Point,
        size: f32,
        /// Color after the filter and alpha were applied.
        color: Srgba<u8>,
    },
    Image {
        size: Size,
        origin: Point,
    },
    ClipRect(Rect),
    Translate(Vector),
}

/// Surface that only records what it was asked to draw.
///
/// Handy for hosts that replay commands on their own canvas, and for tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl<I: Image> Surface<I> for RecordingSurface {
    fn draw_text(&mut self, text: &str, baseline: Point, paint: &TextPaint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            baseline,
            size: paint.size,
            color: paint.effective_color(),
        });
    }

    fn draw_image(&mut self, image: &I, origin: Point) {
        self.commands.push(DrawCommand::Image {
            size: image.intrinsic_size(),
            origin,
        });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn translate(&mut self, offset: Vector) {
        self.commands.push(DrawCommand::Translate(offset));
    }
}
