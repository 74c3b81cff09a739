use std::{collections::HashMap, sync::Arc};

use fxhash::FxBuildHasher;

use crate::{
    font_storage::{FontdueMetrics, quantize},
    geometry::{Point, Rect, Vector},
    image::Bitmap,
    renderer::Surface,
    text::TextPaint,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GlyphKey {
    glyph_index: u16,
    px: u32,
}

struct CachedGlyph {
    metrics: fontdue::Metrics,
    coverage: Vec<u8>,
}

/// Grayscale software surface.
///
/// Text is rasterized with the same fontdue face that measured it, so the
/// pixels line up with the layout. Coverage is scaled by the text alpha and
/// accumulated, images are blitted the same way. Color is ignored.
pub struct CpuSurface {
    canvas: Bitmap,
    font: Option<Arc<FontdueMetrics>>,
    glyphs: HashMap<GlyphKey, CachedGlyph, FxBuildHasher>,
    offset: Vector,
    /// Clip in canvas coordinates.
    clip: Option<Rect>,
}

impl CpuSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: Bitmap::new(width, height),
            font: None,
            glyphs: HashMap::with_hasher(FxBuildHasher::default()),
            offset: Vector::zero(),
            clip: None,
        }
    }

    pub fn with_font(mut self, font: Arc<FontdueMetrics>) -> Self {
        self.set_font(font);
        self
    }

    /// Replaces the face used for text. Cached glyphs are dropped.
    pub fn set_font(&mut self, font: Arc<FontdueMetrics>) {
        self.glyphs.clear();
        self.font = Some(font);
    }

    pub fn canvas(&self) -> &Bitmap {
        &self.canvas
    }

    pub fn into_canvas(self) -> Bitmap {
        self.canvas
    }

    /// Drops the translation and the clip.
    pub fn reset(&mut self) {
        self.offset = Vector::zero();
        self.clip = None;
    }

    pub fn clear_cache(&mut self) {
        self.glyphs.clear();
    }
}

/// Accumulates `value` at `p` (canvas coordinates) unless it is clipped.
fn plot(canvas: &mut Bitmap, clip: Option<Rect>, p: Point, value: u8) {
    if value == 0 || p.x < 0 || p.y < 0 {
        return;
    }
    if clip.is_some_and(|clip| !clip.contains(p)) {
        return;
    }
    canvas.accumulate(p.x as usize, p.y as usize, value);
}

impl Surface<Bitmap> for CpuSurface {
    fn draw_text(&mut self, text: &str, baseline: Point, paint: &TextPaint) {
        let Some(font) = &self.font else {
            log::warn!("Text drawn before a font was set on the cpu surface.");
            return;
        };

        let px = font.pixel_size(paint.size);
        let alpha = paint.effective_color().alpha as u16;
        let baseline = baseline + self.offset;

        let mut pen_x = baseline.x as f32;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|left| font.font().horizontal_kern(left, ch, px)) {
                pen_x += kern;
            }
            prev = Some(ch);

            let glyph_index = font.font().lookup_glyph_index(ch);
            let key = GlyphKey {
                glyph_index,
                px: quantize(px),
            };
            let glyph = self.glyphs.entry(key).or_insert_with(|| {
                let (metrics, coverage) = font.font().rasterize_indexed(glyph_index, px);
                CachedGlyph { metrics, coverage }
            });

            let metrics = glyph.metrics;
            let left = (pen_x + metrics.xmin as f32).floor() as i32;
            let top = baseline.y - metrics.height as i32 - metrics.ymin;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = glyph.coverage[row * metrics.width + col] as u16;
                    let value = (coverage * alpha / 255) as u8;
                    let p = Point::new(left + col as i32, top + row as i32);
                    plot(&mut self.canvas, self.clip, p, value);
                }
            }

            pen_x += metrics.advance_width;
        }
    }

    fn draw_image(&mut self, image: &Bitmap, origin: Point) {
        let origin = origin + self.offset;
        for y in 0..image.height {
            for x in 0..image.width {
                let value = image.data[y * image.width + x];
                let p = Point::new(origin.x + x as i32, origin.y + y as i32);
                plot(&mut self.canvas, self.clip, p, value);
            }
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip = Some(rect.translate(self.offset));
    }

    fn translate(&mut self, offset: Vector) {
        self.offset += offset;
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        composite::{Composite, ImagePosition},
        geometry::{Padding, Size, rect_at_origin},
        text::metrics::test_util::FixedMetrics,
    };

    #[test]
    fn image_blit_respects_translation_and_clip() {
        let mut surface = CpuSurface::new(8, 8);
        surface.translate(Vector::new(2, 1));
        surface.clip_rect(Rect::new(Point::new(0, 0), Point::new(2, 2)));
        surface.draw_image(&Bitmap::filled(3, 3, 100), Point::new(0, 0));

        let canvas = surface.canvas();
        assert_eq!(canvas.get(2, 1), Some(100));
        assert_eq!(canvas.get(3, 2), Some(100));
        // clipped
        assert_eq!(canvas.get(4, 1), Some(0));
        assert_eq!(canvas.get(2, 3), Some(0));
        // outside the translated area
        assert_eq!(canvas.get(1, 1), Some(0));
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut surface = CpuSurface::new(4, 4);
        surface.draw_text("abc", Point::new(0, 3), &TextPaint::default());
        assert!(surface.canvas().data.iter().all(|&v| v == 0));
    }

    #[test]
    fn composite_image_lands_where_layout_says() {
        let mut composite: Composite<Bitmap, FixedMetrics> =
            Composite::new(FixedMetrics::default());
        composite.set_image(Bitmap::filled(4, 4, 50));
        composite.set_position(ImagePosition::Above);
        composite.set_padding(Padding::new_all_same(2)).unwrap();

        // width max(4, 0) + 4 = 8, height 4 + 18 + 0 + 4 = 26
        let size = composite.intrinsic_size();
        assert_eq!(size, Size::new(8, 26));

        let mut surface = CpuSurface::new(20, 30);
        let bounds = rect_at_origin(size).translate(Vector::new(10, 0));
        composite.render(&mut surface, bounds);

        let canvas = surface.canvas();
        assert_eq!(canvas.get(12, 2), Some(50));
        assert_eq!(canvas.get(15, 5), Some(50));
        assert_eq!(canvas.get(16, 2), Some(0));
        assert_eq!(canvas.get(11, 2), Some(0));
        assert_eq!(canvas.get(12, 6), Some(0));
    }
}
