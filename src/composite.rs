/// Intrinsic size and placement, free of any composite state.
pub mod layout;

pub use layout::{ImagePosition, LayoutInput, Placement};

use palette::Srgba;

use crate::{
    error::{Result, non_negative},
    geometry::{Padding, Rect, Size, rect_at_origin},
    image::{Bitmap, Image, ImageSource, ResourceLoader, load_resource},
    renderer::Surface,
    text::{ColorFilter, EllipsizeMode, MetricsCache, TextMetrics, TextPaint, truncate},
};

/// User-facing settings of a composite.
///
/// Defaults: image before the text, no padding, no gap, no length limit,
/// suffix ellipsis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeConfig {
    pub text: Option<String>,
    /// Character budget of the displayed text, `None` for unbounded.
    pub max_text_length: Option<usize>,
    pub ellipsize_mode: EllipsizeMode,
    pub padding: Padding,
    pub gap: i32,
    pub position: ImagePosition,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            text: None,
            max_text_length: None,
            ellipsize_mode: EllipsizeMode::Suffix,
            padding: Padding::zero(),
            gap: 0,
            position: ImagePosition::Before,
        }
    }
}

/// One image and one line of text laid out together.
///
/// `I` is the host's image handle and `M` the text measuring service. The
/// composite owns both, plus its [`TextPaint`]. Derived state (display text,
/// its width, the font metrics snapshot) is refreshed by the setter that
/// invalidates it, so every query afterwards is a cheap read.
pub struct Composite<I, M> {
    config: CompositeConfig,
    display_text: Option<String>,
    text_width: i32,
    image: Option<I>,
    paint: TextPaint,
    metrics: M,
    metrics_cache: MetricsCache,
    dirty: bool,
}

impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Creates an empty composite with default settings and paint.
    pub fn new(metrics: M) -> Self {
        let paint = TextPaint::default();
        let metrics_cache = MetricsCache::new(paint.size, &metrics);
        Self {
            config: CompositeConfig::default(),
            display_text: None,
            text_width: 0,
            image: None,
            paint,
            metrics,
            metrics_cache,
            dirty: true,
        }
    }

    /// Creates a composite from a full configuration and paint.
    ///
    /// Fails with the same errors as the individual setters.
    pub fn with_config(config: CompositeConfig, paint: TextPaint, metrics: M) -> Result<Self> {
        validate_padding(&config.padding)?;
        non_negative("gap", config.gap)?;

        let metrics_cache = MetricsCache::new(paint.size, &metrics);
        let mut composite = Self {
            config,
            display_text: None,
            text_width: 0,
            image: None,
            paint,
            metrics,
            metrics_cache,
            dirty: true,
        };
        composite.retruncate();
        Ok(composite)
    }

    /// Current settings, including the original text.
    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// Text size, color, alpha and filter used for drawing.
    pub fn paint(&self) -> &TextPaint {
        &self.paint
    }

    /// The measuring service this composite owns.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Whether something changed since the last [`Self::render`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }
}

/// text
impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Sets the original text. The displayed text is derived from it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = Some(text.into());
        self.retruncate();
    }

    /// Removes the text; the text row height is still reserved.
    pub fn clear_text(&mut self) {
        self.config.text = None;
        self.retruncate();
    }

    /// The text as set, before truncation.
    pub fn text(&self) -> Option<&str> {
        self.config.text.as_deref()
    }

    /// The text actually drawn.
    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    /// Character budget of the displayed text, `None` for unbounded.
    /// The original text is re-truncated.
    pub fn set_max_text_length(&mut self, max_text_length: Option<usize>) {
        self.config.max_text_length = max_text_length;
        self.retruncate();
    }

    /// Where the ellipsis goes; the original text is re-truncated.
    pub fn set_ellipsize_mode(&mut self, mode: EllipsizeMode) {
        self.config.ellipsize_mode = mode;
        self.retruncate();
    }

    /// Changes the text size and refreshes the font metrics snapshot.
    pub fn set_text_size(&mut self, size: f32) {
        self.paint.size = size;
        self.metrics_cache.refresh(size, &self.metrics);
        self.remeasure();
    }

    /// Sets the text color. Alpha and filter are applied on top of it.
    pub fn set_text_color(&mut self, color: Srgba<u8>) {
        self.paint.color = color;
        self.invalidate();
    }

    /// Returns `true` when the alpha actually changed.
    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        if self.paint.alpha == alpha {
            return false;
        }
        self.paint.alpha = alpha;
        self.invalidate();
        true
    }

    /// Returns `true` when the filter actually changed.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) -> bool {
        if self.paint.color_filter == filter {
            return false;
        }
        self.paint.color_filter = filter;
        self.invalidate();
        true
    }

    /// Opacity reported to the host: the text alpha.
    pub fn opacity(&self) -> u8 {
        self.paint.alpha
    }

    fn retruncate(&mut self) {
        self.display_text = self.config.text.as_deref().map(|text| {
            truncate(
                text,
                self.config.max_text_length,
                self.config.ellipsize_mode,
            )
        });
        self.remeasure();
    }

    fn remeasure(&mut self) {
        let width = match self.visible_text() {
            Some(text) => self.metrics.measure_width(text, self.paint.size).round() as i32,
            None => 0,
        };
        self.text_width = width;
        self.invalidate();
    }

    fn visible_text(&self) -> Option<&str> {
        self.display_text.as_deref().filter(|text| !text.is_empty())
    }
}

/// image
impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Uses `image` as the image, replacing any previous one.
    pub fn set_image(&mut self, image: I) {
        log::debug!(
            "image set: {}x{}",
            image.intrinsic_width(),
            image.intrinsic_height()
        );
        self.image = Some(image);
        self.invalidate();
    }

    /// Resolves `source` and uses the result as the image.
    ///
    /// On failure the current image is kept.
    pub fn set_image_source(&mut self, source: ImageSource<'_, I>) -> Result<()>
    where
        I: From<Bitmap>,
    {
        let image = source.resolve()?;
        self.set_image(image);
        Ok(())
    }

    /// Loads the image for resource `id` through `loader`.
    ///
    /// On failure the current image is kept.
    pub fn set_image_resource(&mut self, id: u32, loader: &dyn ResourceLoader<I>) -> Result<()> {
        let image = load_resource(id, loader)?;
        self.set_image(image);
        Ok(())
    }

    /// Converts `bitmap` into the handle type and uses it as the image.
    pub fn set_image_bitmap(&mut self, bitmap: Bitmap)
    where
        I: From<Bitmap>,
    {
        self.set_image(I::from(bitmap));
    }

    /// Removes and returns the image.
    pub fn clear_image(&mut self) -> Option<I> {
        self.invalidate();
        self.image.take()
    }

    /// The current image handle.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }
}

/// geometry settings
impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Sets all four paddings at once. Rejects any negative edge.
    pub fn set_padding(&mut self, padding: Padding) -> Result<()> {
        validate_padding(&padding)?;
        self.config.padding = padding;
        self.invalidate();
        Ok(())
    }

    /// Rejects negative values, keeping the previous one.
    pub fn set_padding_left(&mut self, left: i32) -> Result<()> {
        self.config.padding.left = non_negative("padding left", left)?;
        self.invalidate();
        Ok(())
    }

    /// Rejects negative values, keeping the previous one.
    pub fn set_padding_top(&mut self, top: i32) -> Result<()> {
        self.config.padding.top = non_negative("padding top", top)?;
        self.invalidate();
        Ok(())
    }

    /// Rejects negative values, keeping the previous one.
    pub fn set_padding_right(&mut self, right: i32) -> Result<()> {
        self.config.padding.right = non_negative("padding right", right)?;
        self.invalidate();
        Ok(())
    }

    /// Rejects negative values, keeping the previous one.
    pub fn set_padding_bottom(&mut self, bottom: i32) -> Result<()> {
        self.config.padding.bottom = non_negative("padding bottom", bottom)?;
        self.invalidate();
        Ok(())
    }

    /// Space between the image and the text along the layout axis.
    pub fn set_gap(&mut self, gap: i32) -> Result<()> {
        self.config.gap = non_negative("gap", gap)?;
        self.invalidate();
        Ok(())
    }

    /// Side of the text the image is drawn on.
    pub fn set_position(&mut self, position: ImagePosition) {
        self.config.position = position;
        self.invalidate();
    }

    /// Sets the position from a host code, see [`ImagePosition::try_from`].
    pub fn set_position_code(&mut self, code: i32) -> Result<()> {
        let position = ImagePosition::try_from(code).inspect_err(|e| log::warn!("{e}"))?;
        self.set_position(position);
        Ok(())
    }
}

/// measurement and layout
impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Snapshot of everything the layout engine needs.
    pub fn layout_input(&self) -> LayoutInput {
        LayoutInput {
            position: self.config.position,
            padding: self.config.padding,
            gap: self.config.gap,
            image: self.image.as_ref().map(Image::intrinsic_size),
            text_width: self.text_width,
            has_text: self.visible_text().is_some(),
            text: self.metrics_cache.extent(),
        }
    }

    /// Minimum size that draws the composite without clipping.
    pub fn intrinsic_size(&self) -> Size {
        layout::intrinsic_size(&self.layout_input())
    }

    /// Width of [`Self::intrinsic_size`].
    pub fn intrinsic_width(&self) -> i32 {
        self.intrinsic_size().width
    }

    /// Height of [`Self::intrinsic_size`].
    pub fn intrinsic_height(&self) -> i32 {
        self.intrinsic_size().height
    }

    /// Origins of the image and the text baseline inside `bounds`.
    pub fn layout(&self, bounds: Rect) -> Placement {
        layout::place(&self.layout_input(), bounds)
    }

    /// Same as [`Self::layout`] with bounds of exactly the intrinsic size.
    pub fn layout_intrinsic(&self) -> Placement {
        let input = self.layout_input();
        layout::place(&input, rect_at_origin(layout::intrinsic_size(&input)))
    }
}

/// drawing
impl<I: Image, M: TextMetrics> Composite<I, M> {
    /// Draws the composite into `bounds` on `surface`.
    ///
    /// The surface is translated to `bounds.min` for the duration of the
    /// call and clipped to the padded content box. Saving and restoring the
    /// clip is left to the host.
    pub fn render<S: Surface<I> + ?Sized>(&mut self, surface: &mut S, bounds: Rect) {
        let offset = bounds.min.to_vector();
        let local = rect_at_origin(bounds.size());
        let placement = layout::place(&self.layout_input(), local);

        surface.translate(offset);
        surface.clip_rect(layout::content_box(local, self.config.padding));

        match self.config.position {
            ImagePosition::Before | ImagePosition::Above => {
                self.emit_image(surface, &placement);
                self.emit_text(surface, &placement);
            }
            ImagePosition::After | ImagePosition::Below => {
                self.emit_text(surface, &placement);
                self.emit_image(surface, &placement);
            }
        }

        surface.translate(-offset);
        self.dirty = false;
    }

    fn emit_image<S: Surface<I> + ?Sized>(&self, surface: &mut S, placement: &Placement) {
        if let (Some(image), Some(origin)) = (&self.image, placement.image_origin) {
            log::trace!("draw image at {origin:?}");
            surface.draw_image(image, origin);
        }
    }

    fn emit_text<S: Surface<I> + ?Sized>(&self, surface: &mut S, placement: &Placement) {
        if let (Some(text), Some(baseline)) = (self.visible_text(), placement.text_baseline) {
            log::trace!("draw text {text:?} at {baseline:?}");
            surface.draw_text(text, baseline, &self.paint);
        }
    }
}

fn validate_padding(padding: &Padding) -> Result<()> {
    non_negative("padding left", padding.left)?;
    non_negative("padding top", padding.top)?;
    non_negative("padding right", padding.right)?;
    non_negative("padding bottom", padding.bottom)?;
    Ok(())
}
