/// Vertical font metrics relative to the baseline.
///
/// **Y-axis goes down**, so `ascent` is negative (above the baseline) and
/// `descent` is positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

/// Measuring service the composite calls into.
///
/// Implementations own any conversion from logical text size to device
/// pixels; the composite never scales sizes itself.
pub trait TextMetrics {
    /// Rendered advance width of `text` at `size`.
    fn measure_width(&self, text: &str, size: f32) -> f32;

    /// Font metrics at `size`.
    fn font_metrics(&self, size: f32) -> FontMetrics;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn measure_width(&self, text: &str, size: f32) -> f32 {
        (**self).measure_width(text, size)
    }

    fn font_metrics(&self, size: f32) -> FontMetrics {
        (**self).font_metrics(size)
    }
}

impl<M: TextMetrics + ?Sized> TextMetrics for std::sync::Arc<M> {
    fn measure_width(&self, text: &str, size: f32) -> f32 {
        (**self).measure_width(text, size)
    }

    fn font_metrics(&self, size: f32) -> FontMetrics {
        (**self).font_metrics(size)
    }
}

/// Integer text box derived from a [`FontMetrics`] snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    /// `round(descent - ascent)`.
    pub height: i32,
    /// Distance from the top of the text box to its baseline,
    /// `round(-ascent - leading)`.
    pub baseline_offset: i32,
}

impl From<FontMetrics> for TextExtent {
    fn from(metrics: FontMetrics) -> Self {
        Self {
            height: (metrics.descent - metrics.ascent).round() as i32,
            baseline_offset: (-metrics.ascent - metrics.leading).round() as i32,
        }
    }
}

/// Snapshot of the font metrics for the current text size.
///
/// Only [`MetricsCache::refresh`] talks to the provider; layout reads the
/// cached extent.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsCache {
    size: f32,
    metrics: FontMetrics,
    extent: TextExtent,
}

impl MetricsCache {
    pub fn new(size: f32, provider: &impl TextMetrics) -> Self {
        let mut cache = Self {
            size,
            metrics: FontMetrics::default(),
            extent: TextExtent::default(),
        };
        cache.load(provider);
        cache
    }

    /// Re-reads the metrics when `size` differs from the cached one.
    pub fn refresh(&mut self, size: f32, provider: &impl TextMetrics) -> TextExtent {
        if self.size != size {
            self.size = size;
            self.load(provider);
        }
        self.extent
    }

    fn load(&mut self, provider: &impl TextMetrics) {
        self.metrics = provider.font_metrics(self.size);
        self.extent = TextExtent::from(self.metrics);
        log::debug!(
            "font metrics at size {}: {:?} -> {:?}",
            self.size,
            self.metrics,
            self.extent
        );
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub fn extent(&self) -> TextExtent {
        self.extent
    }
}
