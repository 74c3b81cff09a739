/// Font metrics seam and the per-size metrics snapshot.
pub mod metrics;
/// Text paint state: size, color, alpha, color filter.
pub mod paint;
/// Character-budget truncation with an ellipsis glyph.
pub mod truncate;

pub use metrics::{FontMetrics, MetricsCache, TextExtent, TextMetrics};
pub use paint::{ColorFilter, DEFAULT_TEXT_SIZE, TextPaint};
pub use truncate::{ELLIPSIS, EllipsizeMode, PREFIX_TAIL_LEN, truncate};
