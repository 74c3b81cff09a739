//! # labelkit
//!
//! Layout, truncation and drawing of a label made of one optional image and
//! one optional line of text.
//!
//! ## Overview
//!
//! A [`Composite`] owns an image handle, a text, a [`TextPaint`] and a
//! [`TextMetrics`] provider. The image can sit before, above, after or below
//! the text, with padding on every edge and a gap between the two. From that
//! the composite derives:
//!
//! *   the text actually shown, shortened to a character budget with an
//!     ellipsis ([`text::truncate`]),
//! *   its intrinsic size,
//! *   the image origin and the text baseline inside any host rectangle.
//!
//! Drawing goes through the [`Surface`] trait. [`RecordingSurface`] collects
//! draw commands for a host to replay, [`CpuSurface`] rasterizes with
//! fontdue into a grayscale [`Bitmap`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use labelkit::{Bitmap, Composite, FontStorage, ImagePosition, fontdb};
//! use labelkit::geometry::rect_at_origin;
//! use labelkit::renderer::CpuSurface;
//!
//! let mut storage = FontStorage::new();
//! storage.load_system_fonts();
//! let query = fontdb::Query {
//!     families: &[fontdb::Family::SansSerif],
//!     weight: fontdb::Weight::NORMAL,
//!     stretch: fontdb::Stretch::Normal,
//!     style: fontdb::Style::Normal,
//! };
//! let metrics = Arc::new(storage.metrics(&query, 1.0).expect("no font"));
//!
//! let mut label: Composite<Bitmap, _> = Composite::new(Arc::clone(&metrics));
//! label.set_text("Downloads");
//! label.set_max_text_length(Some(6));
//! label.set_image(Bitmap::filled(16, 16, 255));
//! label.set_position(ImagePosition::Above);
//! label.set_gap(4).unwrap();
//!
//! let size = label.intrinsic_size();
//! let mut surface = CpuSurface::new(size.width as usize, size.height as usize)
//!     .with_font(metrics);
//! label.render(&mut surface, rect_at_origin(size));
//! ```

pub mod composite;
pub mod error;
pub mod font_storage;
pub mod geometry;
pub mod image;
pub mod renderer;
pub mod text;

// common re-exports
pub use composite::{Composite, CompositeConfig, ImagePosition, Placement};
pub use error::{LayoutError, Result};
pub use font_storage::{FontStorage, FontdueMetrics};
pub use image::{Bitmap, Image, ImageSource, ResourceLoader};
pub use renderer::{CpuSurface, DrawCommand, RecordingSurface, Surface};
pub use text::{EllipsizeMode, TextMetrics, TextPaint};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use palette;
