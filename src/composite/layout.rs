//! Pure geometry of an image + text composite.
//!
//! Both the intrinsic size and the placement are functions of a
//! [`LayoutInput`] only, so the size a host reserves and the origins the
//! composite draws at always come from the same numbers.

use crate::{
    error::LayoutError,
    geometry::{Padding, Point, Rect, Size},
    text::TextExtent,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Side of the composite the image is drawn on, relative to the text.
pub enum ImagePosition {
    /// Image first, text after it on the same row.
    #[default]
    Before,
    /// Image on top, text below it.
    Above,
    /// Text first, image after it on the same row.
    After,
    /// Text on top, image below it.
    Below,
}

impl ImagePosition {
    /// Image and text share the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, ImagePosition::Before | ImagePosition::After)
    }
}

impl TryFrom<i32> for ImagePosition {
    type Error = LayoutError;

    /// Maps the host codes `0..=3` (left, top, right, bottom).
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ImagePosition::Before),
            1 => Ok(ImagePosition::Above),
            2 => Ok(ImagePosition::After),
            3 => Ok(ImagePosition::Below),
            _ => Err(LayoutError::InvalidPosition(code)),
        }
    }
}

impl From<ImagePosition> for i32 {
    fn from(position: ImagePosition) -> Self {
        match position {
            ImagePosition::Before => 0,
            ImagePosition::Above => 1,
            ImagePosition::After => 2,
            ImagePosition::Below => 3,
        }
    }
}

/// Everything the layout depends on, already measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutInput {
    pub position: ImagePosition,
    pub padding: Padding,
    pub gap: i32,
    /// Intrinsic size of the image, `None` when there is no image.
    pub image: Option<Size>,
    /// Rounded width of the display text, 0 when the text is empty.
    pub text_width: i32,
    /// Whether there is any display text to draw.
    pub has_text: bool,
    pub text: TextExtent,
}

impl Default for LayoutInput {
    fn default() -> Self {
        Self {
            position: ImagePosition::default(),
            padding: Padding::zero(),
            gap: 0,
            image: None,
            text_width: 0,
            has_text: false,
            text: TextExtent::default(),
        }
    }
}

/// Origins produced by [`place`]. `text_baseline` is where the text renderer
/// starts drawing so the glyph baseline passes through its `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    pub image_origin: Option<Point>,
    pub text_baseline: Option<Point>,
}

/// Minimum size that renders the composite without clipping.
///
/// The gap is reserved along the layout axis even when the image or the
/// text is missing. Sums saturate at `i32::MAX`.
pub fn intrinsic_size(input: &LayoutInput) -> Size {
    let image = input.image.unwrap_or_else(Size::zero);
    let padding = &input.padding;
    let horizontal = padding.left.saturating_add(padding.right);
    let vertical = padding.top.saturating_add(padding.bottom);
    let text_height = input.text.height;

    if input.position.is_horizontal() {
        Size::new(
            image
                .width
                .saturating_add(input.text_width)
                .saturating_add(input.gap)
                .saturating_add(horizontal),
            image.height.max(text_height).saturating_add(vertical),
        )
    } else {
        Size::new(
            image.width.max(input.text_width).saturating_add(horizontal),
            image
                .height
                .saturating_add(text_height)
                .saturating_add(input.gap)
                .saturating_add(vertical),
        )
    }
}

/// `bounds` inset by `padding`, saturating instead of overflowing.
pub fn content_box(bounds: Rect, padding: Padding) -> Rect {
    Rect::new(
        Point::new(
            bounds.min.x.saturating_add(padding.left),
            bounds.min.y.saturating_add(padding.top),
        ),
        Point::new(
            bounds.max.x.saturating_sub(padding.right),
            bounds.max.y.saturating_sub(padding.bottom),
        ),
    )
}

/// Half of `space`, rounded half-up like the host's float centering.
fn half_round_up(space: i32) -> i32 {
    (space as f32 / 2.0 + 0.5).floor() as i32
}

/// Positions the image and the text baseline inside `bounds`.
///
/// The content box is `bounds` inset by the padding; elements are centered
/// across the layout axis within it. Nothing is clamped, so bounds smaller
/// than the intrinsic size give negative centering offsets like the host
/// would. Offsets saturate instead of overflowing.
pub fn place(input: &LayoutInput, bounds: Rect) -> Placement {
    let content = content_box(bounds, input.padding);
    let left = content.min.x;
    let top = content.min.y;
    let content_width = content.max.x.saturating_sub(left);
    let content_height = content.max.y.saturating_sub(top);

    let text = input.text;
    let text_width = input.text_width;
    let gap = input.gap;

    // Centering offsets inside the content box.
    let center_x = |width: i32| left.saturating_add(content_width.saturating_sub(width) / 2);
    let center_y = |height: i32| top.saturating_add(content_height.saturating_sub(height) / 2);
    let text_y = |y: i32| y.saturating_add(text.baseline_offset);

    let mut placement = Placement::default();
    match input.position {
        ImagePosition::Before => {
            let mut text_x = left.saturating_add(gap);
            if let Some(image) = input.image {
                placement.image_origin = Some(Point::new(left, center_y(image.height)));
                text_x = text_x.saturating_add(image.width);
            }
            if input.has_text {
                let y = text_y(center_y(text.height));
                placement.text_baseline = Some(Point::new(text_x, y));
            }
        }
        ImagePosition::After => {
            if input.has_text {
                let y = text_y(center_y(text.height));
                placement.text_baseline = Some(Point::new(left, y));
            }
            if let Some(image) = input.image {
                let x = left.saturating_add(text_width).saturating_add(gap);
                placement.image_origin = Some(Point::new(x, center_y(image.height)));
            }
        }
        ImagePosition::Above => {
            let mut y = text_y(top.saturating_add(gap));
            if let Some(image) = input.image {
                placement.image_origin = Some(Point::new(center_x(image.width), top));
                y = y.saturating_add(image.height);
            }
            if input.has_text {
                placement.text_baseline = Some(Point::new(center_x(text_width), y));
            }
        }
        ImagePosition::Below => {
            if input.has_text {
                // Rounded half-up, unlike the truncating `center_x`.
                let x = left.saturating_add(half_round_up(content_width.saturating_sub(text_width)));
                placement.text_baseline = Some(Point::new(x, text_y(top)));
            }
            // The text row is reserved even when there is no text.
            if let Some(image) = input.image {
                let y = top.saturating_add(text.height).saturating_add(gap);
                placement.image_origin = Some(Point::new(center_x(image.width), y));
            }
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect_at_origin;

    const POSITIONS: [ImagePosition; 4] = [
        ImagePosition::Before,
        ImagePosition::Above,
        ImagePosition::After,
        ImagePosition::Below,
    ];

    fn input(position: ImagePosition) -> LayoutInput {
        LayoutInput {
            position,
            padding: Padding::new(1, 2, 3, 4),
            gap: 5,
            image: Some(Size::new(20, 10)),
            text_width: 30,
            has_text: true,
            text: TextExtent {
                height: 16,
                baseline_offset: 12,
            },
        }
    }

    fn place_intrinsic(input: &LayoutInput) -> Placement {
        place(input, rect_at_origin(intrinsic_size(input)))
    }

    #[test]
    fn position_codes_round_trip() {
        for position in POSITIONS {
            assert_eq!(ImagePosition::try_from(i32::from(position)), Ok(position));
        }
        assert_eq!(
            ImagePosition::try_from(4),
            Err(LayoutError::InvalidPosition(4))
        );
        assert_eq!(
            ImagePosition::try_from(-1),
            Err(LayoutError::InvalidPosition(-1))
        );
    }

    #[test]
    fn horizontal_intrinsic_size() {
        for position in [ImagePosition::Before, ImagePosition::After] {
            // 20 + 30 + 5 + (4 + 2), max(10, 16) + (1 + 3)
            assert_eq!(intrinsic_size(&input(position)), Size::new(61, 20));
        }
    }

    #[test]
    fn vertical_intrinsic_size() {
        for position in [ImagePosition::Above, ImagePosition::Below] {
            // max(20, 30) + (4 + 2), 10 + 16 + 5 + (1 + 3)
            assert_eq!(intrinsic_size(&input(position)), Size::new(36, 35));
        }
    }

    #[test]
    fn gap_is_reserved_without_a_partner() {
        let image_only = LayoutInput {
            position: ImagePosition::Before,
            gap: 8,
            image: Some(Size::new(40, 40)),
            ..Default::default()
        };
        assert_eq!(intrinsic_size(&image_only), Size::new(48, 40));

        let text_only = LayoutInput {
            position: ImagePosition::Above,
            padding: Padding::new_all_same(2),
            gap: 4,
            text_width: 10,
            has_text: true,
            text: TextExtent {
                height: 16,
                baseline_offset: 12,
            },
            ..Default::default()
        };
        assert_eq!(intrinsic_size(&text_only), Size::new(14, 16 + 4 + 2 + 2));
    }

    #[test]
    fn before_places_image_then_text() {
        let placement = place_intrinsic(&input(ImagePosition::Before));
        // content box: x 4..59, y 1..17, height 16
        assert_eq!(placement.image_origin, Some(Point::new(4, 1 + 3)));
        assert_eq!(placement.text_baseline, Some(Point::new(4 + 20 + 5, 1 + 12)));
    }

    #[test]
    fn before_without_image_still_offsets_by_gap() {
        let mut no_image = input(ImagePosition::Before);
        no_image.image = None;
        let placement = place_intrinsic(&no_image);
        assert_eq!(placement.image_origin, None);
        assert_eq!(placement.text_baseline, Some(Point::new(4 + 5, 1 + 12)));
    }

    #[test]
    fn after_places_text_then_image() {
        let placement = place_intrinsic(&input(ImagePosition::After));
        assert_eq!(placement.text_baseline, Some(Point::new(4, 1 + 12)));
        assert_eq!(placement.image_origin, Some(Point::new(4 + 30 + 5, 1 + 3)));

        let mut no_text = input(ImagePosition::After);
        no_text.has_text = false;
        no_text.text_width = 0;
        let placement = place_intrinsic(&no_text);
        assert_eq!(placement.text_baseline, None);
        assert_eq!(placement.image_origin, Some(Point::new(4 + 5, 1 + 3)));
    }

    #[test]
    fn above_centers_horizontally() {
        let placement = place_intrinsic(&input(ImagePosition::Above));
        // content width 30: image offset (30 - 20) / 2 = 5
        assert_eq!(placement.image_origin, Some(Point::new(4 + 5, 1)));
        assert_eq!(
            placement.text_baseline,
            Some(Point::new(4, 1 + 10 + 5 + 12))
        );

        let mut no_image = input(ImagePosition::Above);
        no_image.image = None;
        let placement = place_intrinsic(&no_image);
        assert_eq!(placement.text_baseline, Some(Point::new(4, 1 + 5 + 12)));
    }

    #[test]
    fn below_reserves_text_row_for_the_image() {
        let placement = place_intrinsic(&input(ImagePosition::Below));
        assert_eq!(placement.text_baseline, Some(Point::new(4, 1 + 12)));
        assert_eq!(placement.image_origin, Some(Point::new(4 + 5, 1 + 16 + 5)));

        let mut no_text = input(ImagePosition::Below);
        no_text.has_text = false;
        no_text.text_width = 0;
        let placement = place_intrinsic(&no_text);
        assert_eq!(placement.text_baseline, None);
        // content width is the image width now, text height still counted
        assert_eq!(placement.image_origin, Some(Point::new(4, 1 + 16 + 5)));
    }

    #[test]
    fn placement_follows_bounds_origin() {
        for position in POSITIONS {
            let input = input(position);
            let at_origin = place_intrinsic(&input);
            let shifted = place(
                &input,
                rect_at_origin(intrinsic_size(&input)).translate(euclid::vec2(100, 50)),
            );
            let shift = |p: Option<Point>| p.map(|p| p + euclid::vec2(100, 50));
            assert_eq!(shifted.image_origin, shift(at_origin.image_origin));
            assert_eq!(shifted.text_baseline, shift(at_origin.text_baseline));
        }
    }

    #[test]
    fn placed_elements_fit_the_intrinsic_box() {
        for position in POSITIONS {
            let input = input(position);
            let size = intrinsic_size(&input);
            let placement = place_intrinsic(&input);

            let image = placement.image_origin.unwrap_or_else(Point::origin);
            assert!(image.x >= 4 && image.x + 20 <= size.width - 2);
            assert!(image.y >= 1 && image.y + 10 <= size.height - 3);

            let baseline = placement.text_baseline.unwrap_or_else(Point::origin);
            let text_top = baseline.y - 12;
            assert!(baseline.x >= 4 && baseline.x + 30 <= size.width - 2);
            assert!(text_top >= 1 && text_top + 16 <= size.height - 3);
        }
    }

    #[test]
    fn below_text_rounds_odd_space_up() {
        let input = LayoutInput {
            position: ImagePosition::Below,
            image: Some(Size::new(31, 10)),
            text_width: 30,
            has_text: true,
            text: TextExtent {
                height: 16,
                baseline_offset: 12,
            },
            ..Default::default()
        };
        let placement = place_intrinsic(&input);
        // (31 - 30) / 2 = 0.5 rounds to 1
        assert_eq!(placement.text_baseline, Some(Point::new(1, 12)));
        assert_eq!(placement.image_origin, Some(Point::new(0, 16)));

        // ABOVE keeps the truncating integer centering
        let above = LayoutInput {
            position: ImagePosition::Above,
            ..input
        };
        assert_eq!(place_intrinsic(&above).text_baseline, Some(Point::new(0, 10 + 12)));

        // negative space rounds half-up as well: -0.5 -> 0
        let narrow = place(&input, rect_at_origin(Size::new(29, 40)));
        assert_eq!(narrow.text_baseline, Some(Point::new(0, 12)));
    }

    #[test]
    fn huge_geometry_saturates() {
        let input = LayoutInput {
            position: ImagePosition::Before,
            padding: Padding::new(0, 1, 0, i32::MAX),
            gap: i32::MAX,
            image: Some(Size::new(i32::MAX, i32::MAX)),
            text_width: 10,
            has_text: true,
            ..Default::default()
        };
        assert_eq!(intrinsic_size(&input), Size::new(i32::MAX, i32::MAX));
        let placement = place_intrinsic(&input);
        assert!(placement.image_origin.is_some());
        assert!(placement.text_baseline.is_some());

        for position in POSITIONS {
            let tall = LayoutInput {
                position,
                padding: Padding::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX),
                ..input
            };
            let size = intrinsic_size(&tall);
            assert!(size.width == i32::MAX && size.height == i32::MAX);
            place(&tall, rect_at_origin(size));
            place(&tall, Rect::new(Point::new(-5, -5), Point::new(5, 5)));
        }
    }
}
