//! Integer geometry shared by the layout engine and the renderers.
//!
//! **Y-axis goes down.** All values are in host pixels; the composite never
//! scales anything itself.

/// Coordinate space of a composite and the surface it is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutSpace;

pub type Point = euclid::Point2D<i32, LayoutSpace>;
pub type Vector = euclid::Vector2D<i32, LayoutSpace>;
pub type Size = euclid::Size2D<i32, LayoutSpace>;
pub type Rect = euclid::Box2D<i32, LayoutSpace>;
/// Padding in `top, right, bottom, left` order, as `euclid` stores it.
pub type Padding = euclid::SideOffsets2D<i32, LayoutSpace>;

/// Rectangle of `size` whose top-left corner sits at the origin.
pub fn rect_at_origin(size: Size) -> Rect {
    Rect::from_size(size)
}
