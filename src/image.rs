use crate::{
    error::{LayoutError, Result},
    geometry::Size,
};

/// Anything the composite can lay out and hand to a surface as an image.
///
/// The handle itself stays opaque; the layout only needs its intrinsic size.
pub trait Image {
    fn intrinsic_width(&self) -> i32;
    fn intrinsic_height(&self) -> i32;

    fn intrinsic_size(&self) -> Size {
        Size::new(self.intrinsic_width(), self.intrinsic_height())
    }
}

/// Resolves host resource ids to image handles.
pub trait ResourceLoader<I> {
    fn load(&self, id: u32) -> Option<I>;
}

impl<I, F: Fn(u32) -> Option<I>> ResourceLoader<I> for F {
    fn load(&self, id: u32) -> Option<I> {
        self(id)
    }
}

/// The ways a caller can hand an image to a composite.
pub enum ImageSource<'a, I> {
    /// A host resource id, resolved through a loader.
    Resource(u32, &'a dyn ResourceLoader<I>),
    /// An in-memory bitmap, converted into the handle type.
    Bitmap(Bitmap),
    /// A ready-made handle.
    Handle(I),
}

/// Resolves a resource id, failing with [`LayoutError::ImageNotFound`].
pub fn load_resource<I>(id: u32, loader: &dyn ResourceLoader<I>) -> Result<I> {
    loader.load(id).ok_or_else(|| {
        log::warn!("image resource {id} not found");
        LayoutError::ImageNotFound(id)
    })
}

impl<I> ImageSource<'_, I> {
    /// Resolves the source, turning bitmaps into handles with `from_bitmap`.
    ///
    /// Works for handle types that have no `From<Bitmap>` conversion.
    pub fn resolve_with(self, from_bitmap: impl FnOnce(Bitmap) -> I) -> Result<I> {
        match self {
            ImageSource::Resource(id, loader) => load_resource(id, loader),
            ImageSource::Bitmap(bitmap) => Ok(from_bitmap(bitmap)),
            ImageSource::Handle(handle) => Ok(handle),
        }
    }
}

impl<I: From<Bitmap>> ImageSource<'_, I> {
    pub fn resolve(self) -> Result<I> {
        self.resolve_with(I::from)
    }
}

/// Simple grayscale bitmap.
///
/// Used both as an image handle and as the canvas of
/// [`CpuSurface`](crate::renderer::CpuSurface).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Bitmap of the given size with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Adds `value` to a pixel, saturating at 255. Out-of-bounds writes are
    /// ignored.
    pub fn accumulate(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            let pixel = &mut self.data[y * self.width + x];
            *pixel = pixel.saturating_add(value);
        }
    }
}

/// Sizes past `i32::MAX` saturate.
impl Image for Bitmap {
    fn intrinsic_width(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    fn intrinsic_height(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}
