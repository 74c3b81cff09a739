use std::sync::Arc;

use image::{ImageBuffer, Luma};
use labelkit::{
    Bitmap, Composite, EllipsizeMode, FontStorage, ImagePosition,
    fontdb::{self, Family, Query},
    geometry::{Padding, Point, Rect},
    renderer::CpuSurface,
};

const POSITIONS: [ImagePosition; 4] = [
    ImagePosition::Before,
    ImagePosition::Above,
    ImagePosition::After,
    ImagePosition::Below,
];

/// Ring-shaped placeholder icon.
fn icon(size: usize) -> Bitmap {
    let mut bitmap = Bitmap::new(size, size);
    let center = size as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let d = (dx * dx + dy * dy).sqrt();
            if d < center && d > center * 0.6 {
                bitmap.accumulate(x, y, 255);
            }
        }
    }
    bitmap
}

#[allow(clippy::unwrap_used)]
fn main() {
    let mut font_storage = FontStorage::new();
    font_storage.load_system_fonts();
    assert!(
        !font_storage.is_empty(),
        "system fonts are required for this demo"
    );

    const FAMILIES: &[Family<'_>] = &[Family::SansSerif];
    let query = Query {
        families: FAMILIES,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let metrics = Arc::new(
        font_storage
            .metrics(&query, 2.0)
            .expect("no usable sans-serif font"),
    );

    let mut label: Composite<Bitmap, _> = Composite::new(Arc::clone(&metrics));
    label.set_text("Downloads and other things");
    label.set_max_text_length(Some(12));
    label.set_ellipsize_mode(EllipsizeMode::Middle);
    label.set_image(icon(40));
    label.set_gap(8).unwrap();
    label.set_padding(Padding::new_all_same(6)).unwrap();

    // One row per position, stacked vertically.
    let sizes: Vec<_> = POSITIONS
        .iter()
        .map(|&position| {
            label.set_position(position);
            label.intrinsic_size()
        })
        .collect();
    let width = sizes.iter().map(|s| s.width).max().unwrap_or(0);
    let height: i32 = sizes.iter().map(|s| s.height).sum();

    let mut surface =
        CpuSurface::new(width as usize, height as usize).with_font(Arc::clone(&metrics));

    let timer = std::time::Instant::now();
    let mut top = 0;
    for (position, size) in POSITIONS.into_iter().zip(&sizes) {
        label.set_position(position);
        let bounds = Rect::new(
            Point::new(0, top),
            Point::new(size.width, top + size.height),
        );
        println!("{position:?}: {size:?} -> {:?}", label.layout(bounds));
        label.render(&mut surface, bounds);
        surface.reset();
        top += size.height;
    }
    println!("Rendered in {:.2?}", timer.elapsed());

    let bitmap = surface.into_canvas();
    if bitmap.width == 0 || bitmap.height == 0 {
        println!("Bitmap is empty; nothing to write.");
        return;
    }

    std::fs::create_dir_all("debug").expect("failed to create debug directory");

    let img_buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(bitmap.width as u32, bitmap.height as u32, bitmap.data)
            .expect("bitmap dimensions must match pixel buffer length");

    img_buffer
        .save("debug/cpu_composite.png")
        .expect("failed to save debug image");

    println!("Saved debug image to debug/cpu_composite.png");
}
