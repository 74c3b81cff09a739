use std::{collections::HashMap, path::PathBuf, sync::Arc};

use fxhash::FxBuildHasher;
use parking_lot::Mutex;

use crate::{
    error::{LayoutError, Result},
    text::{FontMetrics, TextMetrics},
};

/// Sizes are quantized to this many steps per pixel for cache keys.
pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Size in pixels as an integer cache key.
pub(crate) fn quantize(px: f32) -> u32 {
    (px * SUB_PIXEL_QUANTIZE).round() as u32
}

fn font_settings(collection_index: u32) -> fontdue::FontSettings {
    fontdue::FontSettings {
        collection_index,
        scale: 40.0,
        load_substitutions: true,
    }
}

/// Font database plus the fontdue faces loaded from it so far.
///
/// Faces are parsed lazily, the first time [`FontStorage::font`] asks for
/// them.
pub struct FontStorage {
    font_db: fontdb::Database,
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> std::result::Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of known faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Returns an iterator over all available faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Finds the best face for `query` and loads it.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
        let id = self.font_db.query(query)?;
        self.font(id).map(|font| (id, font))
    }

    /// Retrieves a loaded font by ID, loading it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(data, font_settings(index))
                })?;

                match font_result {
                    Ok(font) => Some(Arc::clone(entry.insert(Arc::new(font)))),
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }

    /// Metrics provider for the best face matching `query`.
    pub fn metrics(&mut self, query: &fontdb::Query, scale: f32) -> Option<FontdueMetrics> {
        self.query(query)
            .map(|(_, font)| FontdueMetrics::new(font, scale))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct AdvanceKey {
    ch: char,
    px: u32,
}

/// [`TextMetrics`] backed by a single fontdue face.
///
/// `scale` converts the composite's logical text size into pixels, so a
/// host with a 2x display passes `2.0` and keeps its sizes logical.
/// Advance widths are cached per character and pixel size.
pub struct FontdueMetrics {
    font: Arc<fontdue::Font>,
    scale: f32,
    advances: Mutex<HashMap<AdvanceKey, f32, FxBuildHasher>>,
}

impl FontdueMetrics {
    /// Wraps an already loaded face.
    pub fn new(font: Arc<fontdue::Font>, scale: f32) -> Self {
        Self {
            font,
            scale,
            advances: Mutex::new(HashMap::with_hasher(FxBuildHasher::default())),
        }
    }

    /// Parses a font file and wraps it.
    pub fn from_bytes(data: &[u8], scale: f32) -> Result<Self> {
        let font = fontdue::Font::from_bytes(data, font_settings(0)).map_err(|e| {
            log::error!("Failed to parse font: {e}");
            LayoutError::FontLoad(e.to_string())
        })?;
        Ok(Self::new(Arc::new(font), scale))
    }

    /// The face used for measuring.
    pub fn font(&self) -> &Arc<fontdue::Font> {
        &self.font
    }

    /// Logical-to-pixel factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pixel size used for a logical text size.
    pub fn pixel_size(&self, size: f32) -> f32 {
        size * self.scale
    }

    fn advance(&self, ch: char, px: f32) -> f32 {
        let key = AdvanceKey {
            ch,
            px: quantize(px),
        };
        *self
            .advances
            .lock()
            .entry(key)
            .or_insert_with(|| self.font.metrics(ch, px).advance_width)
    }

    /// Drops the cached advance widths.
    pub fn clear_cache(&self) {
        self.advances.lock().clear();
    }
}

impl TextMetrics for FontdueMetrics {
    fn measure_width(&self, text: &str, size: f32) -> f32 {
        let px = self.pixel_size(size);
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|left| self.font.horizontal_kern(left, ch, px)) {
                width += kern;
            }
            width += self.advance(ch, px);
            prev = Some(ch);
        }
        width
    }

    fn font_metrics(&self, size: f32) -> FontMetrics {
        let px = self.pixel_size(size);
        match self.font.horizontal_line_metrics(px) {
            // fontdue measures upwards; flip into y-down space.
            Some(line) => FontMetrics {
                ascent: -line.ascent,
                descent: -line.descent,
                leading: line.line_gap,
            },
            None => {
                log::warn!("font has no horizontal line metrics, using the em box");
                FontMetrics {
                    ascent: -px,
                    descent: 0.0,
                    leading: 0.0,
                }
            }
        }
    }
}
