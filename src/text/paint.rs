use palette::Srgba;

/// Default text size in logical units.
pub const DEFAULT_TEXT_SIZE: f32 = 14.0;

/// Color transform applied to the text on top of its own color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorFilter {
    /// Replaces the text color, keeping the text alpha.
    Tint(Srgba<u8>),
    /// Multiplies each channel by the given color.
    Modulate(Srgba<u8>),
}

impl ColorFilter {
    pub fn apply(&self, color: Srgba<u8>) -> Srgba<u8> {
        match *self {
            ColorFilter::Tint(tint) => Srgba::new(tint.red, tint.green, tint.blue, color.alpha),
            ColorFilter::Modulate(m) => Srgba::new(
                mul_u8(color.red, m.red),
                mul_u8(color.green, m.green),
                mul_u8(color.blue, m.blue),
                mul_u8(color.alpha, m.alpha),
            ),
        }
    }
}

fn mul_u8(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

/// Paint state of the text, owned by exactly one composite.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPaint {
    pub size: f32,
    pub color: Srgba<u8>,
    pub alpha: u8,
    pub color_filter: Option<ColorFilter>,
}

impl Default for TextPaint {
    fn default() -> Self {
        Self {
            size: DEFAULT_TEXT_SIZE,
            color: Srgba::new(0, 0, 0, 255),
            alpha: 255,
            color_filter: None,
        }
    }
}

impl TextPaint {
    /// The color glyphs are actually filled with: filter applied, then the
    /// paint alpha folded in.
    pub fn effective_color(&self) -> Srgba<u8> {
        let color = match &self.color_filter {
            Some(filter) => filter.apply(self.color),
            None => self.color,
        };
        Srgba::new(
            color.red,
            color.green,
            color.blue,
            mul_u8(color.alpha, self.alpha),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_color_folds_filter_and_alpha() {
        let mut paint = TextPaint {
            color: Srgba::new(200, 100, 50, 255),
            ..Default::default()
        };
        assert_eq!(paint.effective_color(), Srgba::new(200, 100, 50, 255));

        paint.alpha = 0;
        assert_eq!(paint.effective_color().alpha, 0);

        paint.alpha = 255;
        paint.color_filter = Some(ColorFilter::Tint(Srgba::new(1, 2, 3, 9)));
        assert_eq!(paint.effective_color(), Srgba::new(1, 2, 3, 255));

        paint.color_filter = Some(ColorFilter::Modulate(Srgba::new(255, 0, 255, 255)));
        assert_eq!(paint.effective_color(), Srgba::new(200, 0, 50, 255));
    }
}
