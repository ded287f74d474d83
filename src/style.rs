//! Tile colouring.
//!
//! Tiles share one hue; only lightness changes with the value, darkening by
//! 9% per doubling. Text flips to light once the background goes dark.

use serde::Serialize;

/// Lightness, in percent, for a tile's background and label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileStyle {
    pub bg_lightness: f64,
    pub text_lightness: f64,
}

impl TileStyle {
    /// ```
    /// use play_2048::style::TileStyle;
    /// assert_eq!(TileStyle::for_value(2).bg_lightness, 91.0);
    /// assert_eq!(TileStyle::for_value(2048).bg_lightness, 1.0);
    /// ```
    pub fn for_value(value: u32) -> Self {
        let bg_lightness = 100.0 - f64::from(value.max(1)).log2() * 9.0;
        let text_lightness = if bg_lightness < 50.0 { 90.0 } else { 10.0 };
        TileStyle { bg_lightness, text_lightness }
    }

    /// Background as an 8-bit grey level, for front-ends without HSL.
    pub fn bg_grey(&self) -> u8 { to_grey(self.bg_lightness) }

    pub fn text_grey(&self) -> u8 { to_grey(self.text_lightness) }
}

fn to_grey(lightness: f64) -> u8 {
    (lightness.clamp(0.0, 100.0) * 255.0 / 100.0).round() as u8
}
