use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SegmentKey;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Line colours for the (real, predicted) chart series.
pub fn series_colors() -> (Color32, Color32) {
    let palette = generate_palette(2, 210.0);
    match palette.as_slice() {
        [actual, predicted] => (*actual, *predicted),
        _ => (Color32::LIGHT_BLUE, Color32::ORANGE),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: segment → Color32
// ---------------------------------------------------------------------------

/// Maps each metric segment to a distinct swatch colour.
#[derive(Debug, Clone, Default)]
pub struct SegmentColors {
    mapping: BTreeMap<SegmentKey, Color32>,
}

impl SegmentColors {
    /// Build the map from the segments in the order they are given.
    pub fn new<'a>(segments: impl IntoIterator<Item = &'a SegmentKey>) -> Self {
        let mut unique: Vec<&SegmentKey> = Vec::new();
        for s in segments {
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        let palette = generate_palette(unique.len(), 0.0);
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(s, c)| (s.clone(), c))
            .collect();
        SegmentColors { mapping }
    }

    /// Look up the colour for a segment; grey for unknown ones.
    pub fn color_for(&self, segment: &SegmentKey) -> Color32 {
        self.mapping.get(segment).copied().unwrap_or(Color32::GRAY)
    }
}
