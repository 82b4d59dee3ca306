use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::AgeGroup;

/// Outline drawn around every bubble.
pub const MARKER_OUTLINE: &str = "DarkSlateGrey";

/// Fallback for anything not in a map.
const DEFAULT_COLOR: &str = "#808080";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, as
/// `#rrggbb` strings the renderer understands.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: age group → colour
// ---------------------------------------------------------------------------

/// Assigns each age group a fixed colour, so a bucket keeps its colour no
/// matter which other buckets are present after filtering.
#[derive(Debug, Clone)]
pub struct AgeGroupColors {
    mapping: BTreeMap<AgeGroup, String>,
}

impl Default for AgeGroupColors {
    fn default() -> Self {
        let mapping = AgeGroup::ALL
            .iter()
            .copied()
            .zip(generate_palette(AgeGroup::ALL.len()))
            .collect();
        AgeGroupColors { mapping }
    }
}

impl AgeGroupColors {
    /// Look up the colour for a given age group.
    pub fn color_for(&self, group: AgeGroup) -> &str {
        self.mapping
            .get(&group)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR)
    }
}
