use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    generate_palette_with(n, 0.75, 0.55)
}

/// Like [`generate_palette`] with explicit saturation and lightness.
pub fn generate_palette_with(n: usize, saturation: f32, lightness: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, saturation, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Label colours
// ---------------------------------------------------------------------------

/// Stable colour per sentiment label, shared by every chart.
#[derive(Debug, Clone)]
pub struct LabelColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl LabelColors {
    /// Assign hues to labels in the order given.
    pub fn new(labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();

        LabelColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Word colours
// ---------------------------------------------------------------------------

/// Dark, saturated hues that stay readable on a white canvas.
#[derive(Debug, Clone)]
pub struct WordPalette {
    colors: Vec<Color32>,
}

impl Default for WordPalette {
    fn default() -> Self {
        Self {
            colors: generate_palette_with(9, 0.65, 0.35),
        }
    }
}

impl WordPalette {
    /// Colour for the word at frequency rank `rank`.
    pub fn color_for_rank(&self, rank: usize) -> Color32 {
        self.colors[rank % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_distinct_colours() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn label_colours_are_stable_and_default_for_unknown() {
        let labels = vec!["negatif".to_string(), "positif".to_string()];
        let colors = LabelColors::new(&labels);
        assert_eq!(colors.color_for("negatif"), LabelColors::new(&labels).color_for("negatif"));
        assert_ne!(colors.color_for("negatif"), colors.color_for("positif"));
        assert_eq!(colors.color_for("lainnya"), Color32::GRAY);
    }

    #[test]
    fn word_palette_cycles() {
        let palette = WordPalette::default();
        assert_eq!(palette.color_for_rank(0), palette.color_for_rank(9));
    }
}
