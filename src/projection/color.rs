//! Per-label display colors.
//!
//! Colors are handed out in label arrival order by stepping the hue wheel by
//! the golden angle, which keeps consecutive labels visually far apart. The
//! starting hue is random per map, so colors differ between result sets.

use rand::Rng;
use std::collections::HashMap;

const GOLDEN_ANGLE: f64 = 137.507_764_050_037_85;
const SATURATION: f64 = 0.65;
const LIGHTNESS: f64 = 0.55;

/// Label → color assignments for one projection pass.
#[derive(Debug, Clone)]
pub struct LabelColors {
    assigned: HashMap<String, String>,
    next_hue: f64,
}

impl LabelColors {
    /// Creates an empty map with a random starting hue.
    pub fn new() -> Self {
        Self::with_start_hue(rand::thread_rng().gen_range(0.0..360.0))
    }

    /// Creates an empty map whose first color uses `hue` (degrees).
    pub fn with_start_hue(hue: f64) -> Self {
        Self {
            assigned: HashMap::new(),
            next_hue: hue.rem_euclid(360.0),
        }
    }

    /// Returns the label's color, assigning the next unused one on first sight.
    pub fn color_for(&mut self, label: &str) -> String {
        if let Some(color) = self.assigned.get(label) {
            return color.clone();
        }

        let color = hsl_to_hex(self.next_hue, SATURATION, LIGHTNESS);
        self.next_hue = (self.next_hue + GOLDEN_ANGLE).rem_euclid(360.0);
        self.assigned.insert(label.to_string(), color.clone());
        color
    }

    /// Number of labels seen so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Default for LabelColors {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts HSL (hue in degrees, saturation and lightness in 0..=1) to `#rrggbb`.
fn hsl_to_hex(hue: f64, saturation: f64, lightness: f64) -> String {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}
