//! Deterministic hue hashing and gradient rendering.

use serde::Serialize;

const DEFAULT_LIGHTNESS: f32 = 0.6;
const DEFAULT_CHROMA: f32 = 0.2;
const DEFAULT_ANGLE: u16 = 90;

/// Two hues derived from an identifier, always visibly apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HuePair {
    /// In `0..=360`; 360 is kept as-is rather than folded onto 0.
    pub hue1: u16,
    /// In `0..360`, offset from `hue1` by 60 to 300 degrees.
    pub hue2: u16,
}

/// Hash an identifier into a [`HuePair`].
///
/// Rolling `acc * 31 + unit` over UTF-16 code units with 32-bit wrapping.
pub fn hue_hash(identifier: &str) -> HuePair {
    let acc = identifier.encode_utf16().fold(0i32, |acc, unit| {
        (acc << 5).wrapping_sub(acc).wrapping_add(i32::from(unit))
    });

    // Modulus 361 is load-bearing for output compatibility.
    let hue1 = acc.unsigned_abs() % 361;
    let offset = (acc >> 8).unsigned_abs() % 9 + 2;
    let hue2 = (hue1 + offset * 30) % 360;

    HuePair {
        hue1: hue1 as u16,
        hue2: hue2 as u16,
    }
}

/// Fixed lightness/chroma/angle used to turn hues into a CSS gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub lightness: f32,
    pub chroma: f32,
    pub angle: u16,
}

impl Palette {
    /// A single `oklch(...)` color stop at the given hue.
    pub fn stop(&self, hue: u16) -> String {
        format!("oklch({} {} {})", self.lightness, self.chroma, hue)
    }

    /// Two-stop linear gradient for a hue pair.
    pub fn gradient(&self, pair: HuePair) -> String {
        format!(
            "linear-gradient({}deg, {}, {})",
            self.angle,
            self.stop(pair.hue1),
            self.stop(pair.hue2)
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            lightness: DEFAULT_LIGHTNESS,
            chroma: DEFAULT_CHROMA,
            angle: DEFAULT_ANGLE,
        }
    }
}

/// Gradient for two hues using the default palette.
pub fn gradient_for(hue1: u16, hue2: u16) -> String {
    Palette::default().gradient(HuePair { hue1, hue2 })
}
