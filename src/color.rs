//! Particle colors and the weighted palette they are drawn from

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An opaque RGB color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const HOT_PINK: Color = Color::rgb(0xFF, 0x69, 0xB4);
    pub const DEEP_PINK: Color = Color::rgb(0xFF, 0x14, 0x93);
    pub const PALE_ORANGE: Color = Color::rgb(0xFF, 0xAA, 0x77);
    pub const LIGHT_SALMON: Color = Color::rgb(0xFF, 0xA0, 0x7A);
    pub const SALMON: Color = Color::rgb(0xFF, 0x8C, 0x69);
    pub const LIGHT_PINK: Color = Color::rgb(0xFF, 0xB6, 0xC1);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS hex notation, e.g. `#FF69B4`
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_css()
    }
}

/// Colors to sample from uniformly by list position.
///
/// Repeating a color raises its sampling frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<Color>);

impl Palette {
    /// Hot pink and pale orange lead, each appearing three times
    pub fn hero() -> Self {
        Self(vec![
            Color::HOT_PINK,
            Color::HOT_PINK,
            Color::HOT_PINK,
            Color::DEEP_PINK,
            Color::PALE_ORANGE,
            Color::PALE_ORANGE,
            Color::PALE_ORANGE,
            Color::LIGHT_SALMON,
            Color::SALMON,
        ])
    }

    /// Softer mix used behind secondary sections
    pub fn ambient() -> Self {
        Self(vec![
            Color::HOT_PINK,
            Color::HOT_PINK,
            Color::DEEP_PINK,
            Color::PALE_ORANGE,
            Color::PALE_ORANGE,
            Color::LIGHT_SALMON,
            Color::SALMON,
            Color::LIGHT_PINK,
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick one entry uniformly. Returns white for an empty palette.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        if self.0.is_empty() {
            return Color::WHITE;
        }
        self.0[rng.random_range(0..self.0.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::hero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse_and_format() {
        let c = Color::from_hex("#ff69b4").unwrap();
        assert_eq!(c, Color::HOT_PINK);
        assert_eq!(c.to_css(), "#FF69B4");
        assert_eq!(Color::from_hex("FFAA77").unwrap(), Color::PALE_ORANGE);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("").is_err());
        // At most one leading '#'
        assert!(Color::from_hex("##FF69B4").is_err());
        // from_str_radix alone would accept a sign
        assert!(Color::from_hex("+F69B4").is_err());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Palette(vec![Color::SALMON])).unwrap();
        assert_eq!(json, "[\"#FF8C69\"]");
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, vec![Color::SALMON]);
        assert!(serde_json::from_str::<Color>("\"pink\"").is_err());
    }

    #[test]
    fn test_sampling_follows_weights() {
        let palette = Palette::hero();
        let mut rng = Pcg32::seed_from_u64(7);
        let draws = 9000;
        let pinks = (0..draws)
            .filter(|_| palette.sample(&mut rng) == Color::HOT_PINK)
            .count();
        // Three of nine entries: expect roughly one third
        let share = pinks as f32 / draws as f32;
        assert!((share - 1.0 / 3.0).abs() < 0.03, "share was {}", share);
    }

    #[test]
    fn test_empty_palette_samples_white() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(Palette(Vec::new()).sample(&mut rng), Color::WHITE);
    }
}
