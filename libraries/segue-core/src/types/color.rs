/// Palette colors carried by track metadata
use serde::{Deserialize, Serialize};

/// RGBA color with channels in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Rgba {
    /// Opaque black, the unknown-track color
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from raw channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Same color with every channel clamped into range
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// `#rrggbbaa` hex string
    pub fn to_hex(self) -> String {
        let c = self.clamped();
        let byte = |v: f32| (v * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(c.r),
            byte(c.g),
            byte(c.b),
            byte(c.a)
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The two colors a track paints the interface with
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Palette {
    /// `Color1` in the metadata document
    pub primary: Rgba,
    /// `Color2` in the metadata document
    pub secondary: Rgba,
}

impl Palette {
    /// Palette used when a track's metadata is missing
    pub const UNKNOWN: Self = Self {
        primary: Rgba::BLACK,
        secondary: Rgba::BLACK,
    };

    /// Create a palette
    pub const fn new(primary: Rgba, secondary: Rgba) -> Self {
        Self { primary, secondary }
    }
}
