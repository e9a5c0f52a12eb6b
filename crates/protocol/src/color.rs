use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::ThemeToken;

/// A concrete 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

/// A color as requested by a color map or the figure chrome.
///
/// Cycle and theme colors stay symbolic until a renderer resolves them
/// against a [`Palette`](crate::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Slot `n` of the palette's color cycle (`"C0"`, `"C1"`, ...).
    Cycle(u8),
    /// An explicit color.
    Rgba(Rgba),
    /// A figure-chrome color from the active theme.
    Theme(ThemeToken),
}

impl Color {
    pub const BLACK: Color = Color::Rgba(Rgba::BLACK);
    pub const WHITE: Color = Color::Rgba(Rgba::WHITE);
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Color::Rgba(rgba)
    }
}

impl From<ThemeToken> for Color {
    fn from(token: ThemeToken) -> Self {
        Color::Theme(token)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Cycle(n) => write!(f, "C{n}"),
            Color::Rgba(rgba) => f.write_str(&rgba.to_hex()),
            Color::Theme(token) => write!(f, "{token:?}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid color cycle reference: {0}")]
    InvalidCycle(String),
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `C<n>`, `#rrggbb`, `#rrggbbaa` and a handful of names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return Rgba::from_hex(hex)
                .map(Color::Rgba)
                .ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        if let Some(index) = s.strip_prefix('C') {
            return index
                .parse::<u8>()
                .map(Color::Cycle)
                .map_err(|_| ColorParseError::InvalidCycle(s.to_string()));
        }
        let rgba = match s.to_ascii_lowercase().as_str() {
            "black" | "k" => Rgba::BLACK,
            "white" | "w" => Rgba::WHITE,
            "gray" | "grey" => Rgba::rgb(0x80, 0x80, 0x80),
            "red" | "r" => Rgba::rgb(0xff, 0x00, 0x00),
            "green" | "g" => Rgba::rgb(0x00, 0x80, 0x00),
            "blue" | "b" => Rgba::rgb(0x00, 0x00, 0xff),
            "orange" => Rgba::rgb(0xff, 0xa5, 0x00),
            "purple" => Rgba::rgb(0x80, 0x00, 0x80),
            _ => return Err(ColorParseError::UnknownName(s.to_string())),
        };
        Ok(Color::Rgba(rgba))
    }
}
