use crossterm::style::Color;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 24-bit color, written as `#rrggbb` in palettes and settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color `{0}` (expected #rrggbb)")]
pub struct ColorParseError(pub String);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex literal; panics on malformed input, so only use on constants
    pub const fn hex(s: &str) -> Self {
        let b = s.as_bytes();
        assert!(b.len() == 7 && b[0] == b'#');
        Self {
            r: hex_byte(b[1], b[2]),
            g: hex_byte(b[3], b[4]),
            b: hex_byte(b[5], b[6]),
        }
    }

    pub fn to_terminal(self) -> Color {
        Color::Rgb { r: self.r, g: self.g, b: self.b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("bad hex digit"),
    }
}

const fn hex_byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#8b5a2b".parse::<Rgb>(), Ok(Rgb::new(0x8b, 0x5a, 0x2b)));
        assert_eq!("#FFFFFF".parse::<Rgb>(), Ok(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::hex("#0b1020"), Rgb::new(0x0b, 0x10, 0x20));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("8b5a2b".parse::<Rgb>().is_err());
        assert!("#8b5a2".parse::<Rgb>().is_err());
        assert!("#zz5a2b".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let c = Rgb::new(0x1a, 0xbc, 0x9c);
        assert_eq!(c.to_string(), "#1abc9c");
        assert_eq!(c.to_string().parse::<Rgb>(), Ok(c));
    }
}
