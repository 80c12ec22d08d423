//! Palette table: built-in color sets plus user palettes from settings.

use crate::colors::Rgb;
use serde::Deserialize;

pub const DEFAULT_PALETTE: &str = "Classic";

/// Colors for one tree: trunk, leaves (never empty) and background
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Palette {
    pub name: String,
    #[serde(rename = "trunk")]
    pub trunk_color: Rgb,
    #[serde(rename = "leaves")]
    pub leaf_colors: Vec<Rgb>,
    pub background: Rgb,
}

impl Palette {
    fn builtin(name: &str, trunk: &str, leaves: [&str; 3], background: &str) -> Self {
        Self {
            name: name.to_string(),
            trunk_color: Rgb::hex(trunk),
            leaf_colors: leaves.iter().map(|c| Rgb::hex(c)).collect(),
            background: Rgb::hex(background),
        }
    }
}

/// Read-only palette lookup handed to the tree engine
#[derive(Clone, Debug)]
pub struct PaletteBook {
    palettes: Vec<Palette>,
}

impl Default for PaletteBook {
    fn default() -> Self {
        Self {
            palettes: vec![
                Palette::builtin("Classic", "#8b5a2b", ["#2ecc71", "#27ae60", "#1abc9c"], "#0b1020"),
                Palette::builtin("Sakura", "#6d4c41", ["#ffb7c5", "#ffd1dc", "#ffc0cb"], "#0f0f14"),
                Palette::builtin("Winter", "#7f8c8d", ["#ecf0f1", "#dfe6e9", "#bdc3c7"], "#0b1220"),
                Palette::builtin("Neon", "#9b59b6", ["#00f5ff", "#00ff85", "#ffe600"], "#05050a"),
            ],
        }
    }
}

impl PaletteBook {
    /// Built-ins extended with `extra`; a user palette replaces a built-in of the same name.
    /// Palettes without leaf colors are skipped.
    pub fn with_user_palettes(extra: impl IntoIterator<Item = Palette>) -> Self {
        let mut book = Self::default();
        for palette in extra {
            if palette.leaf_colors.is_empty() {
                tracing::warn!(palette = %palette.name, "palette has no leaf colors, ignoring");
                continue;
            }
            match book.palettes.iter_mut().find(|p| p.name == palette.name) {
                Some(slot) => *slot = palette,
                None => book.palettes.push(palette),
            }
        }
        book
    }

    /// Look up by name, falling back to Classic
    pub fn get(&self, name: &str) -> &Palette {
        self.palettes
            .iter()
            .find(|p| p.name == name)
            .or_else(|| {
                tracing::debug!(name, "unknown palette, using {}", DEFAULT_PALETTE);
                self.palettes.iter().find(|p| p.name == DEFAULT_PALETTE)
            })
            .unwrap_or(&self.palettes[0])
    }

    pub fn names(&self) -> Vec<&str> {
        self.palettes.iter().map(|p| p.name.as_str()).collect()
    }

    /// Name of the palette after `name`, wrapping around
    pub fn next_name(&self, name: &str) -> &str {
        let idx = self.palettes.iter().position(|p| p.name == name).map_or(0, |i| i + 1);
        &self.palettes[idx % self.palettes.len()].name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_in_order() {
        let book = PaletteBook::default();
        assert_eq!(book.names(), vec!["Classic", "Sakura", "Winter", "Neon"]);
    }

    #[test]
    fn unknown_name_falls_back_to_classic() {
        let book = PaletteBook::default();
        assert_eq!(book.get("Nope").name, "Classic");
        assert_eq!(book.get("Neon").trunk_color, Rgb::hex("#9b59b6"));
    }

    #[test]
    fn user_palette_overrides_and_extends() {
        let autumn = Palette {
            name: "Autumn".into(),
            trunk_color: Rgb::hex("#5d4037"),
            leaf_colors: vec![Rgb::hex("#ff7043")],
            background: Rgb::hex("#101010"),
        };
        let classic = Palette { name: "Classic".into(), ..autumn.clone() };
        let empty = Palette { name: "Empty".into(), leaf_colors: vec![], ..autumn.clone() };

        let book = PaletteBook::with_user_palettes([autumn, classic, empty]);
        assert_eq!(book.names(), vec!["Classic", "Sakura", "Winter", "Neon", "Autumn"]);
        assert_eq!(book.get("Classic").trunk_color, Rgb::hex("#5d4037"));
        assert_eq!(book.get("Empty").name, "Classic");
    }

    #[test]
    fn next_name_wraps() {
        let book = PaletteBook::default();
        assert_eq!(book.next_name("Classic"), "Sakura");
        assert_eq!(book.next_name("Neon"), "Classic");
        assert_eq!(book.next_name("missing"), "Classic");
    }
}
