use crate::config::{DrawMode, TreeConfig};
use crate::palette::Palette;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tree: TreeDefaults,
    #[serde(default, rename = "palette")]
    pub palettes: Vec<Palette>,
}

/// `[tree]` table: defaults for flags not given on the command line
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDefaults {
    pub depth: Option<u32>,
    pub angle: Option<f64>,
    pub length: Option<f64>,
    pub shrink: Option<f64>,
    pub thickness: Option<f64>,
    pub decay: Option<f64>,
    pub randomness: Option<f64>,
    pub seed: Option<u64>,
    pub palette: Option<String>,
    pub mode: Option<DrawMode>,
    pub margin: Option<f64>,
}

impl TreeDefaults {
    /// Built-in defaults with the file's values layered on top
    pub fn base_config(&self) -> TreeConfig {
        let d = TreeConfig::default();
        TreeConfig {
            depth: self.depth.unwrap_or(d.depth),
            angle_deg: self.angle.unwrap_or(d.angle_deg),
            trunk_length: self.length.unwrap_or(d.trunk_length),
            shrink: self.shrink.unwrap_or(d.shrink),
            thickness: self.thickness.unwrap_or(d.thickness),
            thickness_decay: self.decay.unwrap_or(d.thickness_decay),
            randomness: self.randomness.unwrap_or(d.randomness),
            seed: self.seed.unwrap_or(d.seed),
            palette_name: self.palette.clone().unwrap_or(d.palette_name),
            draw_mode: self.mode.unwrap_or(d.draw_mode),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable files give defaults; malformed ones are reported and ignored
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fractree")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgb;

    #[test]
    fn empty_file_is_default() {
        let s = Settings::parse("").unwrap();
        assert_eq!(s.tree.base_config(), TreeConfig::default());
        assert!(s.palettes.is_empty());
    }

    #[test]
    fn tree_table_overrides_defaults() {
        let s = Settings::parse(
            r#"
            [tree]
            depth = 12
            angle = 30.5
            mode = "square"
            palette = "Neon"
            "#,
        )
        .unwrap();
        let cfg = s.tree.base_config();
        assert_eq!(cfg.depth, 12);
        assert_eq!(cfg.angle_deg, 30.5);
        assert_eq!(cfg.draw_mode, DrawMode::Square);
        assert_eq!(cfg.palette_name, "Neon");
        assert_eq!(cfg.shrink, TreeConfig::default().shrink);
    }

    #[test]
    fn user_palettes() {
        let s = Settings::parse(
            r##"
            [[palette]]
            name = "Autumn"
            trunk = "#5d4037"
            leaves = ["#ff7043", "#ffca28"]
            background = "#101010"
            "##,
        )
        .unwrap();
        assert_eq!(s.palettes.len(), 1);
        assert_eq!(s.palettes[0].trunk_color, Rgb::hex("#5d4037"));
        assert_eq!(s.palettes[0].leaf_colors.len(), 2);
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = Settings::parse(
            r##"
            [[palette]]
            name = "Bad"
            trunk = "brown"
            leaves = ["#ff7043"]
            background = "#101010"
            "##,
        );
        assert!(err.is_err());
    }

    #[test]
    fn unknown_tree_key_is_an_error() {
        assert!(Settings::parse("[tree]\ndepht = 3\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = Settings::load_from(Path::new("/nonexistent/fractree/config.toml"));
        assert!(s.tree.depth.is_none());
    }
}
