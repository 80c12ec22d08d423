mod colors;
mod config;
mod error;
mod help;
mod palette;
mod scene;
mod settings;
mod surface;
mod terminal;
mod tree;
mod view;

use clap::{Args, Parser, Subcommand, ValueEnum};
use config::{check_margin, DrawMode, TreeConfig};
use error::{Error, Result};
use palette::PaletteBook;
use scene::{draw_scene, DEFAULT_MARGIN};
use settings::Settings;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use surface::braille::BrailleCanvas;
use surface::pixels::PixelCanvas;
use surface::svg::SvgCanvas;
use surface::Plotter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fractree")]
#[command(version = "0.1.0")]
#[command(about = "Seeded fractal trees in the terminal, as SVG or as PNG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Tree parameters; anything left out comes from the settings file, then the defaults
#[derive(Args, Default)]
struct TreeArgs {
    /// Recursion depth (0-18)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Branching angle in degrees
    #[arg(short, long)]
    angle: Option<f64>,

    /// Trunk length in logical units
    #[arg(short, long)]
    length: Option<f64>,

    /// Length multiplier per level (0.3-0.95)
    #[arg(long)]
    shrink: Option<f64>,

    /// Trunk thickness
    #[arg(short, long)]
    thickness: Option<f64>,

    /// Thickness multiplier per level
    #[arg(long)]
    decay: Option<f64>,

    /// Jitter on angles and lengths (0-1)
    #[arg(short, long)]
    randomness: Option<f64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Palette name (see `fractree palettes`)
    #[arg(short, long)]
    palette: Option<String>,

    /// Line strokes or square stamps
    #[arg(short, long, value_enum)]
    mode: Option<DrawMode>,

    /// Logical padding around the tree
    #[arg(long)]
    margin: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive viewer (press ? for keys)
    View {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print the tree once to stdout in braille characters
    Print {
        #[command(flatten)]
        tree: TreeArgs,

        /// Width in terminal cells (defaults to the terminal width)
        #[arg(long)]
        width: Option<u16>,

        /// Height in terminal cells (defaults to the terminal height)
        #[arg(long)]
        height: Option<u16>,
    },

    /// Write the tree to an SVG or PNG file
    Export {
        /// Output file
        path: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,

        /// Output format; taken from the file extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Image width in pixels
        #[arg(long, default_value = "980")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "640")]
        height: u32,
    },

    /// Print the estimated bounding box and node counts
    Bounds {
        #[command(flatten)]
        tree: TreeArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the available palettes
    Palettes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(Error::UnknownFormat(path.display().to_string())),
        }
    }
}

impl TreeArgs {
    /// Flags over settings over defaults, validated
    fn resolve(&self, settings: &Settings) -> Result<(TreeConfig, f64)> {
        let base = settings.tree.base_config();
        let cfg = TreeConfig {
            depth: self.depth.unwrap_or(base.depth),
            angle_deg: self.angle.unwrap_or(base.angle_deg),
            trunk_length: self.length.unwrap_or(base.trunk_length),
            shrink: self.shrink.unwrap_or(base.shrink),
            thickness: self.thickness.unwrap_or(base.thickness),
            thickness_decay: self.decay.unwrap_or(base.thickness_decay),
            randomness: self.randomness.unwrap_or(base.randomness),
            seed: self.seed.unwrap_or(base.seed),
            palette_name: self.palette.clone().unwrap_or(base.palette_name),
            draw_mode: self.mode.unwrap_or(base.draw_mode),
        };
        cfg.validate()?;

        let margin = check_margin(self.margin.or(settings.tree.margin).unwrap_or(DEFAULT_MARGIN))?;
        Ok((cfg, margin))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn export(cfg: &TreeConfig, palettes: &PaletteBook, margin: f64, path: PathBuf, format: ExportFormat, size: (u32, u32)) -> Result<()> {
    let (width, height) = size;
    match format {
        ExportFormat::Svg => {
            let mut plotter = Plotter::new(SvgCanvas::new(width, height).save_to(path));
            draw_scene(cfg, palettes, &mut plotter, margin)?;
        }
        ExportFormat::Png => {
            let mut plotter = Plotter::new(PixelCanvas::new(width, height).save_to(path));
            draw_scene(cfg, palettes, &mut plotter, margin)?;
        }
    }
    Ok(())
}

fn print(cfg: &TreeConfig, palettes: &PaletteBook, margin: f64, width: Option<u16>, height: Option<u16>) -> Result<()> {
    let (term_w, term_h) = crossterm::terminal::size().unwrap_or((80, 24));
    // keep the shell prompt on screen
    let cols = width.unwrap_or(term_w);
    let rows = height.unwrap_or(term_h.saturating_sub(1));

    let mut plotter = Plotter::new(BrailleCanvas::new(cols, rows));
    draw_scene(cfg, palettes, &mut plotter, margin)?;
    plotter.canvas().write_ansi(&mut io::stdout().lock())?;
    Ok(())
}

fn bounds(cfg: &TreeConfig, palettes: &PaletteBook, json: bool) -> Result<()> {
    let bbox = tree::estimate_bounds(cfg, palettes);
    let census = tree::census(cfg, palettes.get(&cfg.palette_name));

    let mut out = io::stdout().lock();
    if json {
        let doc = serde_json::json!({ "bbox": bbox, "census": census });
        writeln!(out, "{doc}")?;
    } else {
        writeln!(out, "x: {:.3} .. {:.3}", bbox.minx, bbox.maxx)?;
        writeln!(out, "y: {:.3} .. {:.3}", bbox.miny, bbox.maxy)?;
        writeln!(out, "size: {:.3} x {:.3}", bbox.width(), bbox.height())?;
        writeln!(out, "branches: {}, leaves: {}", census.branches, census.leaves)?;
    }
    Ok(())
}

fn list_palettes(palettes: &PaletteBook) -> Result<()> {
    let mut out = io::stdout().lock();
    for name in palettes.names() {
        let p = palettes.get(name);
        let leaves: Vec<String> = p.leaf_colors.iter().map(ToString::to_string).collect();
        writeln!(out, "{:<12} trunk {}  leaves {}  background {}", p.name, p.trunk_color, leaves.join(" "), p.background)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();
    let palettes = PaletteBook::with_user_palettes(settings.palettes.iter().cloned());

    match cli.command {
        Commands::View { tree } => {
            let (cfg, margin) = tree.resolve(&settings)?;
            view::run(cfg, &palettes, margin)
        }
        Commands::Print { tree, width, height } => {
            let (cfg, margin) = tree.resolve(&settings)?;
            print(&cfg, &palettes, margin, width, height)
        }
        Commands::Export { path, tree, format, width, height } => {
            let (cfg, margin) = tree.resolve(&settings)?;
            let format = match format {
                Some(f) => f,
                None => ExportFormat::from_path(&path)?,
            };
            export(&cfg, &palettes, margin, path, format, (width, height))
        }
        Commands::Bounds { tree, json } => {
            let (cfg, _) = tree.resolve(&settings)?;
            bounds(&cfg, &palettes, json)
        }
        Commands::Palettes => list_palettes(&palettes),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fractree: {e}");
            ExitCode::FAILURE
        }
    }
}
