//! Interactive terminal viewer: edit parameters with keys, redraw on change.

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::help::{show_help_modal, VIEW_HELP};
use crate::palette::PaletteBook;
use crate::scene::draw_scene;
use crate::surface::braille::BrailleCanvas;
use crate::surface::Plotter;
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the event loop should do after a key
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Redraw,
    Clear,
    /// Only the status line changed
    Status,
    Help,
    Quit,
    Ignore,
}

pub struct ViewState {
    pub cfg: TreeConfig,
    pub status: String,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl ViewState {
    pub fn new(cfg: TreeConfig) -> Self {
        let mut state = Self { cfg, status: String::new() };
        state.status = state.summary();
        state
    }

    pub fn summary(&self) -> String {
        let c = &self.cfg;
        format!(
            "depth {}  angle {:.0}  len {:.0}  shrink {:.2}  thick {:.1}  decay {:.2}  rand {:.2}  seed {}  {}  {:?}   ? help",
            c.depth,
            c.angle_deg,
            c.trunk_length,
            c.shrink,
            c.thickness,
            c.thickness_decay,
            c.randomness,
            c.seed,
            c.palette_name,
            c.draw_mode
        )
    }

    /// Apply an edit if the result passes validation; otherwise keep the old config
    fn edit(&mut self, f: impl FnOnce(&mut TreeConfig)) -> Action {
        let mut next = self.cfg.clone();
        f(&mut next);
        match next.checked() {
            Ok(cfg) => {
                self.cfg = cfg;
                self.status = self.summary();
                Action::Redraw
            }
            Err(e) => {
                self.status = e.to_string();
                Action::Status
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, palettes: &PaletteBook, rng: &mut impl Rng) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Enter => Action::Redraw,
            KeyCode::Char('c') => {
                self.status = "cleared (Enter to redraw)".to_string();
                Action::Clear
            }
            KeyCode::Char('d') => self.edit(|c| c.depth = c.depth.saturating_sub(1)),
            KeyCode::Char('D') => self.edit(|c| c.depth += 1),
            KeyCode::Char('a') => self.edit(|c| c.angle_deg -= 1.0),
            KeyCode::Char('A') => self.edit(|c| c.angle_deg += 1.0),
            KeyCode::Char('l') => self.edit(|c| c.trunk_length -= 5.0),
            KeyCode::Char('L') => self.edit(|c| c.trunk_length += 5.0),
            KeyCode::Char('s') => self.edit(|c| c.shrink = round2(c.shrink - 0.01)),
            KeyCode::Char('S') => self.edit(|c| c.shrink = round2(c.shrink + 0.01)),
            KeyCode::Char('t') => self.edit(|c| c.thickness = (c.thickness - 1.0).max(0.5)),
            KeyCode::Char('T') => self.edit(|c| c.thickness += 1.0),
            KeyCode::Char('y') => self.edit(|c| c.thickness_decay = round2(c.thickness_decay - 0.01)),
            KeyCode::Char('Y') => self.edit(|c| c.thickness_decay = round2(c.thickness_decay + 0.01)),
            KeyCode::Char('r') => self.edit(|c| c.randomness = round2(c.randomness - 0.05)),
            KeyCode::Char('R') => self.edit(|c| c.randomness = round2(c.randomness + 0.05)),
            KeyCode::Char('n') => {
                let seed = rng.gen_range(0..1_000_000);
                self.edit(|c| c.seed = seed)
            }
            KeyCode::Char('p') => {
                let next = palettes.next_name(&self.cfg.palette_name).to_string();
                self.edit(|c| c.palette_name = next)
            }
            KeyCode::Char('m') => self.edit(|c| c.draw_mode = c.draw_mode.toggled()),
            _ => Action::Ignore,
        }
    }
}

/// Paint the tree into the back buffer, leaving the last row for status
fn redraw(term: &mut Terminal, state: &mut ViewState, palettes: &PaletteBook, margin: f64) -> Result<()> {
    let (cols, rows) = term.size();
    term.clear();

    let mut plotter = Plotter::new(BrailleCanvas::new(cols, rows.saturating_sub(1)));
    match draw_scene(&state.cfg, palettes, &mut plotter, margin) {
        Ok(_) => plotter.canvas().blit(term),
        // only this frame is lost; a resize may fix it
        Err(Error::SurfaceUnavailable(reason)) => state.status = reason,
        Err(e) => return Err(e),
    }

    draw_status(term, &state.status);
    term.render()?;
    Ok(())
}

fn draw_status(term: &mut Terminal, status: &str) {
    let (cols, rows) = term.size();
    let y = i32::from(rows) - 1;
    term.set_str(0, y, &" ".repeat(cols as usize), None, false);
    term.set_str(0, y, status, Some(Color::Grey), false);
}

pub fn run(cfg: TreeConfig, palettes: &PaletteBook, margin: f64) -> Result<()> {
    let mut term = Terminal::new()?;
    let mut state = ViewState::new(cfg);
    let mut rng = StdRng::from_entropy();
    let mut dirty = true;

    loop {
        if term.refresh_size()? {
            term.clear_screen()?;
            dirty = true;
        }
        if dirty {
            redraw(&mut term, &mut state, palettes, margin)?;
            dirty = false;
        }

        let Some(code) = term.wait_key(100)? else {
            continue;
        };
        match state.handle_key(code, palettes, &mut rng) {
            Action::Quit => break,
            Action::Help => {
                if show_help_modal(&mut term, VIEW_HELP)? {
                    break;
                }
            }
            Action::Redraw => dirty = true,
            Action::Clear => {
                term.clear();
                draw_status(&mut term, &state.status);
                term.render()?;
            }
            Action::Status => {
                draw_status(&mut term, &state.status);
                term.render()?;
            }
            Action::Ignore => {}
        }
    }

    tracing::debug!(cfg = ?state.cfg, "viewer closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawMode;

    fn press(state: &mut ViewState, keys: &str) -> Action {
        let book = PaletteBook::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut last = Action::Ignore;
        for ch in keys.chars() {
            last = state.handle_key(KeyCode::Char(ch), &book, &mut rng);
        }
        last
    }

    #[test]
    fn depth_edits_are_validated() {
        let mut state = ViewState::new(TreeConfig { depth: 17, ..Default::default() });
        assert_eq!(press(&mut state, "D"), Action::Redraw);
        assert_eq!(state.cfg.depth, 18);
        assert_eq!(press(&mut state, "D"), Action::Status);
        assert_eq!(state.cfg.depth, 18);
        assert!(state.status.contains("depth must be within"));
    }

    #[test]
    fn depth_floor_is_zero() {
        let mut state = ViewState::new(TreeConfig { depth: 0, ..Default::default() });
        press(&mut state, "dd");
        assert_eq!(state.cfg.depth, 0);
    }

    #[test]
    fn shrink_steps_stay_on_grid() {
        let mut state = ViewState::new(TreeConfig::default());
        press(&mut state, "SSSss");
        assert_eq!(state.cfg.shrink, 0.73);
    }

    #[test]
    fn length_steps_and_floor() {
        let mut state = ViewState::new(TreeConfig::default());
        assert_eq!(press(&mut state, "LLl"), Action::Redraw);
        assert_eq!(state.cfg.trunk_length, 125.0);
        assert!(state.status.contains("len 125"));

        let mut state = ViewState::new(TreeConfig { trunk_length: 5.0, ..Default::default() });
        assert_eq!(press(&mut state, "l"), Action::Status);
        assert_eq!(state.cfg.trunk_length, 5.0);
        assert!(state.status.contains("length must be within"));
    }

    #[test]
    fn decay_steps_stay_on_grid() {
        let mut state = ViewState::new(TreeConfig::default());
        press(&mut state, "YYYyy");
        assert_eq!(state.cfg.thickness_decay, 0.76);

        let mut state = ViewState::new(TreeConfig { thickness_decay: 1.0, ..Default::default() });
        assert_eq!(press(&mut state, "Y"), Action::Status);
        assert_eq!(state.cfg.thickness_decay, 1.0);
    }

    #[test]
    fn shrink_limit_refused() {
        let mut state = ViewState::new(TreeConfig { shrink: 0.95, ..Default::default() });
        assert_eq!(press(&mut state, "S"), Action::Status);
        assert_eq!(state.cfg.shrink, 0.95);
    }

    #[test]
    fn randomness_stays_in_range() {
        let mut state = ViewState::new(TreeConfig::default());
        assert_eq!(press(&mut state, "r"), Action::Status);
        assert_eq!(state.cfg.randomness, 0.0);
        press(&mut state, "RR");
        assert_eq!(state.cfg.randomness, 0.1);
    }

    #[test]
    fn palette_and_mode_cycle() {
        let mut state = ViewState::new(TreeConfig::default());
        press(&mut state, "pm");
        assert_eq!(state.cfg.palette_name, "Sakura");
        assert_eq!(state.cfg.draw_mode, DrawMode::Square);
        assert!(state.status.contains("Sakura"));
    }

    #[test]
    fn new_seed_redraws() {
        let mut state = ViewState::new(TreeConfig { seed: 1_000_001, ..Default::default() });
        assert_eq!(press(&mut state, "n"), Action::Redraw);
        assert!(state.cfg.seed < 1_000_000);
    }

    #[test]
    fn quit_help_and_unknown_keys() {
        let mut state = ViewState::new(TreeConfig::default());
        assert_eq!(press(&mut state, "q"), Action::Quit);
        assert_eq!(press(&mut state, "?"), Action::Help);
        assert_eq!(press(&mut state, "z"), Action::Ignore);
        assert_eq!(press(&mut state, "c"), Action::Clear);
    }
}
