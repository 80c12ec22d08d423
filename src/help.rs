use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

pub const VIEW_HELP: &str = "\
FRACTAL TREE
──────────────────────
d/D    Depth -/+
a/A    Angle -/+
l/L    Length -/+
s/S    Shrink -/+
t/T    Thickness -/+
y/Y    Thickness decay -/+
r/R    Randomness -/+
n      New seed
p      Next palette
m      Line/square mode
Enter  Redraw
c      Clear
q/Esc  Quit
?      Close help";

/// Box geometry for `lines` centered on a `width` x `height` screen
fn overlay_box(width: u16, height: u16, lines: &[&str]) -> (usize, usize, usize, usize) {
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4;
    let box_height = lines.len() + 2;
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    (start_x, start_y, box_width, max_width)
}

/// Show a modal help overlay on top of the current frame.
/// Returns true if the user asked to quit (q/Esc) while it was open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_overlay(width, height, help_text)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Back buffer is untouched, so repainting it removes the overlay
    term.render()?;
    Ok(false)
}

fn draw_overlay(width: u16, height: u16, help_text: &str) -> io::Result<()> {
    let lines: Vec<&str> = help_text.lines().collect();
    let (start_x, start_y, box_width, max_width) = overlay_box(width, height, &lines);
    let horizontal = "─".repeat(box_width - 2);

    let border_color = Color::White;
    let text_color = Color::Grey;

    let mut out = stdout();

    queue!(
        out,
        MoveTo(start_x as u16, start_y as u16),
        SetForegroundColor(border_color),
        Print(format!("┌{horizontal}┐"))
    )?;

    for (i, line) in lines.iter().enumerate() {
        let y = (start_y + 1 + i) as u16;
        let padding = max_width.saturating_sub(line.chars().count());
        queue!(
            out,
            MoveTo(start_x as u16, y),
            SetForegroundColor(border_color),
            Print('│'),
            SetForegroundColor(text_color),
            Print(format!(" {}{} ", line, " ".repeat(padding))),
            SetForegroundColor(border_color),
            Print('│')
        )?;
    }

    let bottom_y = (start_y + lines.len() + 1) as u16;
    queue!(
        out,
        MoveTo(start_x as u16, bottom_y),
        Print(format!("└{horizontal}┘")),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;
    out.flush()
}
