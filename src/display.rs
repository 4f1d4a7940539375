/// Rendering layer — all terminal I/O lives here.
///
/// Takes a projected `Frame` and paints it with colours and borders.  Glyphs
/// and grid layout come from the frame untouched; this module only adds
/// styling around them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use platformer::entities::{EntityKind, GameStatus};
use platformer::view::Frame;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::Rgb { r: 0x5f, g: 0x57, b: 0x4f };
const C_LABEL: Color = Color::Rgb { r: 0xc2, g: 0xc3, b: 0xc7 };
const C_HUD_SCORE: Color = Color::Rgb { r: 0xff, g: 0xec, b: 0x27 };
const C_HUD_LIVES: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x4d };
const C_PLAYER: Color = Color::Rgb { r: 0x00, g: 0xff, b: 0xd0 };
const C_ENEMY: Color = Color::Rgb { r: 0xff, g: 0x55, b: 0x55 };
const C_COLLECTIBLE: Color = Color::Rgb { r: 0xff, g: 0xb3, b: 0x47 };
const C_GROUND: Color = Color::Rgb { r: 0x66, g: 0x66, b: 0x66 };
const C_BACKGROUND: Color = Color::Rgb { r: 0x3a, g: 0x3c, b: 0x4c };
const C_COMMANDS: Color = Color::Rgb { r: 0x29, g: 0xad, b: 0xff };

/// Columns inside the side walls: two per cell plus one cell of padding
/// on each side.
fn inner_width(frame: &Frame) -> usize {
    frame.rows.first().map(|r| r.len()).unwrap_or(0) * 2 + 2
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let width = inner_width(frame);
    draw_hud(out, frame, width)?;
    let bottom = draw_viewport(out, frame, width, 3)?;
    draw_footer(out, frame, bottom + 1)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, bottom + 2))?;
    out.flush()?;
    Ok(())
}

// ── Borders ───────────────────────────────────────────────────────────────────

fn draw_box_edge<W: Write>(out: &mut W, row: u16, width: usize, top: bool) -> std::io::Result<()> {
    let (l, r) = if top { ('┌', '┐') } else { ('└', '┘') };
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print(format!("{}{}{}", l, "─".repeat(width), r)))?;
    Ok(())
}

fn draw_side_walls<W: Write>(out: &mut W, row: u16, width: usize) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(Print("│"))?;
    out.queue(cursor::MoveTo(width as u16 + 1, row))?;
    out.queue(Print("│"))?;
    Ok(())
}

// ── HUD (rows 0-2) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, width: usize) -> std::io::Result<()> {
    draw_box_edge(out, 0, width, true)?;
    draw_side_walls(out, 1, width)?;
    draw_box_edge(out, 2, width, false)?;

    // The HUD text is "<lives> <gap> SCORE <n>"; colour its two halves.
    out.queue(cursor::MoveTo(2, 1))?;
    let (left, right) = match frame.hud.find("SCORE") {
        Some(split) => frame.hud.split_at(split),
        None => (frame.hud.as_str(), ""),
    };
    let left_color = match frame.status {
        GameStatus::Playing => C_LABEL,
        GameStatus::GameOver => C_HUD_LIVES,
    };
    out.queue(style::SetForegroundColor(left_color))?;
    out.queue(style::SetAttribute(Attribute::Bold))?;
    out.queue(Print(left))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(right))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    Ok(())
}

// ── Viewport ──────────────────────────────────────────────────────────────────

fn cell_color(kind: Option<EntityKind>) -> Color {
    match kind {
        Some(EntityKind::Player(_)) => C_PLAYER,
        Some(EntityKind::Enemy(_)) => C_ENEMY,
        Some(EntityKind::Collectible) => C_COLLECTIBLE,
        Some(EntityKind::Ground) => C_GROUND,
        None => C_BACKGROUND,
    }
}

/// Returns the row of the bottom border.
fn draw_viewport<W: Write>(
    out: &mut W,
    frame: &Frame,
    width: usize,
    top: u16,
) -> std::io::Result<u16> {
    draw_box_edge(out, top, width, true)?;

    for (y, row) in frame.rows.iter().enumerate() {
        let screen_y = top + 1 + y as u16;
        draw_side_walls(out, screen_y, width)?;
        out.queue(cursor::MoveTo(2, screen_y))?;

        // Reuse the frame's own row text so layout stays identical; only
        // colour changes per cell.
        let text = frame.row_text(y);
        let mut rest = text.as_str();
        for cell in row {
            let Some(after) = rest.strip_prefix(cell.glyph) else {
                break;
            };
            out.queue(style::SetForegroundColor(cell_color(cell.kind)))?;
            out.queue(Print(cell.glyph))?;
            rest = after;

            // Separator (plain mode only).
            if let Some(sep) = rest.chars().next().filter(|c| *c == ' ' || *c == '▒') {
                out.queue(style::SetForegroundColor(C_GROUND))?;
                out.queue(Print(sep))?;
                rest = &rest[sep.len_utf8()..];
            }
        }
    }

    let bottom = top + 1 + frame.rows.len() as u16;
    draw_box_edge(out, bottom, width, false)?;
    Ok(bottom)
}

// ── Footer ────────────────────────────────────────────────────────────────────

fn draw_footer<W: Write>(out: &mut W, frame: &Frame, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_COMMANDS))?;
    out.queue(Print(frame.footer))?;
    Ok(())
}
