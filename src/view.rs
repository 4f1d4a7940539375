/// Projection of the world into a fixed-size character grid.
///
/// Read-only over `GameState`.  The result is plain text; a styling layer may
/// colour cells (each carries the kind of entity drawn there) but must not
/// change layout or glyph choice.

use std::fmt;

use crate::entities::{DisplayMode, EntityKind, GameState, GameStatus, BACKGROUND_GLYPHS};

pub const PLAYING_FOOTER: &str = "▶ [K^] Jump ✦ [H/L] Move ✦ [M] Mode ✦ [Q] Quit";
pub const GAME_OVER_FOOTER: &str = "▶ [R] to Respawn ✦ [Q] to Quit";

const CELL_SEPARATOR: char = ' ';
const GROUND_SEPARATOR: char = '▒';

/// One grid cell: the glyph to print and, unless it is background, what
/// kind of entity put it there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: &'static str,
    pub kind: Option<EntityKind>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub mode: DisplayMode,
    pub status: GameStatus,
    /// Camera offset used for this frame.
    pub offset: (i32, i32),
    pub hud: String,
    /// `view_height` rows of `view_width` cells, top row first.
    pub rows: Vec<Vec<Cell>>,
    /// Viewport row holding the ground tiles, if it is visible.
    pub ground_row: Option<usize>,
    pub footer: &'static str,
}

/// Build the frame for the current state.
pub fn project(state: &GameState) -> Frame {
    let (offset_x, offset_y) = state.camera_offset();
    let width = state.view_width.max(0) as usize;
    let height = state.view_height.max(0) as usize;

    let background = Cell {
        glyph: BACKGROUND_GLYPHS.for_mode(state.mode),
        kind: None,
    };
    let mut rows = vec![vec![background; width]; height];

    // Player last so it is never hidden by ground or enemies.
    let others = state
        .entities
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != state.player.0)
        .map(|(_, e)| e);

    for entity in others.chain(std::iter::once(state.player())) {
        let x = entity.pos.x - offset_x;
        let y = entity.pos.y - offset_y;
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            continue;
        }
        rows[y as usize][x as usize] = Cell {
            glyph: entity.glyphs.for_mode(state.mode),
            kind: Some(entity.kind),
        };
    }

    let ground_row = usize::try_from(state.ground_level() - offset_y)
        .ok()
        .filter(|&row| row < height);

    Frame {
        mode: state.mode,
        status: state.status,
        offset: (offset_x, offset_y),
        hud: hud_line(state),
        rows,
        ground_row,
        footer: match state.status {
            GameStatus::Playing => PLAYING_FOOTER,
            GameStatus::GameOver => GAME_OVER_FOOTER,
        },
    }
}

/// Project and serialise in one go.
pub fn render(state: &GameState) -> String {
    project(state).to_string()
}

/// Lives (or GAME OVER) on the left, score on the right, spread across the
/// printed width of the viewport.
pub fn hud_line(state: &GameState) -> String {
    let left = match state.status {
        GameStatus::Playing => format!("LIVES {}", state.lives),
        GameStatus::GameOver => "GAME OVER".to_string(),
    };
    let right = format!("SCORE {}", state.score);
    let width = 2 * state.view_width.max(0) as usize;
    let gap = width
        .saturating_sub(left.chars().count() + right.chars().count())
        .max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

impl Frame {
    /// Text of one viewport row.  Plain cells are followed by a separator
    /// (`▒` on the ground row); rich cells are already two columns wide.
    pub fn row_text(&self, y: usize) -> String {
        let Some(row) = self.rows.get(y) else {
            return String::new();
        };
        let separator = if self.ground_row == Some(y) {
            GROUND_SEPARATOR
        } else {
            CELL_SEPARATOR
        };

        let mut out = String::with_capacity(row.len() * 4);
        for cell in row {
            out.push_str(cell.glyph);
            if self.mode == DisplayMode::Plain {
                out.push(separator);
            }
        }
        out
    }

    /// The viewport rows joined by newlines, without HUD or footer.
    pub fn grid_text(&self) -> String {
        (0..self.rows.len())
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.hud)?;
        writeln!(f, "{}", self.grid_text())?;
        write!(f, "{}", self.footer)
    }
}
