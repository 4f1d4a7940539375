/// World-model types — plain data plus a few read-only accessors.

use serde::{Deserialize, Serialize};

use crate::config::Config;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A cell in world space.  `x` grows without bound as the run goes on,
/// `y` is the lane (0 = top air lane, `ground_level` = ground).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// ASCII letters, one column per cell plus a separator.
    #[default]
    Plain,
    /// Emoji, two columns per cell.
    Rich,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Plain => DisplayMode::Rich,
            DisplayMode::Rich => DisplayMode::Plain,
        }
    }
}

/// The two renderable symbols of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub plain: &'static str,
    pub rich: &'static str,
}

impl Glyphs {
    pub const fn new(plain: &'static str, rich: &'static str) -> Self {
        Self { plain, rich }
    }

    pub fn for_mode(&self, mode: DisplayMode) -> &'static str {
        match mode {
            DisplayMode::Plain => self.plain,
            DisplayMode::Rich => self.rich,
        }
    }
}

pub const PLAYER_GLYPHS: Glyphs = Glyphs::new("p", "😎");
pub const DEATH_GLYPHS: Glyphs = Glyphs::new("X", "💀");
pub const COLLECTIBLE_GLYPHS: Glyphs = Glyphs::new("o", "🪙");
pub const BACKGROUND_GLYPHS: Glyphs = Glyphs::new(".", "▪️");

// ── Per-kind state ────────────────────────────────────────────────────────────

/// Vertical motion state of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Grounded,
    Jumping,
    Falling,
    /// Frozen after the last life is lost.
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    /// Drifts with the ground until the player is within one view width.
    Dormant,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
    Ground,
    Collectible,
}

impl EntityKind {
    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Enemy(_))
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, EntityKind::Ground)
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, EntityKind::Collectible)
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Stable within a session, e.g. `"p1"`, `"enemy3"`, `"g42"`.
    pub id: String,
    pub kind: EntityKind,
    pub pos: Position,
    pub glyphs: Glyphs,
}

impl Entity {
    pub fn new(id: impl Into<String>, kind: EntityKind, pos: Position, glyphs: Glyphs) -> Self {
        Self {
            id: id.into(),
            kind,
            pos,
            glyphs,
        }
    }
}

/// Typed handle to an entity in `GameState::entities`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub usize);

// ── Commands ──────────────────────────────────────────────────────────────────

/// Discrete input events the core understands.  Quit and respawn are
/// handled by the host and never reach the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jump,
    ToggleMode,
    MoveLeft,
    MoveRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire session.  One owner; the simulation step borrows it mutably,
/// the projector immutably.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: Config,
    /// Fixed size after initialisation: entities are recycled, never removed.
    pub entities: Vec<Entity>,
    pub player: EntityId,
    /// With `config.grow_world`, follows the front of the ground as it is
    /// laid down ahead of the player.
    pub world_width: i32,
    pub view_width: i32,
    pub view_height: i32,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub mode: DisplayMode,
    /// World x of the most recently (re)spawned enemy, kept in step with
    /// that enemy as it moves.
    pub last_spawn_x: i32,
    /// Remaining ticks during which enemy contact is ignored.
    pub invulnerable_for: u32,
    pub frame: u64,
}

impl GameState {
    pub fn player(&self) -> &Entity {
        &self.entities[self.player.0]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player.0]
    }

    /// Current motion state; `Grounded` if the handle ever points elsewhere.
    pub fn player_state(&self) -> PlayerState {
        match self.player().kind {
            EntityKind::Player(state) => state,
            _ => PlayerState::Grounded,
        }
    }

    pub fn set_player_state(&mut self, state: PlayerState) {
        self.player_mut().kind = EntityKind::Player(state);
    }

    pub fn ground_level(&self) -> i32 {
        self.config.ground_level
    }

    /// Row the player stands on: one above the ground tiles.
    pub fn rest_y(&self) -> i32 {
        self.config.ground_level - 1
    }

    /// Highest row a jump reaches.
    pub fn apex_y(&self) -> i32 {
        self.config.ground_level - self.config.jump_height
    }

    /// Camera position: the player sits a third of the way into the view,
    /// clamped so the view never leaves `[0, world_width)`.
    pub fn camera_offset(&self) -> (i32, i32) {
        let max_x = (self.world_width - self.view_width).max(0);
        let x = (self.player().pos.x - self.view_width / 3).clamp(0, max_x);
        (x, 0)
    }

    pub fn count_where(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.kind)).count()
    }
}
