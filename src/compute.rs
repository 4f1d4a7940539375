/// Game-logic functions.
///
/// Every public function takes the session by reference (shared for queries,
/// exclusive for updates) plus, where needed, an RNG handle.  Side effects
/// are limited to the session and the injected RNG.

use rand::Rng;

use crate::config::{Config, Scoring};
use crate::entities::{
    Command, Direction, EnemyState, Entity, EntityId, EntityKind, GameState, GameStatus,
    Glyphs, PlayerState, Position, COLLECTIBLE_GLYPHS, DEATH_GLYPHS, PLAYER_GLYPHS,
};

// ── Roster ───────────────────────────────────────────────────────────────────

struct EnemyTemplate {
    name: &'static str,
    glyphs: Glyphs,
    /// Flies in the air lanes instead of walking on the ground.
    airborne: bool,
}

static ENEMY_ROSTER: [EnemyTemplate; 4] = [
    EnemyTemplate { name: "snake", glyphs: Glyphs::new("x", "🐍"), airborne: false },
    EnemyTemplate { name: "snail", glyphs: Glyphs::new("x", "🐌"), airborne: false },
    EnemyTemplate { name: "eagle", glyphs: Glyphs::new("e", "🦅"), airborne: true },
    EnemyTemplate { name: "moai", glyphs: Glyphs::new("x", "🗿"), airborne: false },
];

const GROUND_GLYPHS: [Glyphs; 2] = [Glyphs::new("n", "🧱"), Glyphs::new("m", "🟫")];

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the starting layout: the player standing at its start column, a
/// solid run of ground under `[0, world_width)`, and enemies and collectibles
/// scattered ahead of the player.
pub fn init_state(config: &Config, rng: &mut impl Rng) -> GameState {
    let rest_y = config.ground_level - 1;
    let player = Entity::new(
        "p1",
        EntityKind::Player(PlayerState::Grounded),
        Position::new(config.player_start_x, rest_y),
        PLAYER_GLYPHS,
    );

    let mut state = GameState {
        config: config.clone(),
        entities: vec![player],
        player: EntityId(0),
        world_width: config.world_width,
        view_width: config.view_width,
        view_height: config.view_height,
        score: 0,
        lives: config.lives,
        status: GameStatus::Playing,
        mode: config.start_mode,
        // First enemy lands at least a full view ahead of the player.
        last_spawn_x: config.player_start_x + config.view_width / 2,
        invulnerable_for: 0,
        frame: 0,
    };

    for i in 0..config.world_width {
        let glyphs = GROUND_GLYPHS[rng.gen_range(0..GROUND_GLYPHS.len())];
        state.entities.push(Entity::new(
            format!("g{}", i),
            EntityKind::Ground,
            Position::new(i, config.ground_level),
            glyphs,
        ));
    }

    for i in 0..config.collectible_count {
        let x = config.player_start_x + config.view_width + rng.gen_range(0..config.world_width);
        let y = rng.gen_range(state.apex_y()..=rest_y);
        state.entities.push(Entity::new(
            format!("c{}", i + 1),
            EntityKind::Collectible,
            Position::new(x, y),
            COLLECTIBLE_GLYPHS,
        ));
    }

    let enemy_state = fresh_enemy_state(config);
    for i in 0..config.enemy_count {
        let template = &ENEMY_ROSTER[rng.gen_range(0..ENEMY_ROSTER.len())];
        let y = if template.airborne {
            rng.gen_range(state.apex_y()..rest_y)
        } else {
            rest_y
        };
        let x = next_spawn_x(&mut state, rng);
        state.entities.push(Entity::new(
            format!("{}{}", template.name, i + 1),
            EntityKind::Enemy(enemy_state),
            Position::new(x, y),
            template.glyphs,
        ));
    }

    log::info!(
        "New session: {} entities, world width {}, view {}x{}",
        state.entities.len(),
        state.world_width,
        state.view_width,
        state.view_height
    );
    state
}

fn fresh_enemy_state(config: &Config) -> EnemyState {
    if config.lurking_enemies {
        EnemyState::Dormant
    } else {
        EnemyState::Active
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn toggle_display_mode(state: &mut GameState) {
    state.mode = state.mode.toggled();
}

/// Start a jump.  Ignored unless the player is standing on the ground, so
/// there is no double jump and no jumping mid-fall.
pub fn request_jump(state: &mut GameState) {
    if state.player_state() == PlayerState::Grounded {
        state.set_player_state(PlayerState::Jumping);
    }
}

/// Step the player one column, clamped to `[0, world_width - 1]`.
pub fn request_move(state: &mut GameState, direction: Direction) {
    if state.status == GameStatus::GameOver {
        return;
    }
    let max_x = state.world_width - 1;
    let player = state.player_mut();
    player.pos.x = (player.pos.x + direction.dx()).clamp(0, max_x);
}

pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Jump => request_jump(state),
        Command::ToggleMode => toggle_display_mode(state),
        Command::MoveLeft => request_move(state, Direction::Left),
        Command::MoveRight => request_move(state, Direction::Right),
    }
}

// ── Spawn bookkeeping ────────────────────────────────────────────────────────

/// Distance ahead of the player past which the next recycled enemy lands:
/// beyond the most recent spawn, plus half a view of breathing room.
pub fn spawn_anchor(state: &GameState) -> i32 {
    (state.last_spawn_x - state.player().pos.x).max(0) + state.view_width / 2
}

/// Pick the x of the next (re)spawned enemy and record it, so enemies
/// recycled back to back never share a column.
pub fn next_spawn_x(state: &mut GameState, rng: &mut impl Rng) -> i32 {
    let anchor = spawn_anchor(state);
    let x = state.player().pos.x + anchor + rng.gen_range(0..(state.view_width / 2).max(1));
    state.last_spawn_x = x;
    x
}

/// Where a picked-up or lost collectible reappears.
fn next_collectible_x(state: &GameState, rng: &mut impl Rng) -> i32 {
    state.player().pos.x + state.view_width + rng.gen_range(0..state.world_width.max(1))
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (tests use a seeded RNG).
///
/// The player moves first, so every collision below is checked against its
/// final position for this tick.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    if state.status == GameStatus::GameOver {
        return;
    }

    state.frame += 1;
    let immune = state.invulnerable_for > 0;
    state.invulnerable_for = state.invulnerable_for.saturating_sub(1);

    // ── 1. Survival score ────────────────────────────────────────────────────
    if state.config.scoring == Scoring::PerTick {
        state.score += 1;
    }

    // ── 2. Player ────────────────────────────────────────────────────────────
    update_player(state);

    // ── 3. Enemies ───────────────────────────────────────────────────────────
    update_enemies(state, rng, immune);
    if state.status == GameStatus::GameOver {
        return;
    }

    // ── 4. Collectibles ──────────────────────────────────────────────────────
    update_collectibles(state, rng);

    // ── 5. Ground ────────────────────────────────────────────────────────────
    update_ground(state);
}

/// One step of the jump/fall state machine.
pub fn update_player(state: &mut GameState) {
    let apex = state.apex_y();
    let rest = state.rest_y();

    match state.player_state() {
        PlayerState::Jumping => {
            let player = state.player_mut();
            if player.pos.y > apex {
                player.pos.y -= 1;
            }
            if player.pos.y <= apex {
                state.set_player_state(PlayerState::Falling);
            }
        }
        PlayerState::Falling => {
            let player = state.player_mut();
            if player.pos.y < rest {
                player.pos.y += 1;
            }
            if player.pos.y >= rest {
                state.set_player_state(PlayerState::Grounded);
            }
        }
        PlayerState::Grounded | PlayerState::Dead => {}
    }
}

/// Whether something that moved from `old_x` to `new_x` this tick ran into
/// `target`.  Every cell stepped over counts, so a fast mover cannot skip
/// past the player; the cell it started from does not.
fn swept_into(old_x: i32, pos: Position, target: Position) -> bool {
    if pos.y != target.y {
        return false;
    }
    if old_x == pos.x {
        pos.x == target.x
    } else {
        pos.x <= target.x && target.x < old_x
    }
}

fn update_enemies(state: &mut GameState, rng: &mut impl Rng, immune: bool) {
    let (trailing_edge, _) = state.camera_offset();

    for i in 0..state.entities.len() {
        let EntityKind::Enemy(mut enemy_state) = state.entities[i].kind else {
            continue;
        };
        let player_pos = state.player().pos;
        let old_x = state.entities[i].pos.x;

        if enemy_state == EnemyState::Dormant && (old_x - player_pos.x).abs() < state.view_width {
            log::debug!("{} wakes up", state.entities[i].id);
            enemy_state = EnemyState::Active;
        }

        // Dormant enemies drift with the scenery.
        let step = match enemy_state {
            EnemyState::Dormant => state.config.scroll_speed,
            EnemyState::Active => state.config.enemy_speed,
        };
        let mut new_x = old_x - step;
        let mut swept_from = old_x;

        if new_x < trailing_edge {
            new_x = next_spawn_x(state, rng);
            swept_from = new_x;
            enemy_state = fresh_enemy_state(&state.config);
            log::debug!("{} recycled to x={}", state.entities[i].id, new_x);
        } else if old_x == state.last_spawn_x {
            // Follow the newest spawn so the next one lands behind it.
            state.last_spawn_x = new_x;
        }
        state.entities[i].pos.x = new_x;
        state.entities[i].kind = EntityKind::Enemy(enemy_state);

        if swept_into(swept_from, state.entities[i].pos, player_pos) {
            if immune || state.invulnerable_for > 0 {
                continue;
            }
            hit_player(state);
            if state.status == GameStatus::GameOver {
                return;
            }
        }
    }
}

/// Take one life.  On the last one the run ends: the player turns into the
/// death glyph, drops to the ground row and is knocked back one column.
fn hit_player(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.invulnerable_for = state.config.invulnerability_ticks;

    if state.lives > 0 {
        log::info!("Player hit, {} lives left", state.lives);
        return;
    }

    let rest = state.rest_y();
    state.status = GameStatus::GameOver;
    let player = state.player_mut();
    player.glyphs = DEATH_GLYPHS;
    player.pos.y = rest;
    player.pos.x -= 1;
    player.kind = EntityKind::Player(PlayerState::Dead);
    log::info!("Game over at frame {} with score {}", state.frame, state.score);
}

fn update_collectibles(state: &mut GameState, rng: &mut impl Rng) {
    let speed = state.config.scroll_speed;
    let player_pos = state.player().pos;

    for i in 0..state.entities.len() {
        if !state.entities[i].kind.is_collectible() {
            continue;
        }
        let old_x = state.entities[i].pos.x;
        state.entities[i].pos.x -= speed;

        if swept_into(old_x, state.entities[i].pos, player_pos) {
            if state.config.scoring == Scoring::Pickup {
                state.score += state.config.points_per_pickup;
            }
            log::debug!("{} picked up, score {}", state.entities[i].id, state.score);
            state.entities[i].pos.x = next_collectible_x(state, rng);
        } else if state.entities[i].pos.x < 0 {
            state.entities[i].pos.x = next_collectible_x(state, rng);
        }
    }
}

/// Scroll the ground.  A tile that falls behind the camera is laid down
/// again just past the frontmost tile, so the run stays unbroken.
fn update_ground(state: &mut GameState) {
    let speed = state.config.scroll_speed;
    let trailing_edge = state.player().pos.x - state.view_width - state.config.ground_margin;
    let mut front = state
        .entities
        .iter()
        .filter(|e| e.kind.is_ground())
        .map(|e| e.pos.x - speed)
        .max()
        .unwrap_or(trailing_edge);

    for i in 0..state.entities.len() {
        if !state.entities[i].kind.is_ground() {
            continue;
        }
        let tile = &mut state.entities[i];
        tile.pos.x -= speed;
        if tile.pos.x < trailing_edge {
            front += 1;
            tile.pos.x = front;
        }
    }

    // The world reaches as far as the ground has been laid.
    if state.config.grow_world && front >= state.world_width {
        log::debug!("World grows to {}", front + 1);
        state.world_width = front + 1;
    }
}
