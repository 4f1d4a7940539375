use platformer::compute::{init_state, tick, toggle_display_mode};
use platformer::config::Config;
use platformer::entities::*;
use platformer::view::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let config = Config {
        enemy_count: 0,
        collectible_count: 0,
        ..Config::default()
    };
    init_state(&config, &mut StdRng::seed_from_u64(7))
}

fn add_enemy(state: &mut GameState, x: i32, y: i32) {
    state.entities.push(Entity::new(
        "test_enemy",
        EntityKind::Enemy(EnemyState::Active),
        Position::new(x, y),
        Glyphs::new("x", "🐍"),
    ));
}

// ── camera ────────────────────────────────────────────────────────────────────

#[test]
fn camera_pinned_at_world_start() {
    let s = make_state(); // player x = 2
    assert_eq!(s.camera_offset(), (0, 0));
}

#[test]
fn camera_follows_player_a_third_in() {
    let mut s = make_state();
    s.player_mut().pos.x = 50;
    assert_eq!(s.camera_offset(), (50 - 20 / 3, 0));
}

#[test]
fn camera_clamped_at_world_end() {
    let mut s = make_state();
    s.player_mut().pos.x = 99;
    assert_eq!(s.camera_offset(), (80, 0));
}

// ── grid ──────────────────────────────────────────────────────────────────────

#[test]
fn project_grid_dimensions() {
    let frame = project(&make_state());
    assert_eq!(frame.rows.len(), 4);
    assert!(frame.rows.iter().all(|r| r.len() == 20));
    assert_eq!(frame.ground_row, Some(3));
}

#[test]
fn project_places_player_and_ground() {
    let frame = project(&make_state());
    let player_cell = frame.rows[2][2];
    assert_eq!(player_cell.glyph, "p");
    assert_eq!(player_cell.kind, Some(EntityKind::Player(PlayerState::Grounded)));

    for cell in &frame.rows[3] {
        assert_eq!(cell.kind, Some(EntityKind::Ground));
        assert!(cell.glyph == "n" || cell.glyph == "m");
    }
    assert_eq!(frame.rows[0][0].glyph, ".");
    assert_eq!(frame.rows[0][0].kind, None);
}

#[test]
fn project_player_drawn_over_enemy() {
    let mut s = make_state();
    add_enemy(&mut s, 2, 2);
    let frame = project(&s);
    assert_eq!(frame.rows[2][2].glyph, "p");
}

#[test]
fn project_skips_entities_outside_view() {
    let mut s = make_state();
    add_enemy(&mut s, 25, 1);
    add_enemy(&mut s, 5, 1);
    let frame = project(&s);
    let enemies = frame
        .rows
        .iter()
        .flatten()
        .filter(|c| matches!(c.kind, Some(EntityKind::Enemy(_))))
        .count();
    assert_eq!(enemies, 1);
    assert_eq!(frame.rows[1][5].glyph, "x");
}

#[test]
fn project_uses_camera_relative_cells() {
    let mut s = make_state();
    s.player_mut().pos.x = 50;
    let frame = project(&s);
    let (ox, _) = frame.offset;
    assert_eq!(frame.rows[2][(50 - ox) as usize].glyph, "p");
}

#[test]
fn project_rich_mode_glyphs() {
    let mut s = make_state();
    toggle_display_mode(&mut s);
    let frame = project(&s);
    assert_eq!(frame.rows[2][2].glyph, "😎");
    assert_eq!(frame.rows[0][0].glyph, BACKGROUND_GLYPHS.rich);
}

// ── text ──────────────────────────────────────────────────────────────────────

#[test]
fn row_text_plain_has_separators() {
    let frame = project(&make_state());
    let air = frame.row_text(0);
    assert_eq!(air, ". ".repeat(20));

    let ground = frame.row_text(3);
    assert_eq!(ground.chars().count(), 40);
    assert_eq!(ground.matches('▒').count(), 20);
}

#[test]
fn row_text_rich_has_no_separators() {
    let mut s = make_state();
    toggle_display_mode(&mut s);
    let frame = project(&s);
    let ground = frame.row_text(3);
    assert!(!ground.contains('▒'));
    assert!(frame.row_text(2).contains("😎"));
}

#[test]
fn hud_while_playing() {
    let mut s = make_state();
    s.score = 40;
    let hud = hud_line(&s);
    assert!(hud.starts_with("LIVES 3"));
    assert!(hud.ends_with("SCORE 40"));
    assert_eq!(hud.chars().count(), 40);
}

#[test]
fn hud_and_footer_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let frame = project(&s);
    assert!(frame.hud.starts_with("GAME OVER"));
    assert_eq!(frame.footer, GAME_OVER_FOOTER);
}

#[test]
fn render_layout_hud_grid_footer() {
    let s = make_state();
    let text = render(&s);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 4 + 1);
    assert!(lines[0].starts_with("LIVES"));
    assert_eq!(lines[5], PLAYING_FOOTER);
}

#[test]
fn render_shows_death_glyph() {
    let mut s = make_state();
    s.lives = 1;
    add_enemy(&mut s, 3, 2);
    tick(&mut s, &mut StdRng::seed_from_u64(1));
    assert_eq!(s.status, GameStatus::GameOver);

    let frame = project(&s);
    // Knocked back to x = 1.
    assert_eq!(frame.rows[2][1].glyph, DEATH_GLYPHS.plain);
}
