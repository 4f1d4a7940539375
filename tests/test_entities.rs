use platformer::compute::init_state;
use platformer::config::Config;
use platformer::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_enums_clone_and_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(PlayerState::Jumping, PlayerState::Falling);
    assert_ne!(EnemyState::Dormant, EnemyState::Active);
    assert_eq!(PlayerState::default(), PlayerState::Grounded);

    let kind = EntityKind::Player(PlayerState::Dead);
    assert_eq!(kind.clone(), EntityKind::Player(PlayerState::Dead));
    assert!(EntityKind::Enemy(EnemyState::Active).is_enemy());
    assert!(!EntityKind::Ground.is_enemy());
}

#[test]
fn display_mode_toggles_back_and_forth() {
    assert_eq!(DisplayMode::default(), DisplayMode::Plain);
    assert_eq!(DisplayMode::Plain.toggled(), DisplayMode::Rich);
    assert_eq!(DisplayMode::Plain.toggled().toggled(), DisplayMode::Plain);
}

#[test]
fn glyphs_pick_by_mode() {
    assert_eq!(PLAYER_GLYPHS.for_mode(DisplayMode::Plain), "p");
    assert_eq!(PLAYER_GLYPHS.for_mode(DisplayMode::Rich), "😎");
}

#[test]
fn direction_steps() {
    assert_eq!(Direction::Left.dx(), -1);
    assert_eq!(Direction::Right.dx(), 1);
}

#[test]
fn player_handle_resolves_to_player() {
    let s = init_state(&Config::default(), &mut StdRng::seed_from_u64(3));
    assert!(matches!(s.player().kind, EntityKind::Player(_)));
    assert_eq!(s.rest_y(), 2);
    assert_eq!(s.apex_y(), 0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&Config::default(), &mut StdRng::seed_from_u64(3));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player_mut().pos.x = 99;
    cloned.score = 999;
    cloned.set_player_state(PlayerState::Jumping);

    assert_eq!(original.player().pos.x, 2);
    assert_eq!(original.score, 0);
    assert_eq!(original.player_state(), PlayerState::Grounded);
}
