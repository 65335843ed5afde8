use sidescroller::collision::{resolve_collisions, DeathCause};
use sidescroller::compute::{init_state, step};
use sidescroller::config::GameConfig;
use sidescroller::enemy::spawn_enemy;
use sidescroller::entities::*;
use sidescroller::interface::InputIntents;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state() -> SimulationState {
    let mut s = init_state(GameConfig::default(), &mut seeded_rng());
    s.enemies.clear();
    s
}

fn enemy_at(kind: EnemyKind, x: f32) -> Enemy {
    spawn_enemy(kind, x, 1150.0, &mut seeded_rng())
}

fn player_shot(x: f32, y: f32) -> Projectile {
    Projectile::new(x, y, 9.0, 0.0, ProjectileOwner::Player)
}

fn enemy_shot(x: f32, y: f32, vx: f32) -> Projectile {
    Projectile::new(x, y, vx, 0.0, ProjectileOwner::Enemy)
}

// ── player shots ──────────────────────────────────────────────────────────────

#[test]
fn shot_destroys_enemy_and_scores() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::PatrolSlow, 500.0));
    s.player.projectiles.push(player_shot(520.0, 1100.0));

    let report = resolve_collisions(&mut s);
    assert_eq!(s.score, 100);
    assert_eq!(report.points, 100);
    assert_eq!(report.killed, vec![EnemyKind::PatrolSlow]);
    assert!(s.enemies.is_empty());
    assert!(s.player.projectiles.is_empty());
    assert!(s.player.alive);
    assert_eq!(report.player_death, None);
}

#[test]
fn missed_shot_survives() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::PatrolSlow, 500.0));
    s.player.projectiles.push(player_shot(700.0, 1100.0));

    resolve_collisions(&mut s);
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.player.projectiles.len(), 1);
}

#[test]
fn one_shot_kills_only_first_overlapping_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::PatrolFast, 500.0));
    s.enemies.push(enemy_at(EnemyKind::Melee, 510.0));
    s.player.projectiles.push(player_shot(512.0, 1100.0));

    let report = resolve_collisions(&mut s);
    assert_eq!(s.score, 75);
    assert_eq!(report.killed, vec![EnemyKind::PatrolFast]);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].kind, EnemyKind::Melee);
}

#[test]
fn two_shots_kill_two_enemies() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::PatrolFast, 500.0));
    s.enemies.push(enemy_at(EnemyKind::Melee, 510.0));
    s.player.projectiles.push(player_shot(512.0, 1100.0));
    s.player.projectiles.push(player_shot(530.0, 1100.0));

    let report = resolve_collisions(&mut s);
    assert_eq!(s.score, 275);
    assert_eq!(report.killed.len(), 2);
    assert!(s.enemies.is_empty());
    assert!(s.player.projectiles.is_empty());
}

// ── orphaned shots ────────────────────────────────────────────────────────────

#[test]
fn dead_enemy_shots_become_orphans() {
    let mut s = make_state();
    let mut shooter = enemy_at(EnemyKind::PatrolSlow, 500.0);
    shooter.projectiles.push(enemy_shot(800.0, 1100.0, -9.0));
    shooter.projectiles.push(enemy_shot(900.0, 1100.0, -9.0));
    s.enemies.push(shooter);
    s.player.projectiles.push(player_shot(520.0, 1100.0));

    resolve_collisions(&mut s);
    assert!(s.enemies.is_empty());
    assert_eq!(s.orphan_projectiles.len(), 2);
    // Advanced with the rest of the pool on the tick they were orphaned
    assert_eq!(s.orphan_projectiles[0].x, 791.0);
    assert_eq!(s.orphan_projectiles[1].x, 891.0);
    assert_eq!(s.enemy_projectile_count(), 2);

    resolve_collisions(&mut s);
    assert_eq!(s.orphan_projectiles[0].x, 782.0);
    assert_eq!(s.orphan_projectiles[1].x, 882.0);
}

#[test]
fn orphan_kills_player() {
    let mut s = make_state();
    s.orphan_projectiles.push(enemy_shot(129.0, 1100.0, -9.0));

    let report = resolve_collisions(&mut s);
    assert!(!s.player.alive);
    assert_eq!(report.player_death, Some(DeathCause::OrphanProjectile));
    assert!(s.orphan_projectiles.is_empty());
}

#[test]
fn orphan_leaving_world_is_dropped() {
    let mut s = make_state();
    s.orphan_projectiles.push(enemy_shot(5.0, 1000.0, -9.0));
    s.orphan_projectiles.push(enemy_shot(1500.0, 1000.0, 9.0));

    resolve_collisions(&mut s);
    assert_eq!(s.orphan_projectiles.len(), 1);
    assert_eq!(s.orphan_projectiles[0].x, 1509.0);
    assert!(s.player.alive);
}

#[test]
fn fresh_orphan_can_kill_on_the_tick_it_is_orphaned() {
    let mut s = make_state();
    let mut shooter = enemy_at(EnemyKind::PatrolSlow, 500.0);
    // Just short of the player; one more step puts it inside the box
    shooter.projectiles.push(enemy_shot(170.0, 1100.0, -9.0));
    s.enemies.push(shooter);
    s.player.projectiles.push(player_shot(520.0, 1100.0));

    let report = resolve_collisions(&mut s);
    assert_eq!(report.killed, vec![EnemyKind::PatrolSlow]);
    assert!(!s.player.alive);
    assert_eq!(report.player_death, Some(DeathCause::OrphanProjectile));
    assert!(s.orphan_projectiles.is_empty());
}

// ── hits on the player ────────────────────────────────────────────────────────

#[test]
fn enemy_shot_kills_player() {
    let mut s = make_state();
    let mut shooter = enemy_at(EnemyKind::PatrolSlow, 2000.0);
    shooter.projectiles.push(enemy_shot(110.0, 1100.0, -9.0));
    shooter.projectiles.push(enemy_shot(1500.0, 1100.0, -9.0));
    s.enemies.push(shooter);

    let report = resolve_collisions(&mut s);
    assert!(!s.player.alive);
    assert_eq!(report.player_death, Some(DeathCause::EnemyProjectile));
    assert_eq!(s.enemies[0].projectiles.len(), 1);
    assert_eq!(s.enemies[0].projectiles[0].x, 1500.0);
}

#[test]
fn melee_contact_kills_player() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::Melee, 130.0));

    let report = resolve_collisions(&mut s);
    assert!(!s.player.alive);
    assert_eq!(report.player_death, Some(DeathCause::Melee));
}

#[test]
fn patrol_contact_is_harmless() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::PatrolSlow, 130.0));

    let report = resolve_collisions(&mut s);
    assert!(s.player.alive);
    assert_eq!(report.player_death, None);
}

#[test]
fn melee_shot_down_on_contact_tick_cannot_stab() {
    let mut s = make_state();
    s.enemies.push(enemy_at(EnemyKind::Melee, 130.0));
    s.player.projectiles.push(player_shot(140.0, 1100.0));

    let report = resolve_collisions(&mut s);
    assert!(s.player.alive);
    assert_eq!(s.score, 200);
    assert_eq!(report.killed, vec![EnemyKind::Melee]);
}

#[test]
fn melee_contact_through_step_ends_game() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(EnemyKind::Melee, 130.0));

    let report = step(&mut s, &InputIntents::default(), &mut rng);
    assert!(report.game_over);
    assert_eq!(report.collisions.player_death, Some(DeathCause::Melee));
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.enemies[0].body.x, 129.0);
}
