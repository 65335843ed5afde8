use sidescroller::config::GameConfig;
use sidescroller::enemy::{
    aimed_shot, initial_roster, spawn_enemy, update_enemy, EnemyContext, INITIAL_ROSTER_SIZE,
};
use sidescroller::entities::*;
use sidescroller::geometry::Aabb;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player_body() -> Body {
    Body::new(100.0, 1086.0, ACTOR_SIZE, ACTOR_SIZE)
}

/// Viewport for a camera at (0, 400) with the default 1200x800 window.
fn home_viewport() -> Aabb {
    Aabb::new(0.0, 400.0, 1200.0, 800.0)
}

fn patrol(kind: EnemyKind, x: f32, direction: Facing, cooldown: u32) -> Enemy {
    let mut enemy = spawn_enemy(kind, x, 1150.0, &mut seeded_rng());
    enemy.direction = direction;
    enemy.shoot_cooldown = cooldown;
    enemy
}

// ── variant table ─────────────────────────────────────────────────────────────

#[test]
fn variant_stats() {
    assert_eq!(EnemyKind::PatrolSlow.speed(), 2.0);
    assert_eq!(EnemyKind::PatrolFast.speed(), 4.0);
    assert_eq!(EnemyKind::Melee.speed(), 1.0);
    assert_eq!(EnemyKind::PatrolSlow.points(), 100);
    assert_eq!(EnemyKind::PatrolFast.points(), 75);
    assert_eq!(EnemyKind::Melee.points(), 200);
}

#[test]
fn roll_follows_weighting() {
    let mut rng = seeded_rng();
    let mut counts = [0u32; 3];
    for _ in 0..10_000 {
        match EnemyKind::roll(&mut rng) {
            EnemyKind::PatrolSlow => counts[0] += 1,
            EnemyKind::PatrolFast => counts[1] += 1,
            EnemyKind::Melee => counts[2] += 1,
        }
    }
    assert!((5700..=6300).contains(&counts[0]), "slow: {}", counts[0]);
    assert!((2700..=3300).contains(&counts[1]), "fast: {}", counts[1]);
    assert!((700..=1300).contains(&counts[2]), "melee: {}", counts[2]);
}

#[test]
fn spawned_enemy_stands_on_ground() {
    let mut rng = seeded_rng();
    for kind in [EnemyKind::PatrolSlow, EnemyKind::PatrolFast, EnemyKind::Melee] {
        let enemy = spawn_enemy(kind, 700.0, 1150.0, &mut rng);
        assert_eq!(enemy.body.x, 700.0);
        assert_eq!(enemy.body.y, 1086.0);
        assert!(enemy.projectiles.is_empty());
        if kind.shoots() {
            assert!((60..180).contains(&enemy.shoot_cooldown));
        } else {
            assert_eq!(enemy.shoot_cooldown, 0);
        }
    }
}

#[test]
fn initial_roster_composition() {
    let config = GameConfig::default();
    let roster = initial_roster(&config, config.ground_y(), &mut seeded_rng());
    assert_eq!(roster.len(), 10);
    assert_eq!(INITIAL_ROSTER_SIZE, 10);

    let count = |k: EnemyKind| roster.iter().filter(|e| e.kind == k).count();
    assert_eq!(count(EnemyKind::PatrolSlow), 5);
    assert_eq!(count(EnemyKind::PatrolFast), 3);
    assert_eq!(count(EnemyKind::Melee), 2);

    for enemy in &roster {
        assert!(enemy.body.x >= 200.0 && enemy.body.x < 2800.0);
        assert_eq!(enemy.body.y, 1086.0);
    }
}

// ── patrol ────────────────────────────────────────────────────────────────────

#[test]
fn patrol_reverses_at_left_edge() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = patrol(EnemyKind::PatrolSlow, 0.0, Facing::Left, 100);
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.x, 0.0);
    assert_eq!(enemy.direction, Facing::Right);

    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.x, 2.0);
}

#[test]
fn patrol_reverses_at_right_edge() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = patrol(EnemyKind::PatrolFast, 2936.0, Facing::Right, 100);
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.x, 2936.0);
    assert_eq!(enemy.direction, Facing::Left);
}

#[test]
fn patrol_fires_when_facing_player_on_screen() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = patrol(EnemyKind::PatrolSlow, 600.0, Facing::Left, 1);
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());

    assert_eq!(enemy.body.x, 598.0);
    assert_eq!(enemy.projectiles.len(), 1);
    let shot = &enemy.projectiles[0];
    assert_eq!(shot.owner, ProjectileOwner::Enemy);
    assert!((shot.vx - -9.0).abs() < 1e-4);
    assert!(shot.vy.abs() < 1e-4);
    // Fired from the centre, then moved once with the rest of its owner's shots
    assert!((shot.x - (630.0 - 9.0)).abs() < 1e-4);

    assert!((60..180).contains(&enemy.shoot_cooldown));
}

#[test]
fn patrol_off_screen_never_fires() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = patrol(EnemyKind::PatrolSlow, 2000.0, Facing::Left, 1);
    let mut rng = seeded_rng();
    for _ in 0..500 {
        update_enemy(&mut enemy, &ctx, &mut rng);
        if enemy.body.x < 1300.0 {
            break;
        }
    }
    assert!(enemy.projectiles.is_empty());
}

#[test]
fn patrol_cooldown_counts_down() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = patrol(EnemyKind::PatrolSlow, 600.0, Facing::Left, 10);
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.shoot_cooldown, 9);
    assert!(enemy.projectiles.is_empty());
}

// ── aimed fire ────────────────────────────────────────────────────────────────

#[test]
fn aimed_shot_points_at_target() {
    let enemy = Body::new(1000.0, 1086.0, ACTOR_SIZE, ACTOR_SIZE);
    let shot = aimed_shot(&enemy, &player_body(), 9.0);
    assert_eq!((shot.x, shot.y), (1032.0, 1118.0));
    assert!((shot.vx - -9.0).abs() < 1e-4);
    assert!(shot.vy.abs() < 1e-4);
    assert!((shot.vx.hypot(shot.vy) - 9.0).abs() < 1e-4);
}

#[test]
fn aimed_shot_at_coincident_target_is_finite() {
    let body = player_body();
    let shot = aimed_shot(&body, &body, 9.0);
    assert!(shot.vx.is_finite() && shot.vy.is_finite());
    assert_eq!((shot.vx, shot.vy), (0.0, 0.0));
}

// ── melee ─────────────────────────────────────────────────────────────────────

#[test]
fn melee_walks_toward_player() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = spawn_enemy(EnemyKind::Melee, 500.0, 1150.0, &mut seeded_rng());
    enemy.direction = Facing::Right;
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.x, 499.0);
    assert_eq!(enemy.body.y, 1086.0);
    assert_eq!(enemy.direction, Facing::Left);
    assert!(enemy.projectiles.is_empty());

    let mut behind = spawn_enemy(EnemyKind::Melee, 10.0, 1150.0, &mut seeded_rng());
    update_enemy(&mut behind, &ctx, &mut seeded_rng());
    assert_eq!(behind.body.x, 11.0);
    assert_eq!(behind.direction, Facing::Right);
}

#[test]
fn melee_never_fires_even_with_cooldown_spent() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = spawn_enemy(EnemyKind::Melee, 600.0, 1150.0, &mut seeded_rng());
    enemy.shoot_cooldown = 1;
    let mut rng = seeded_rng();
    for _ in 0..300 {
        update_enemy(&mut enemy, &ctx, &mut rng);
    }
    assert!(enemy.projectiles.is_empty());
    assert_eq!(enemy.shoot_cooldown, 1);
    assert!(enemy.body.x < 600.0);
}

#[test]
fn airborne_melee_drops_back_to_ground() {
    let config = GameConfig::default();
    let body = player_body();
    let ctx = EnemyContext {
        config: &config,
        player: &body,
        viewport: home_viewport(),
        ground_y: 1150.0,
    };
    let mut enemy = spawn_enemy(EnemyKind::Melee, 500.0, 1150.0, &mut seeded_rng());
    enemy.body.y = 1076.0;
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.y, 1078.0);

    enemy.body.y = 1085.0;
    update_enemy(&mut enemy, &ctx, &mut seeded_rng());
    assert_eq!(enemy.body.y, 1086.0);
}
