//! Enemy variants and their per-tick behavior.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Body, Enemy, EnemyKind, Facing, Projectile, ProjectileOwner, ACTOR_SIZE,
};
use crate::geometry::{check_collision, Aabb};
use crate::physics;

/// Shot cooldown is re-rolled from this tick range after every shot.
const SHOOT_COOLDOWN_MIN: u32 = 60;
const SHOOT_COOLDOWN_MAX: u32 = 180;

/// Vertical distance under which a patrol enemy counts as level with the player.
const LINE_OF_SIGHT_TOLERANCE: f32 = 100.0;

/// Per-tick chance of a shot once the cooldown has run out and the player is
/// not in the line of fire.
const RANDOM_SHOT_CHANCE: f64 = 0.01;

/// Session-start population per kind.
const INITIAL_ROSTER: [(EnemyKind, usize); 3] = [
    (EnemyKind::PatrolSlow, 5),
    (EnemyKind::PatrolFast, 3),
    (EnemyKind::Melee, 2),
];

/// Number of enemies alive at session start. `enemy_cap` may not be lower.
pub const INITIAL_ROSTER_SIZE: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < INITIAL_ROSTER.len() {
        total += INITIAL_ROSTER[i].1;
        i += 1;
    }
    total
};

/// Initial roster keeps enemies this far from either world edge.
const ROSTER_EDGE_MARGIN: f32 = 200.0;

// ── Variant table ────────────────────────────────────────────────────────────

impl EnemyKind {
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::PatrolSlow => 2.0,
            EnemyKind::PatrolFast => 4.0,
            EnemyKind::Melee => 1.0,
        }
    }

    /// Score awarded when this enemy is shot down.
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::PatrolSlow => 100,
            EnemyKind::PatrolFast => 75,
            EnemyKind::Melee => 200,
        }
    }

    /// Patrol kinds fire aimed shots; melee kills on contact instead.
    pub fn shoots(self) -> bool {
        !matches!(self, EnemyKind::Melee)
    }

    /// Weighted pick: 60% slow patrol, 30% fast patrol, 10% melee.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let r: f64 = rng.gen();
        if r < 0.6 {
            EnemyKind::PatrolSlow
        } else if r < 0.9 {
            EnemyKind::PatrolFast
        } else {
            EnemyKind::Melee
        }
    }
}

fn roll_cooldown(rng: &mut impl Rng) -> u32 {
    rng.gen_range(SHOOT_COOLDOWN_MIN..SHOOT_COOLDOWN_MAX)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an enemy of `kind` standing on `ground_y` at horizontal position `x`.
pub fn spawn_enemy(kind: EnemyKind, x: f32, ground_y: f32, rng: &mut impl Rng) -> Enemy {
    let direction = if rng.gen_bool(0.5) {
        Facing::Right
    } else {
        Facing::Left
    };
    let shoot_cooldown = if kind.shoots() {
        roll_cooldown(rng)
    } else {
        0
    };
    Enemy {
        body: Body::new(x, ground_y - ACTOR_SIZE, ACTOR_SIZE, ACTOR_SIZE),
        kind,
        direction,
        shoot_cooldown,
        projectiles: Vec::new(),
    }
}

/// The fixed roster present at session start: five slow patrols, three fast
/// patrols and two melee enemies scattered away from the world edges.
pub fn initial_roster(config: &GameConfig, ground_y: f32, rng: &mut impl Rng) -> Vec<Enemy> {
    let low = ROSTER_EDGE_MARGIN.min(config.world_width / 2.0);
    let high = (config.world_width - ROSTER_EDGE_MARGIN).max(low + 1.0);

    INITIAL_ROSTER
        .iter()
        .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count))
        .map(|kind| {
            let x = rng.gen_range(low..high);
            spawn_enemy(kind, x, ground_y, rng)
        })
        .collect()
}

// ── Aimed fire ───────────────────────────────────────────────────────────────

/// Projectile from the enemy's centre toward `target`'s position at
/// `projectile_speed`. The aim distance is clamped to at least one unit so
/// coincident positions never produce NaN velocities.
pub fn aimed_shot(enemy: &Body, target: &Body, projectile_speed: f32) -> Projectile {
    let dx = target.x - enemy.x;
    let dy = target.y - enemy.y;
    let distance = dx.hypot(dy).max(1.0);
    let (cx, cy) = enemy.center();
    Projectile::new(
        cx,
        cy,
        dx / distance * projectile_speed,
        dy / distance * projectile_speed,
        ProjectileOwner::Enemy,
    )
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// What an enemy can see of the world while it updates.
#[derive(Clone, Copy, Debug)]
pub struct EnemyContext<'a> {
    pub config: &'a GameConfig,
    pub player: &'a Body,
    pub viewport: Aabb,
    pub ground_y: f32,
}

pub fn update_enemy(enemy: &mut Enemy, ctx: &EnemyContext<'_>, rng: &mut impl Rng) {
    match enemy.kind {
        EnemyKind::PatrolSlow | EnemyKind::PatrolFast => update_patrol(enemy, ctx, rng),
        EnemyKind::Melee => update_melee(enemy, ctx),
    }

    physics::advance_all(
        &mut enemy.projectiles,
        ctx.config.world_width,
        ctx.config.world_height,
        ctx.config.projectile_range,
    );
}

fn update_patrol(enemy: &mut Enemy, ctx: &EnemyContext<'_>, rng: &mut impl Rng) {
    let config = ctx.config;
    enemy.body.vx = enemy.kind.speed() * enemy.direction.sign();
    physics::integrate(&mut enemy.body, config.gravity, config.world_width, ctx.ground_y);

    if enemy.body.x <= 0.0 || enemy.body.x + enemy.body.width >= config.world_width {
        enemy.direction = enemy.direction.reversed();
    }

    enemy.shoot_cooldown = enemy.shoot_cooldown.saturating_sub(1);
    if enemy.shoot_cooldown > 0 || !check_collision(&enemy.body.bounds(), &ctx.viewport) {
        return;
    }

    let level_with_player = (enemy.body.y - ctx.player.y).abs() < LINE_OF_SIGHT_TOLERANCE;
    let facing_player = match enemy.direction {
        Facing::Right => enemy.body.x < ctx.player.x,
        Facing::Left => enemy.body.x > ctx.player.x,
    };
    if (level_with_player && facing_player) || rng.gen_bool(RANDOM_SHOT_CHANCE) {
        enemy.shoot_cooldown = roll_cooldown(rng);
        enemy
            .projectiles
            .push(aimed_shot(&enemy.body, ctx.player, config.projectile_speed));
    }
}

/// Step toward the player along the ground. Never chases vertically; if
/// knocked above the ground it drops back at twice its walking speed.
fn update_melee(enemy: &mut Enemy, ctx: &EnemyContext<'_>) {
    let speed = enemy.kind.speed();
    enemy.direction = if enemy.body.x < ctx.player.x {
        Facing::Right
    } else {
        Facing::Left
    };
    enemy.body.vx = speed * enemy.direction.sign();
    enemy.body.vy = 0.0;
    enemy.body.x += enemy.body.vx;

    if enemy.body.y + enemy.body.height < ctx.ground_y {
        enemy.body.y += speed * 2.0;
    }
    if enemy.body.y + enemy.body.height > ctx.ground_y {
        enemy.body.y = ctx.ground_y - enemy.body.height;
    }

    physics::clamp_horizontal(&mut enemy.body, ctx.config.world_width);
}
