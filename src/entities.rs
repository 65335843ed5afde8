//! All simulation entity types. Plain data; behavior lives in the update
//! modules.

use crate::config::GameConfig;
use crate::geometry::Aabb;

/// Edge length of the square player and enemy boxes.
pub const ACTOR_SIZE: f32 = 64.0;
pub const PROJECTILE_WIDTH: f32 = 16.0;
pub const PROJECTILE_HEIGHT: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// `None` for zero velocity, so callers keep the previous facing.
    pub fn from_velocity(vx: f32) -> Option<Facing> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn reversed(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Position, velocity and box shared by the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub owner: ProjectileOwner,
    pub distance_traveled: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, owner: ProjectileOwner) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            owner,
            distance_traveled: 0.0,
        }
    }

    /// Hit box, anchored with `(x, y)` as its top-left corner.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadState {
    Ready,
    /// Magazine refills once the tick clock reaches `deadline`.
    Reloading { deadline: u64 },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub speed: f32,
    pub jump_power: f32,
    pub jumping: bool,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reload: ReloadState,
    /// Last non-zero horizontal direction. Drives firing and spawn placement.
    pub facing: Facing,
    pub alive: bool,
    pub projectiles: Vec<Projectile>,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Patrols and shoots; the common enemy.
    PatrolSlow,
    /// Patrols and shoots at twice the pace, worth less.
    PatrolFast,
    /// Walks toward the player and kills on contact.
    Melee,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    /// Sole variant tag: movement, scoring and contact damage all read it.
    pub kind: EnemyKind,
    pub direction: Facing,
    /// Ticks left before the next shot may be taken. Only patrol kinds
    /// count it down; melee enemies never shoot.
    pub shoot_cooldown: u32,
    /// In-flight shots. Moved to the orphan pool when this enemy dies.
    pub projectiles: Vec<Projectile>,
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// World-space offset of the viewport's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

// ── Master simulation state ───────────────────────────────────────────────────

/// The entire simulation state. Cloneable so the pure [`tick`](crate::compute::tick)
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub config: GameConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Enemy shots whose owner was destroyed mid-flight. Still lethal.
    pub orphan_projectiles: Vec<Projectile>,
    pub camera: Camera,
    pub score: u32,
    /// Ticks since the last spawn.
    pub respawn_timer: u32,
    pub tick: u64,
    /// Y coordinate of the ground line actors rest on.
    pub ground_y: f32,
    pub status: GameStatus,
}

impl SimulationState {
    pub fn viewport(&self) -> Aabb {
        Aabb::new(
            self.camera.x,
            self.camera.y,
            self.config.viewport_width,
            self.config.viewport_height,
        )
    }

    /// Every live enemy projectile, owned or orphaned.
    pub fn enemy_projectile_count(&self) -> usize {
        self.enemies
            .iter()
            .map(|e| e.projectiles.len())
            .sum::<usize>()
            + self.orphan_projectiles.len()
    }
}
