//! Player avatar: intent-driven movement, jumping, and the magazine/reload
//! state machine.

use tracing::trace;

use crate::config::{GameConfig, ReloadPolicy};
use crate::entities::{
    Body, Facing, Player, Projectile, ProjectileOwner, ReloadState, ACTOR_SIZE,
};
use crate::interface::InputIntents;
use crate::physics;

/// Horizontal spawn position of a fresh player.
pub const PLAYER_START_X: f32 = 100.0;

impl Player {
    /// A player standing on `ground_y` with a full magazine, facing right.
    pub fn new(config: &GameConfig, ground_y: f32) -> Self {
        Player {
            body: Body::new(
                PLAYER_START_X,
                ground_y - ACTOR_SIZE,
                ACTOR_SIZE,
                ACTOR_SIZE,
            ),
            speed: config.player_speed,
            jump_power: config.jump_power,
            jumping: false,
            ammo: config.max_ammo,
            max_ammo: config.max_ammo,
            reload: ReloadState::Ready,
            facing: Facing::Right,
            alive: true,
            projectiles: Vec::new(),
        }
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    /// Fire one round in the facing direction.
    ///
    /// Returns `false` without touching any state when dead, reloading, or
    /// out of ammo.
    pub fn shoot(&mut self, projectile_speed: f32) -> bool {
        if !self.alive || self.is_reloading() || self.ammo == 0 {
            return false;
        }
        let (cx, cy) = self.body.center();
        self.projectiles.push(Projectile::new(
            cx,
            cy,
            self.facing.sign() * projectile_speed,
            0.0,
            ProjectileOwner::Player,
        ));
        self.ammo -= 1;
        true
    }

    /// Start a reload that completes `reload_ticks` after `now`.
    ///
    /// Ignored while already reloading or when the magazine is full.
    pub fn reload(&mut self, now: u64, reload_ticks: u64) -> bool {
        if !self.alive || self.is_reloading() || self.ammo >= self.max_ammo {
            return false;
        }
        self.reload = ReloadState::Reloading {
            deadline: now + reload_ticks,
        };
        trace!(now, deadline = now + reload_ticks, "reload started");
        true
    }

    /// Refill the magazine if the reload deadline has been reached.
    pub fn finish_reload(&mut self, now: u64) {
        if let ReloadState::Reloading { deadline } = self.reload {
            if now >= deadline {
                self.ammo = self.max_ammo;
                self.reload = ReloadState::Ready;
                trace!(now, "reload finished");
            }
        }
    }

    pub fn reload_remaining_ticks(&self, now: u64) -> Option<u64> {
        match self.reload {
            ReloadState::Ready => None,
            ReloadState::Reloading { deadline } => Some(deadline.saturating_sub(now)),
        }
    }

    /// Begin a jump unless one is already in progress.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.body.vy = -self.jump_power;
        self.jumping = true;
        true
    }

    /// Recompute horizontal velocity from the held direction intents.
    ///
    /// There is no inertia: with neither direction held the player stops
    /// dead. Facing only changes while moving.
    pub fn steer(&mut self, move_left: bool, move_right: bool) {
        self.body.vx = 0.0;
        if move_left {
            self.body.vx = -self.speed;
        }
        if move_right {
            self.body.vx = self.speed;
        }
        if let Some(facing) = Facing::from_velocity(self.body.vx) {
            self.facing = facing;
        }
    }
}

/// Run one tick of player logic against the current intents.
pub fn update_player(
    player: &mut Player,
    input: &InputIntents,
    config: &GameConfig,
    ground_y: f32,
    now: u64,
) {
    if !player.alive {
        return;
    }

    if input.fire {
        player.shoot(config.projectile_speed);
    }
    if input.reload {
        player.reload(now, config.reload_ticks());
    }

    player.steer(input.move_left, input.move_right);
    if input.jump {
        player.jump();
    }

    if config.reload_policy == ReloadPolicy::AutoWhenEmpty && player.ammo == 0 {
        player.reload(now, config.reload_ticks());
    }

    let landing = physics::integrate(
        &mut player.body,
        config.gravity,
        config.world_width,
        ground_y,
    );
    if landing.grounded {
        player.jumping = false;
    }

    physics::advance_all(
        &mut player.projectiles,
        config.world_width,
        config.world_height,
        config.projectile_range,
    );

    player.finish_reload(now);
}
