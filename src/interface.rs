//! Boundary between the simulation and whatever renders it and reads input.
//!
//! The collaborator fills [`InputIntents`] from its own event handling and
//! implements [`Frontend`] to receive draw calls, HUD data and lifecycle
//! signals. It never touches entity state directly.

use crate::entities::{
    Camera, EnemyKind, Facing, GameStatus, Projectile, ProjectileOwner, SimulationState,
    PROJECTILE_HEIGHT, PROJECTILE_WIDTH,
};

/// Player intents for a single tick. `fire` and `reload` are edge signals:
/// set them on the tick the button went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub reload: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Player,
    Enemy(EnemyKind),
    Projectile(ProjectileOwner),
}

/// One thing to draw, in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub kind: DrawKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
}

/// Read-only figures for the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    pub ammo: u32,
    pub max_ammo: u32,
    /// Seconds until the magazine refills, while reloading.
    pub reload_remaining_secs: Option<f32>,
    pub enemy_count: usize,
    pub score: u32,
    pub game_over: bool,
}

pub trait Frontend {
    type Error;

    fn begin_frame(&mut self, camera: &Camera) -> Result<(), Self::Error>;
    fn draw(&mut self, item: &DrawItem) -> Result<(), Self::Error>;
    fn hud(&mut self, hud: &HudSnapshot) -> Result<(), Self::Error>;
    fn end_frame(&mut self) -> Result<(), Self::Error>;

    /// Fired once when the player dies; ticking stops until a restart.
    fn on_player_death(&mut self, _final_score: u32) {}
}

pub fn hud_snapshot(state: &SimulationState) -> HudSnapshot {
    let player = &state.player;
    HudSnapshot {
        ammo: player.ammo,
        max_ammo: player.max_ammo,
        reload_remaining_secs: player
            .reload_remaining_ticks(state.tick)
            .map(|ticks| state.config.ticks_to_secs(ticks)),
        enemy_count: state.enemies.len(),
        score: state.score,
        game_over: state.status == GameStatus::GameOver,
    }
}

/// Every drawable in paint order: player, player shots, enemies with their
/// shots, then orphaned shots.
pub fn draw_items(state: &SimulationState) -> Vec<DrawItem> {
    let player = &state.player;
    let mut items = Vec::with_capacity(
        1 + player.projectiles.len() + state.enemies.len() + state.enemy_projectile_count(),
    );

    items.push(DrawItem {
        kind: DrawKind::Player,
        x: player.body.x,
        y: player.body.y,
        width: player.body.width,
        height: player.body.height,
        facing: player.facing,
    });

    let shot = |p: &Projectile| DrawItem {
        kind: DrawKind::Projectile(p.owner),
        x: p.x,
        y: p.y,
        width: PROJECTILE_WIDTH,
        height: PROJECTILE_HEIGHT,
        facing: Facing::from_velocity(p.vx).unwrap_or(Facing::Right),
    };

    items.extend(player.projectiles.iter().map(shot));

    for enemy in &state.enemies {
        items.push(DrawItem {
            kind: DrawKind::Enemy(enemy.kind),
            x: enemy.body.x,
            y: enemy.body.y,
            width: enemy.body.width,
            height: enemy.body.height,
            facing: enemy.direction,
        });
        items.extend(enemy.projectiles.iter().map(shot));
    }

    items.extend(state.orphan_projectiles.iter().map(shot));
    items
}

/// Push one complete frame to `frontend`.
pub fn draw_frame<F: Frontend>(state: &SimulationState, frontend: &mut F) -> Result<(), F::Error> {
    frontend.begin_frame(&state.camera)?;
    for item in draw_items(state) {
        frontend.draw(&item)?;
    }
    frontend.hud(&hud_snapshot(state))?;
    frontend.end_frame()
}
