//! Periodic enemy reinforcements placed just off-screen ahead of the player.

use rand::Rng;
use tracing::debug;

use crate::enemy::spawn_enemy;
use crate::entities::{EnemyKind, Facing, SimulationState, ACTOR_SIZE};

/// Gap between the viewport edge and a freshly spawned enemy.
pub const SPAWN_MARGIN: f32 = 100.0;

/// Horizontal spawn position just outside the viewport on the `facing` side.
pub fn spawn_x(camera_x: f32, viewport_width: f32, facing: Facing) -> f32 {
    match facing {
        Facing::Right => camera_x + viewport_width + SPAWN_MARGIN,
        Facing::Left => camera_x - ACTOR_SIZE - SPAWN_MARGIN,
    }
}

/// Count one tick on the respawn timer and spawn an enemy when it is due.
///
/// The timer is only reset by a successful spawn; while the population is at
/// the cap it keeps running so the next free slot is filled immediately.
pub fn handle_enemy_respawn(
    state: &mut SimulationState,
    rng: &mut impl Rng,
) -> Option<EnemyKind> {
    state.respawn_timer = state.respawn_timer.saturating_add(1);

    if state.respawn_timer < state.config.spawn_interval_ticks
        || state.enemies.len() >= state.config.enemy_cap
    {
        return None;
    }
    state.respawn_timer = 0;

    let kind = EnemyKind::roll(rng);
    let x = spawn_x(
        state.camera.x,
        state.config.viewport_width,
        state.player.facing,
    );
    state.enemies.push(spawn_enemy(kind, x, state.ground_y, rng));

    debug!(
        ?kind,
        x,
        player_x = state.player.body.x,
        camera_x = state.camera.x,
        population = state.enemies.len(),
        "spawned enemy"
    );
    Some(kind)
}
