//! Simulation tick driver.
//!
//! [`step`] advances a state in place; [`tick`] and the input wrappers are
//! the pure forms that take an immutable reference and return a brand-new
//! `SimulationState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::camera::update_camera;
use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::GameConfig;
use crate::enemy::{initial_roster, update_enemy, EnemyContext};
use crate::entities::{Camera, EnemyKind, GameStatus, Player, SimulationState};
use crate::interface::InputIntents;
use crate::player::update_player;
use crate::spawner::handle_enemy_respawn;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state: a fresh player on the default ground line and the
/// starting enemy roster.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> SimulationState {
    let ground_y = config.ground_y();
    let mut state = SimulationState {
        config,
        player: Player::new(&config, ground_y),
        enemies: initial_roster(&config, ground_y, rng),
        orphan_projectiles: Vec::new(),
        camera: Camera::default(),
        score: 0,
        respawn_timer: 0,
        tick: 0,
        ground_y,
        status: GameStatus::Playing,
    };
    update_camera(&mut state.camera, &state.player.body, &state.config);
    state
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn player_shoot(state: &SimulationState) -> SimulationState {
    let mut next = state.clone();
    next.player.shoot(next.config.projectile_speed);
    next
}

pub fn player_reload(state: &SimulationState) -> SimulationState {
    let mut next = state.clone();
    next.player.reload(next.tick, next.config.reload_ticks());
    next
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Everything notable that happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<EnemyKind>,
    pub collisions: CollisionReport,
    /// The player died on this tick.
    pub game_over: bool,
}

/// Advance the simulation by one tick in place. Does nothing once the game
/// is over.
pub fn step(state: &mut SimulationState, input: &InputIntents, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport::default();
    if state.status == GameStatus::GameOver {
        return report;
    }

    state.tick += 1;

    // ── 1. Camera ────────────────────────────────────────────────────────────
    update_camera(&mut state.camera, &state.player.body, &state.config);

    // ── 2. Reinforcements ────────────────────────────────────────────────────
    report.spawned = handle_enemy_respawn(state, rng);

    // ── 3. Player ────────────────────────────────────────────────────────────
    update_player(
        &mut state.player,
        input,
        &state.config,
        state.ground_y,
        state.tick,
    );

    // ── 4. Enemies ───────────────────────────────────────────────────────────
    let player_body = state.player.body;
    let ctx = EnemyContext {
        config: &state.config,
        player: &player_body,
        viewport: state.viewport(),
        ground_y: state.ground_y,
    };
    for enemy in state.enemies.iter_mut() {
        update_enemy(enemy, &ctx, rng);
    }

    // ── 5. Collisions ────────────────────────────────────────────────────────
    report.collisions = resolve_collisions(state);

    // ── 6. Status ────────────────────────────────────────────────────────────
    if !state.player.alive {
        state.status = GameStatus::GameOver;
        report.game_over = true;
    }

    report
}

/// Pure form of [`step`]: returns the next state and leaves `state` untouched.
pub fn tick(state: &SimulationState, input: &InputIntents, rng: &mut impl Rng) -> SimulationState {
    let mut next = state.clone();
    step(&mut next, input, rng);
    next
}
