//! Game-session lifecycle: start, per-tick advance, death signal, restart.

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, step, TickReport};
use crate::config::GameConfig;
use crate::entities::{GameStatus, SimulationState};
use crate::error::ConfigError;
use crate::interface::{draw_frame, Frontend, InputIntents};

/// Owns the simulation state and the RNG for one run of the game.
pub struct Session<R: Rng> {
    state: SimulationState,
    rng: R,
    /// Ground line supplied by the frontend, kept across restarts.
    ground_override: Option<f32>,
}

impl<R: Rng> Session<R> {
    /// Validate `config` and build the opening state.
    pub fn start(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = init_state(config, &mut rng);
        info!(
            enemies = state.enemies.len(),
            world_width = config.world_width,
            world_height = config.world_height,
            "session started"
        );
        Ok(Self {
            state,
            rng,
            ground_override: None,
        })
    }

    /// Throw away all state and begin again from the initial roster.
    pub fn restart(&mut self) {
        let final_score = self.state.score;
        self.state = init_state(self.state.config, &mut self.rng);
        if let Some(ground_y) = self.ground_override {
            self.apply_ground_line(ground_y);
        }
        info!(previous_score = final_score, "session restarted");
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for scripted scenarios and replays. Frontends feed
    /// input through [`advance`](Self::advance) instead.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Playing
    }

    /// Move the ground line, e.g. for a layout that pins it to the middle of
    /// the screen. Actors already standing on the old line are moved onto the
    /// new one. Rejected without any change if the line is not finite or
    /// would put actors outside the world.
    pub fn set_ground_line(&mut self, ground_y: f32) -> Result<(), ConfigError> {
        self.state.config.validate_ground_line(ground_y)?;
        self.ground_override = Some(ground_y);
        self.apply_ground_line(ground_y);
        Ok(())
    }

    fn apply_ground_line(&mut self, ground_y: f32) {
        let old = self.state.ground_y;
        self.state.ground_y = ground_y;
        let bodies = std::iter::once(&mut self.state.player.body)
            .chain(self.state.enemies.iter_mut().map(|e| &mut e.body));
        for body in bodies {
            if body.y + body.height >= old {
                body.y = ground_y - body.height;
            }
        }
    }

    /// Run one tick with `input`. After the player has died this is a no-op
    /// until [`restart`](Self::restart); the death is reported to `frontend`
    /// exactly once, on the tick it happens.
    pub fn advance<F: Frontend>(&mut self, input: &InputIntents, frontend: &mut F) -> TickReport {
        let report = step(&mut self.state, input, &mut self.rng);
        if report.game_over {
            info!(
                score = self.state.score,
                tick = self.state.tick,
                "game over"
            );
            frontend.on_player_death(self.state.score);
        }
        report
    }

    pub fn render<F: Frontend>(&self, frontend: &mut F) -> Result<(), F::Error> {
        draw_frame(&self.state, frontend)
    }
}
