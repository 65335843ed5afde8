//! Tunable simulation parameters.
//!
//! Defaults reproduce the desktop layout: a 3000x1200 world seen through a
//! 1200x800 viewport at 60 ticks per second.

use serde::Deserialize;

use crate::enemy::INITIAL_ROSTER_SIZE;
use crate::entities::ACTOR_SIZE;
use crate::error::ConfigError;

/// Whether the player reloads only on request or also whenever the magazine
/// runs dry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ReloadPolicy {
    #[default]
    Manual,
    AutoWhenEmpty,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Distance from the bottom of the world to the ground line.
    pub ground_offset: f32,
    /// Added to vertical velocity once per tick.
    pub gravity: f32,
    pub player_speed: f32,
    pub jump_power: f32,
    pub projectile_speed: f32,
    /// Maximum distance a projectile may cover; `None` means it only expires
    /// by leaving the world.
    pub projectile_range: Option<f32>,
    pub max_ammo: u32,
    pub reload_duration_ms: u32,
    pub reload_policy: ReloadPolicy,
    pub enemy_cap: usize,
    pub spawn_interval_ticks: u32,
    pub tick_rate_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            world_height: 1200.0,
            viewport_width: 1200.0,
            viewport_height: 800.0,
            ground_offset: 50.0,
            gravity: 0.8,
            player_speed: 5.0,
            jump_power: 15.0,
            projectile_speed: 9.0,
            projectile_range: None,
            max_ammo: 14,
            reload_duration_ms: 500,
            reload_policy: ReloadPolicy::Manual,
            enemy_cap: 15,
            spawn_interval_ticks: 300,
            tick_rate_hz: 60,
        }
    }
}

impl GameConfig {
    /// Parse a RON document. Missing fields fall back to [`Default`].
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_speed", self.player_speed),
            ("jump_power", self.jump_power),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        // Zero gravity and a flush ground line are legal.
        for (field, value) in [("gravity", self.gravity), ("ground_offset", self.ground_offset)] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if let Some(range) = self.projectile_range {
            if !range.is_finite() {
                return Err(ConfigError::NotFinite {
                    field: "projectile_range",
                });
            }
            if range <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "projectile_range",
                });
            }
        }

        let counts = [
            ("max_ammo", self.max_ammo as u64),
            ("reload_duration_ms", self.reload_duration_ms as u64),
            ("enemy_cap", self.enemy_cap as u64),
            ("spawn_interval_ticks", self.spawn_interval_ticks as u64),
            ("tick_rate_hz", self.tick_rate_hz as u64),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if self.enemy_cap < INITIAL_ROSTER_SIZE {
            return Err(ConfigError::CapBelowRoster {
                enemy_cap: self.enemy_cap,
                roster: INITIAL_ROSTER_SIZE,
            });
        }

        if self.viewport_width > self.world_width
            || self.viewport_height > self.world_height
            || self.world_width < ACTOR_SIZE
        {
            return Err(ConfigError::ViewportLargerThanWorld {
                viewport: (self.viewport_width, self.viewport_height),
                world: (self.world_width, self.world_height),
            });
        }

        if self.ground_offset + ACTOR_SIZE > self.world_height {
            return Err(ConfigError::GroundOutOfWorld {
                ground_offset: self.ground_offset,
                world_height: self.world_height,
            });
        }

        Ok(())
    }

    /// Default ground line: `ground_offset` above the bottom of the world.
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_offset
    }

    /// Check a ground line override against the world: it must be finite and
    /// leave room for an actor between the top of the world and the line.
    pub fn validate_ground_line(&self, ground_y: f32) -> Result<(), ConfigError> {
        if !ground_y.is_finite() || ground_y < ACTOR_SIZE || ground_y > self.world_height {
            return Err(ConfigError::GroundLineOutOfWorld {
                ground_y,
                world_height: self.world_height,
            });
        }
        Ok(())
    }

    /// Reload duration on the tick clock, never shorter than one tick.
    pub fn reload_ticks(&self) -> u64 {
        let ticks = (self.reload_duration_ms as f64 * self.tick_rate_hz as f64 / 1000.0).round();
        (ticks as u64).max(1)
    }

    pub fn ticks_to_secs(&self, ticks: u64) -> f32 {
        ticks as f32 / self.tick_rate_hz as f32
    }
}
