use std::fmt;

/// Reasons a [`GameConfig`](crate::config::GameConfig) is rejected before a
/// session starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str },
    NotFinite { field: &'static str },
    ViewportLargerThanWorld {
        viewport: (f32, f32),
        world: (f32, f32),
    },
    GroundOutOfWorld { ground_offset: f32, world_height: f32 },
    /// A ground line override that is not finite or leaves actors outside
    /// the world.
    GroundLineOutOfWorld { ground_y: f32, world_height: f32 },
    /// `enemy_cap` below the number of enemies present at session start.
    CapBelowRoster { enemy_cap: usize, roster: usize },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::NotFinite { field } => write!(f, "{field} must be a finite number"),
            Self::ViewportLargerThanWorld { viewport, world } => write!(
                f,
                "viewport {}x{} does not fit inside world {}x{}",
                viewport.0, viewport.1, world.0, world.1
            ),
            Self::GroundOutOfWorld {
                ground_offset,
                world_height,
            } => write!(
                f,
                "ground offset {ground_offset} leaves no room for actors in a world {world_height} tall"
            ),
            Self::GroundLineOutOfWorld {
                ground_y,
                world_height,
            } => write!(
                f,
                "ground line {ground_y} must lie between {} and {world_height}",
                crate::entities::ACTOR_SIZE
            ),
            Self::CapBelowRoster { enemy_cap, roster } => write!(
                f,
                "enemy_cap {enemy_cap} is below the starting roster of {roster} enemies"
            ),
            Self::Parse(msg) => write!(f, "failed to parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
