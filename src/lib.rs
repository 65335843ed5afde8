pub mod camera;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod interface;
pub mod physics;
pub mod player;
pub mod session;
pub mod spawner;

pub use config::{GameConfig, ReloadPolicy};
pub use error::ConfigError;
pub use session::Session;
