use crate::config::GameConfig;
use crate::entities::{Body, Camera};

/// Centre the camera on `target`, keeping the viewport inside the world.
pub fn update_camera(camera: &mut Camera, target: &Body, config: &GameConfig) {
    let (cx, cy) = target.center();
    let max_x = (config.world_width - config.viewport_width).max(0.0);
    let max_y = (config.world_height - config.viewport_height).max(0.0);

    camera.x = (cx - config.viewport_width / 2.0).max(0.0).min(max_x);
    camera.y = (cy - config.viewport_height / 2.0).max(0.0).min(max_y);
}
