//! Motion integration shared by every moving thing in the world.

use crate::entities::{Body, Projectile};

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landing {
    pub grounded: bool,
}

/// Advance `body` by one tick.
///
/// Position moves by the current velocity first and gravity is applied
/// afterwards, so a velocity change shows up in position one tick later.
/// The horizontal clamp and the ground snap both run after the move, which
/// lets a body sit past an edge for the duration of a single step before
/// being pulled back.
pub fn integrate(body: &mut Body, gravity: f32, world_width: f32, ground_y: f32) -> Landing {
    body.x += body.vx;
    body.y += body.vy;
    body.vy += gravity;

    clamp_horizontal(body, world_width);

    let grounded = body.y + body.height >= ground_y;
    if grounded {
        body.y = ground_y - body.height;
        body.vy = 0.0;
    }

    Landing { grounded }
}

pub fn clamp_horizontal(body: &mut Body, world_width: f32) {
    let max_x = (world_width - body.width).max(0.0);
    body.x = body.x.max(0.0).min(max_x);
}

/// Move a projectile one tick along its velocity.
///
/// Returns `true` once it has left the world on any axis or flown past
/// `range`, meaning the caller should drop it.
pub fn advance_projectile(
    projectile: &mut Projectile,
    world_width: f32,
    world_height: f32,
    range: Option<f32>,
) -> bool {
    projectile.x += projectile.vx;
    projectile.y += projectile.vy;
    projectile.distance_traveled += projectile.vx.hypot(projectile.vy);

    let out_of_world = projectile.x < 0.0
        || projectile.x > world_width
        || projectile.y < 0.0
        || projectile.y > world_height;
    let out_of_range = range.is_some_and(|max| projectile.distance_traveled >= max);

    out_of_world || out_of_range
}

/// Advance every projectile in `projectiles`, dropping the expired ones.
pub fn advance_all(
    projectiles: &mut Vec<Projectile>,
    world_width: f32,
    world_height: f32,
    range: Option<f32>,
) {
    projectiles.retain_mut(|p| !advance_projectile(p, world_width, world_height, range));
}
