//! Per-tick collision resolution.
//!
//! Hits are marked first and the containers compacted afterwards, so nothing
//! is removed while it is being iterated.

use tracing::{debug, info};

use crate::entities::{EnemyKind, Projectile, SimulationState};
use crate::geometry::check_collision;
use crate::physics;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    /// Shot by an enemy that is still alive.
    EnemyProjectile,
    /// Shot by a projectile whose owner had already been destroyed.
    OrphanProjectile,
    /// Touched by a melee enemy.
    Melee,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub killed: Vec<EnemyKind>,
    pub points: u32,
    pub player_death: Option<DeathCause>,
}

/// Resolve every hit for the current tick.
///
/// 1. Player shots against enemies: each shot removes at most the first enemy
///    it overlaps, in iteration order. The dead enemy's shots move to the
///    orphan pool.
/// 2. Melee enemies touching the player kill it.
/// 3. Each surviving enemy's shots against the player.
/// 4. All orphaned shots, old and new, advance and are tested against the
///    player.
///
/// Anything removed in one phase takes no part in the later ones.
pub fn resolve_collisions(state: &mut SimulationState) -> CollisionReport {
    let mut report = CollisionReport::default();

    let SimulationState {
        config,
        player,
        enemies,
        orphan_projectiles,
        score,
        ..
    } = state;

    // ── 1. Player projectiles ↔ enemies ──────────────────────────────────────
    let mut spent_shots = vec![false; player.projectiles.len()];
    let mut dead_enemies = vec![false; enemies.len()];
    let mut newly_orphaned: Vec<Projectile> = Vec::new();

    for (si, shot) in player.projectiles.iter().enumerate() {
        let shot_box = shot.bounds();
        for (ei, enemy) in enemies.iter_mut().enumerate() {
            if dead_enemies[ei] || !check_collision(&shot_box, &enemy.body.bounds()) {
                continue;
            }
            spent_shots[si] = true;
            dead_enemies[ei] = true;
            let points = enemy.kind.points();
            *score = score.saturating_add(points);
            report.points += points;
            report.killed.push(enemy.kind);
            newly_orphaned.append(&mut enemy.projectiles);
            debug!(kind = ?enemy.kind, points, score = *score, "enemy destroyed");
            break;
        }
    }

    compact(&mut player.projectiles, &spent_shots);
    compact(enemies, &dead_enemies);

    // ── 2. Melee contact ─────────────────────────────────────────────────────
    if player.alive {
        let player_box = player.body.bounds();
        let stabbed = enemies.iter().any(|enemy| {
            enemy.kind == EnemyKind::Melee
                && check_collision(&enemy.body.bounds(), &player_box)
        });
        if stabbed {
            player.alive = false;
            report.player_death = Some(DeathCause::Melee);
        }
    }

    // ── 3. Enemy projectiles ↔ player ────────────────────────────────────────
    for enemy in enemies.iter_mut() {
        if !player.alive {
            break;
        }
        let player_box = player.body.bounds();
        if let Some(hit) = enemy
            .projectiles
            .iter()
            .position(|p| check_collision(&p.bounds(), &player_box))
        {
            enemy.projectiles.remove(hit);
            player.alive = false;
            report.player_death = Some(DeathCause::EnemyProjectile);
        }
    }

    // ── 4. Orphaned projectiles ──────────────────────────────────────────────
    // Every orphan moves here, including shots that lost their owner this tick.
    orphan_projectiles.append(&mut newly_orphaned);
    physics::advance_all(
        orphan_projectiles,
        config.world_width,
        config.world_height,
        config.projectile_range,
    );

    if player.alive {
        let player_box = player.body.bounds();
        let before = orphan_projectiles.len();
        orphan_projectiles.retain(|p| !check_collision(&p.bounds(), &player_box));
        if orphan_projectiles.len() < before {
            player.alive = false;
            report.player_death = Some(DeathCause::OrphanProjectile);
        }
    }

    if let Some(cause) = report.player_death {
        info!(?cause, score = *score, "player killed");
    }

    report
}

/// Drop every element whose flag is set, preserving order.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut flags = removed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
