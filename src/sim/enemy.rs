//! Enemy roaming: constant-speed diagonal motion with edge reflection
//!
//! Reflection is decided one step ahead of the move, so an enemy is never
//! drawn past an edge. Once per frame one random enemy that sits in the
//! central dead-zone gets fresh random headings.

use rand::Rng;

use super::state::{Enemy, Horizontal, Vertical};
use crate::consts::{DEAD_ZONE_MAX, DEAD_ZONE_MIN, ENEMY_FAR_EDGE, ENEMY_NEAR_EDGE};
use crate::{Rect, within};

/// Advance every enemy by `speed` on both axes
pub fn step<R: Rng + ?Sized>(enemies: &mut [Enemy], container: &Rect, speed: f32, rng: &mut R) {
    if enemies.is_empty() {
        return;
    }

    let candidate = rng.random_range(0..enemies.len());
    shuffle_if_in_dead_zone(&mut enemies[candidate], container, rng);

    for enemy in enemies.iter_mut() {
        reflect_ahead(enemy, container, speed);
        enemy.pos.x += enemy.horizontal.sign() * speed;
        enemy.pos.y += enemy.vertical.sign() * speed;
    }
}

/// Re-roll both headings when the enemy sits in the dead-zone. Position is
/// left alone, so a stalled enemy may linger there for several frames.
fn shuffle_if_in_dead_zone<R: Rng + ?Sized>(enemy: &mut Enemy, container: &Rect, rng: &mut R) {
    if within(container.to_local(enemy.pos), DEAD_ZONE_MIN, DEAD_ZONE_MAX) {
        enemy.horizontal = rng.random();
        enemy.vertical = rng.random();
    }
}

/// Force the heading away from any edge the next step would reach
fn reflect_ahead(enemy: &mut Enemy, container: &Rect, speed: f32) {
    let next_x = enemy.pos.x + enemy.horizontal.sign() * speed;
    if next_x >= container.left() + ENEMY_FAR_EDGE {
        enemy.horizontal = Horizontal::Left;
    }
    if next_x <= container.left() + ENEMY_NEAR_EDGE {
        enemy.horizontal = Horizontal::Right;
    }

    let next_y = enemy.pos.y + enemy.vertical.sign() * speed;
    if next_y >= container.top() + ENEMY_FAR_EDGE {
        enemy.vertical = Vertical::Up;
    }
    if next_y <= container.top() + ENEMY_NEAR_EDGE {
        enemy.vertical = Vertical::Down;
    }
}
