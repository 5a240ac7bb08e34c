//! Player/enemy contact test
//!
//! Plain AABB overlap, except each box is shrunk by `shrink` on both axes first
//! so grazing the sprite edges does not count.

use super::state::{Enemy, EnemyKind};
use crate::Rect;

/// Whether two boxes overlap after dividing each box's size by `shrink`
pub fn boxes_overlap(a: &Rect, b: &Rect, shrink: f32) -> bool {
    let a_size = a.size / shrink;
    let b_size = b.size / shrink;

    a.left() < b.left() + b_size.x
        && a.left() + a_size.x > b.left()
        && a.top() < b.top() + b_size.y
        && a.top() + a_size.y > b.top()
}

/// First visible enemy (roster order) touching the player
pub fn check(player: &Rect, enemies: &[Enemy], shrink: f32) -> Option<EnemyKind> {
    enemies
        .iter()
        .filter(|e| e.visible)
        .find(|e| boxes_overlap(player, &e.bounds(), shrink))
        .map(|e| e.kind)
}
