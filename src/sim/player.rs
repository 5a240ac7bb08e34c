//! Keyboard-driven player movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::{PLAYER_MAX, PLAYER_MIN};

/// One arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(MoveDirection::Up),
            "ArrowDown" => Some(MoveDirection::Down),
            "ArrowLeft" => Some(MoveDirection::Left),
            "ArrowRight" => Some(MoveDirection::Right),
            _ => None,
        }
    }
}

/// Currently held arrow keys (non-exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn set(&mut self, direction: MoveDirection, held: bool) {
        match direction {
            MoveDirection::Up => self.up = held,
            MoveDirection::Down => self.down = held,
            MoveDirection::Left => self.left = held,
            MoveDirection::Right => self.right = held,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Move the player by `speed * delta` per held direction.
///
/// A direction whose move would leave `[PLAYER_MIN, PLAYER_MAX]` is skipped for
/// this step; the player is never snapped onto the bound.
pub fn step(player: &mut Player, held: HeldDirections, speed: f32, delta: f32) -> Vec2 {
    let movement = speed * delta;
    let pos = &mut player.pos;

    let apply = |axis: &mut f32, amount: f32| {
        let next = *axis + amount;
        if (PLAYER_MIN..=PLAYER_MAX).contains(&next) {
            *axis = next;
        }
    };

    if held.up {
        apply(&mut pos.y, -movement);
    }
    if held.down {
        apply(&mut pos.y, movement);
    }
    if held.left {
        apply(&mut pos.x, -movement);
    }
    if held.right {
        apply(&mut pos.x, movement);
    }

    player.pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> HeldDirections {
        HeldDirections {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut player = Player::default();
        let pos = step(&mut player, HeldDirections::default(), 20.0, 1.0);
        assert_eq!(pos, Vec2::splat(275.0));
    }

    #[test]
    fn test_diagonal_motion() {
        let mut player = Player::default();
        let pos = step(&mut player, held(true, false, false, true), 20.0, 0.5);
        assert_eq!(pos, Vec2::new(285.0, 265.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut player = Player::default();
        let pos = step(&mut player, held(true, true, true, true), 20.0, 1.0);
        assert_eq!(pos, Vec2::splat(275.0));
    }

    #[test]
    fn test_refuses_to_cross_bounds() {
        let mut player = Player {
            pos: Vec2::new(6.0, 540.0),
            ..Default::default()
        };
        // Left would land on -14, down on 560: both refused
        let pos = step(&mut player, held(false, true, true, false), 20.0, 1.0);
        assert_eq!(pos, Vec2::new(6.0, 540.0));

        // A smaller move lands exactly on the bounds
        let pos = step(&mut player, held(false, true, true, false), 20.0, 0.25);
        assert_eq!(pos, Vec2::new(1.0, 545.0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(MoveDirection::from_key("ArrowLeft"), Some(MoveDirection::Left));
        assert_eq!(MoveDirection::from_key("a"), None);

        let mut keys = HeldDirections::default();
        keys.set(MoveDirection::Down, true);
        assert!(keys.down && !keys.is_empty());
        keys.set(MoveDirection::Down, false);
        assert!(keys.is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            moves in prop::collection::vec((any::<[bool; 4]>(), 0.0f32..3.0), 1..300)
        ) {
            let mut player = Player::default();
            for ([up, down, left, right], delta) in moves {
                let pos = step(&mut player, held(up, down, left, right), 20.0, delta);
                prop_assert!(crate::within(pos, PLAYER_MIN, PLAYER_MAX));
            }
        }
    }
}
