//! Per-frame simulation step
//!
//! Fixed order: clock, player, enemies, collision.

use super::state::{EnemyKind, GamePhase, Session};
use super::{HeldDirections, collision, enemy, player};
use crate::consts::FRAME_DELTA_DIVISOR;

/// What a tick left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running
    Continue,
    /// This tick ended the run
    Collision(EnemyKind),
    /// Session was already over; nothing ran
    Halted,
}

/// Advance the session by one animation frame of `progress_ms`
pub fn tick(session: &mut Session, held: HeldDirections, progress_ms: f64) -> TickOutcome {
    if session.phase != GamePhase::Running {
        return TickOutcome::Halted;
    }

    let reading = session.clock.advance(progress_ms);

    let delta = (progress_ms / FRAME_DELTA_DIVISOR) as f32;
    player::step(&mut session.player, held, session.player_speed, delta);

    enemy::step(
        &mut session.enemies,
        &session.container,
        reading.enemy_speed,
        &mut session.rng,
    );

    let player_box = session.player.bounds(&session.container);
    match collision::check(&player_box, &session.enemies, session.hit_box_shrink) {
        Some(kind) => {
            session.phase = GamePhase::GameOver;
            session.killer = Some(kind);
            TickOutcome::Collision(kind)
        }
        None => TickOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Horizontal, Vertical};
    use crate::Rect;
    use glam::Vec2;

    fn session(seed: u64) -> Session {
        let mut session = Session::new(seed, Rect::container_at(0.0, 0.0), &Settings::default());
        session.spawn_enemies();
        session
    }

    #[test]
    fn test_tick_moves_player_and_enemies() {
        let mut s = session(11);
        let before: Vec<Vec2> = s.enemies.iter().map(|e| e.pos).collect();
        let held = HeldDirections {
            right: true,
            ..Default::default()
        };

        // 30ms / 60 * 20px = 10px
        let outcome = tick(&mut s, held, 30.0);
        assert_ne!(outcome, TickOutcome::Halted);
        assert_eq!(s.player.pos, Vec2::new(285.0, 275.0));
        assert_eq!(s.clock.elapsed_ms(), 30.0);
        for (enemy, old) in s.enemies.iter().zip(before) {
            assert_eq!((enemy.pos - old).abs(), Vec2::splat(1.75));
        }
    }

    #[test]
    fn test_collision_ends_run() {
        let mut s = session(3);
        // Park the last enemy on the player
        let target = s.container.origin + s.player.pos;
        let last = s.enemies.last_mut().unwrap();
        last.pos = target;
        last.horizontal = Horizontal::Right;
        last.vertical = Vertical::Down;
        // Keep everybody else far away in a corner
        for enemy in s.enemies.iter_mut().take(5) {
            enemy.pos = Vec2::new(10.0, 10.0);
        }

        let outcome = tick(&mut s, HeldDirections::default(), 16.0);
        assert_eq!(outcome, TickOutcome::Collision(EnemyKind::Contentful));
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.killer, Some(EnemyKind::Contentful));

        // Terminal: nothing moves any more
        let frozen = s.enemies[0].pos;
        assert_eq!(tick(&mut s, HeldDirections::default(), 16.0), TickOutcome::Halted);
        assert_eq!(s.enemies[0].pos, frozen);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = session(99);
        let mut b = session(99);
        let held = HeldDirections {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..240 {
            let oa = tick(&mut a, held, 16.7);
            let ob = tick(&mut b, held, 16.7);
            assert_eq!(oa, ob);
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.horizontal, eb.horizontal);
        }
        assert_eq!(a.player.pos, b.player.pos);
    }
}
