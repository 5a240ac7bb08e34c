//! Session state and core simulation types
//!
//! A `Session` owns everything one game needs. Reset builds a fresh one.

use glam::Vec2;
use rand::distr::{Distribution, StandardUniform};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use crate::consts::*;
use crate::settings::Settings;
use crate::{Rect, within};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// A collision ended the run; display only from here on
    GameOver,
}

/// Horizontal heading of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Right,
}

/// Vertical heading of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    Up,
    Down,
}

impl Distribution<Horizontal> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Horizontal {
        if rng.random_bool(0.5) {
            Horizontal::Left
        } else {
            Horizontal::Right
        }
    }
}

impl Distribution<Vertical> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vertical {
        if rng.random_bool(0.5) {
            Vertical::Up
        } else {
            Vertical::Down
        }
    }
}

impl Horizontal {
    /// Unit step along x
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Right => 1.0,
        }
    }
}

impl Vertical {
    /// Unit step along y (screen y grows downward)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Vertical::Up => -1.0,
            Vertical::Down => 1.0,
        }
    }
}

/// The fixed enemy roster, in collision priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Wix,
    Squarespace,
    Weebly,
    Shopify,
    Webflow,
    Contentful,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; ENEMY_COUNT] = [
        EnemyKind::Wix,
        EnemyKind::Squarespace,
        EnemyKind::Weebly,
        EnemyKind::Shopify,
        EnemyKind::Webflow,
        EnemyKind::Contentful,
    ];

    /// Element id of this enemy's icon
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Wix => "wix",
            EnemyKind::Squarespace => "squarespace",
            EnemyKind::Weebly => "weebly",
            EnemyKind::Shopify => "shopify",
            EnemyKind::Webflow => "webflow",
            EnemyKind::Contentful => "contentful",
        }
    }
}

/// A roaming enemy icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Screen-space position (top-left corner)
    pub pos: Vec2,
    pub size: Vec2,
    pub horizontal: Horizontal,
    pub vertical: Vertical,
    /// Hidden until spawned; hidden enemies never collide
    pub visible: bool,
}

impl Enemy {
    /// Unspawned enemy with random headings, parked at the container origin
    pub fn new<R: Rng + ?Sized>(kind: EnemyKind, container: &Rect, rng: &mut R) -> Self {
        Self {
            kind,
            pos: container.origin,
            size: Vec2::splat(ENEMY_SIZE),
            horizontal: rng.random(),
            vertical: rng.random(),
            visible: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            origin: self.pos,
            size: self.size,
        }
    }
}

/// How the player icon is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSkin {
    Icon,
    Explosion,
}

/// The player's icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position relative to the container origin
    pub pos: Vec2,
    pub size: Vec2,
    pub skin: PlayerSkin,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(PLAYER_START),
            size: Vec2::splat(PLAYER_SIZE),
            skin: PlayerSkin::Icon,
        }
    }
}

impl Player {
    /// Screen-space bounding box
    pub fn bounds(&self, container: &Rect) -> Rect {
        Rect {
            origin: container.origin + self.pos,
            size: self.size,
        }
    }

    /// Swap to the enlarged explosion sprite, centered on the old icon.
    /// The result may overflow the container.
    pub fn explode(&mut self) {
        self.pos -= Vec2::splat(EXPLOSION_OFFSET);
        self.size = Vec2::splat(EXPLOSION_SIZE);
        self.skin = PlayerSkin::Explosion;
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Container bounds captured at session start
    pub container: Rect,
    pub clock: GameClock,
    pub phase: GamePhase,
    pub player: Player,
    /// Always `ENEMY_COUNT` entries, in roster order
    pub enemies: Vec<Enemy>,
    /// Enemy that ended the run
    pub killer: Option<EnemyKind>,
    /// Player movement per delta unit
    pub player_speed: f32,
    /// Hit box shrink divisor
    pub hit_box_shrink: f32,
}

impl Session {
    /// Fresh session: running, level 1, enemies hidden with random headings
    pub fn new(seed: u64, container: Rect, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let enemies = EnemyKind::ALL
            .iter()
            .map(|&kind| Enemy::new(kind, &container, &mut rng))
            .collect();

        Self {
            seed,
            rng,
            container,
            clock: GameClock::new(
                settings.base_enemy_speed,
                settings.enemy_speed_step,
                settings.level_interval_secs,
            ),
            phase: GamePhase::Running,
            player: Player::default(),
            enemies,
            killer: None,
            player_speed: settings.player_speed,
            hit_box_shrink: settings.hit_box_shrink,
        }
    }

    /// Place every enemy at a random spot in the container (outside the
    /// dead-zone) and make it visible
    pub fn spawn_enemies(&mut self) {
        let container = self.container;
        for enemy in &mut self.enemies {
            let pos = loop {
                let offset = Vec2::new(
                    self.rng.random_range(0..=CONTAINER_SIZE as u32) as f32,
                    self.rng.random_range(0..=CONTAINER_SIZE as u32) as f32,
                );
                if !within(offset, DEAD_ZONE_MIN, DEAD_ZONE_MAX) {
                    break container.origin + offset;
                }
            };
            log::debug!("Spawned {} at ({}, {})", enemy.kind.as_str(), pos.x, pos.y);
            enemy.pos = pos;
            enemy.visible = true;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
