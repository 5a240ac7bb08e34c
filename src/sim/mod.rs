//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod state;
pub mod tick;

pub use clock::{ClockReading, GameClock};
pub use collision::boxes_overlap;
pub use player::{HeldDirections, MoveDirection};
pub use state::{Enemy, EnemyKind, GamePhase, Horizontal, Player, PlayerSkin, Session, Vertical};
pub use tick::{TickOutcome, tick};
