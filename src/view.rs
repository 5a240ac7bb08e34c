//! One-way projection of simulation state onto element styles
//!
//! Nothing here is ever read back into the simulation.

use crate::scheduler::GameOverReport;
use crate::sim::{EnemyKind, PlayerSkin, Session};

const ICON_ASSET: &str = "wordpress.svg";
const EXPLOSION_ASSET: &str = "bomb-explosion.svg";

/// Inline style values for one positioned element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

impl ElementStyle {
    pub fn left_px(&self) -> String {
        px(self.left)
    }

    pub fn top_px(&self) -> String {
        px(self.top)
    }

    pub fn width_px(&self) -> String {
        px(self.width)
    }

    pub fn height_px(&self) -> String {
        px(self.height)
    }

    /// CSS `display` value
    pub fn display(&self) -> &'static str {
        if self.visible { "block" } else { "none" }
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneView {
    /// Container-relative
    pub player: ElementStyle,
    pub player_skin: PlayerSkin,
    /// Screen-space, roster order
    pub enemies: Vec<(EnemyKind, ElementStyle)>,
    /// Elapsed seconds, two decimals
    pub elapsed: String,
    pub level: String,
}

pub fn project(session: &Session) -> SceneView {
    let player = &session.player;
    SceneView {
        player: ElementStyle {
            left: player.pos.x,
            top: player.pos.y,
            width: player.size.x,
            height: player.size.y,
            visible: true,
        },
        player_skin: player.skin,
        enemies: session
            .enemies
            .iter()
            .map(|e| {
                (
                    e.kind,
                    ElementStyle {
                        left: e.pos.x,
                        top: e.pos.y,
                        width: e.size.x,
                        height: e.size.y,
                        visible: e.visible,
                    },
                )
            })
            .collect(),
        elapsed: session.clock.elapsed_display(),
        level: session.clock.level().to_string(),
    }
}

/// Swap the asset file name in an image `src` to match `skin`
pub fn skin_src(src: &str, skin: PlayerSkin) -> String {
    match skin {
        PlayerSkin::Icon => src.replace(EXPLOSION_ASSET, ICON_ASSET),
        PlayerSkin::Explosion => src.replace(ICON_ASSET, EXPLOSION_ASSET),
    }
}

/// Score line shown after a run
pub fn score_line(report: &GameOverReport) -> String {
    format!(
        "Level: {}. Time: {:.2} seconds.",
        report.level,
        report.elapsed_ms / 1000.0
    )
}

/// Full text of the game-over prompt
pub fn score_prompt(report: &GameOverReport) -> String {
    format!("Game over! Your score is: {}", score_line(report))
}
