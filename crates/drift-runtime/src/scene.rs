//! Scene contents: the floor, the player and the frame they draw into

use drift_core::{Color, Rect, Size, TextureId, Vec2};

/// Default player speed, in pixels per frame
pub const DEFAULT_PLAYER_SPEED: f32 = 8.0;

/// A texture loaded by the platform, sized from its source image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub size: Size,
}

/// One textured rectangle to blit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub rect: Rect,
}

/// Everything the platform needs to draw one frame, in back-to-front order
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub clear_color: Color,
    pub sprites: Vec<SpriteDraw>,
}

/// The player-controlled sprite
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub speed: f32,
    pub texture: Option<Texture>,
}

impl Player {
    /// A player at the origin with no texture yet
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            speed,
            texture: None,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_SPEED)
    }
}

/// The static background sprite
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Floor {
    pub position: Vec2,
    pub texture: Option<Texture>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub clear_color: Color,
    pub floor: Floor,
    pub player: Player,
}

impl Scene {
    pub fn new(player_speed: f32) -> Self {
        Self {
            clear_color: Color::WHITE,
            floor: Floor::default(),
            player: Player::new(player_speed),
        }
    }

    /// Build the draw list: floor first, player on top. Unloaded sprites are skipped.
    pub fn frame(&self) -> Frame {
        let sprites = [
            (self.floor.texture, self.floor.position),
            (self.player.texture, self.player.position),
        ]
        .into_iter()
        .filter_map(|(texture, position)| {
            texture.map(|t| SpriteDraw {
                texture: t.id,
                rect: Rect::at(position, t.size),
            })
        })
        .collect();

        Frame {
            clear_color: self.clear_color,
            sprites,
        }
    }
}
