//! Sprite atlas geometry.
//!
//! An agent's sprites live in one image laid out as a grid of equally sized
//! tiles, numbered left to right, top to bottom. [`SpriteAtlas`] maps a
//! frame's `spriteIndex` to the pixel rectangle of its tile; loading and
//! drawing the image is up to the window layer.

use bevy_ecs::prelude::Resource;

use crate::resources::animationconfig::AnimationConfig;

/// Source rectangle of one tile, in atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAtlas {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tiles per atlas row, at least 1.
    pub columns: u32,
}

impl SpriteAtlas {
    /// Atlas for an image `sheet_width` pixels wide. A width of 0 (unknown)
    /// treats the whole atlas as a single row.
    pub fn new(tile_width: u32, tile_height: u32, sheet_width: u32) -> Self {
        let columns = if sheet_width == 0 {
            u32::MAX
        } else {
            (sheet_width / tile_width.max(1)).max(1)
        };
        Self {
            tile_width,
            tile_height,
            columns,
        }
    }

    pub fn for_config(config: &AnimationConfig, sheet_width: u32) -> Self {
        Self::new(config.tile_width(), config.tile_height(), sheet_width)
    }

    /// Rectangle for `sprite_index`; `None` for the empty sprite `-1`.
    pub fn tile_rect(&self, sprite_index: i32) -> Option<TileRect> {
        let index = u32::try_from(sprite_index).ok()?;
        let column = index % self.columns;
        let row = index / self.columns;
        Some(TileRect {
            x: column.saturating_mul(self.tile_width),
            y: row.saturating_mul(self.tile_height),
            width: self.tile_width,
            height: self.tile_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_walks_rows_left_to_right() {
        let atlas = SpriteAtlas::new(124, 93, 3348);
        assert_eq!(atlas.columns, 27);
        assert_eq!(
            atlas.tile_rect(0),
            Some(TileRect {
                x: 0,
                y: 0,
                width: 124,
                height: 93
            })
        );
        let rect = atlas.tile_rect(28).unwrap();
        assert_eq!((rect.x, rect.y), (124, 93));
    }

    #[test]
    fn empty_sprite_has_no_rect() {
        let atlas = SpriteAtlas::new(10, 10, 100);
        assert_eq!(atlas.tile_rect(-1), None);
    }

    #[test]
    fn unknown_sheet_width_is_one_row() {
        let atlas = SpriteAtlas::new(10, 20, 0);
        let rect = atlas.tile_rect(500).unwrap();
        assert_eq!((rect.x, rect.y), (5000, 0));
    }
}
