//! Horizontally scrolling tile map.
//!
//! The map is an unbounded strip of columns addressed by integer index.
//! Columns start absent; a level generator fills them in.

use std::collections::HashMap;

use crate::compute::usable_dt;
use crate::config::TileMapTuning;
use crate::entities::{Size, Vector2};
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
}

/// One column of tiles, bottom row first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Column {
    pub tiles: Vec<Tile>,
}

impl Column {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tile(&self, row: usize) -> Tile {
        self.tiles.get(row).copied().unwrap_or(Tile::Empty)
    }
}

#[derive(Clone, Debug)]
pub struct TileMap {
    columns: HashMap<i64, Column>,
    window: Size,
    scroll_speed: f32,
    tile_size: f32,
    /// World position of the window's bottom-left corner.
    bottom_left: Vector2,
    left_column: i64,
    right_column: i64,
}

impl TileMap {
    pub fn new(window: Size, tuning: TileMapTuning) -> Result<Self, GameError> {
        if !(tuning.tile_size.is_finite() && tuning.tile_size > 0.0) {
            return Err(GameError::InvalidArgument(format!(
                "tile size must be positive, got {}",
                tuning.tile_size
            )));
        }
        if !(window.width > 0.0 && window.height > 0.0) {
            return Err(GameError::InvalidArgument(format!(
                "window must be positive, got {}x{}",
                window.width, window.height
            )));
        }

        let mut map = Self {
            columns: HashMap::new(),
            window,
            scroll_speed: tuning.scroll_speed,
            tile_size: tuning.tile_size,
            bottom_left: Vector2::ZERO,
            left_column: 0,
            right_column: 0,
        };
        map.refresh_visible_columns();
        Ok(map)
    }

    /// Scroll right by `scroll_speed * dt`.
    pub fn update(&mut self, dt: f32) {
        let Some(dt) = usable_dt(dt) else {
            return;
        };
        self.bottom_left.x += self.scroll_speed * dt;
        self.refresh_visible_columns();
    }

    fn refresh_visible_columns(&mut self) {
        self.left_column = (self.bottom_left.x / self.tile_size).floor() as i64;
        self.right_column =
            ((self.bottom_left.x + self.window.width) / self.tile_size).floor() as i64;
    }

    pub fn column(&self, index: i64) -> Option<&Column> {
        self.columns.get(&index)
    }

    pub fn insert_column(&mut self, index: i64, column: Column) -> Option<Column> {
        self.columns.insert(index, column)
    }

    pub fn remove_column(&mut self, index: i64) -> Option<Column> {
        self.columns.remove(&index)
    }

    /// Forget columns that have scrolled off the left edge.
    pub fn discard_passed_columns(&mut self) -> usize {
        let left = self.left_column;
        let before = self.columns.len();
        self.columns.retain(|&index, _| index >= left);
        before - self.columns.len()
    }

    /// Inclusive range of column indices intersecting the window.
    pub fn visible_columns(&self) -> std::ops::RangeInclusive<i64> {
        self.left_column..=self.right_column
    }

    pub fn scroll_offset(&self) -> f32 {
        self.bottom_left.x
    }

    pub fn bottom_left(&self) -> Vector2 {
        self.bottom_left
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
