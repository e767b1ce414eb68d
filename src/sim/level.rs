//! Brick layouts built from tile grids
//!
//! A level file holds one row of whitespace-separated tile codes per line:
//! - `0`: empty
//! - `1`: solid (indestructible, doesn't count for clearing)
//! - `2`..=`5`: breakable, each with its own color

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::Entity;

/// Errors from loading a level
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Level has no tiles")]
    Empty,

    #[error("Row {row} has {found} tiles, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u32 },

    #[error("Invalid tile '{token}' at row {row}, column {col}")]
    InvalidNumber {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("No levels available")]
    NoLevels,
}

/// Decoded tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Solid,
    Breakable(u8),
}

pub const COLOR_SOLID: Vec3 = Vec3::new(0.8, 0.8, 0.7);
pub const COLOR_BREAKABLE: [Vec3; 4] = [
    Vec3::new(0.2, 0.6, 1.0),
    Vec3::new(0.0, 0.7, 0.0),
    Vec3::new(0.8, 0.8, 0.4),
    Vec3::new(1.0, 0.5, 0.0),
];

impl Tile {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Solid),
            2..=5 => Some(Tile::Breakable(code as u8)),
            _ => None,
        }
    }

    /// Brick tint, `None` for empty cells
    pub fn color(self) -> Option<Vec3> {
        match self {
            Tile::Empty => None,
            Tile::Solid => Some(COLOR_SOLID),
            Tile::Breakable(code) => COLOR_BREAKABLE.get(usize::from(code) - 2).copied(),
        }
    }
}

/// A validated rectangular grid of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: Vec<Vec<Tile>>,
}

impl TileGrid {
    /// Validate raw tile codes: non-empty, rectangular, known codes only
    pub fn from_codes(codes: Vec<Vec<u32>>) -> Result<Self, LevelError> {
        let expected = codes.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(LevelError::Empty);
        }

        let mut rows = Vec::with_capacity(codes.len());
        for (row, line) in codes.iter().enumerate() {
            if line.len() != expected {
                return Err(LevelError::RaggedRows {
                    row,
                    expected,
                    found: line.len(),
                });
            }
            let tiles = line
                .iter()
                .enumerate()
                .map(|(col, &code)| {
                    Tile::from_code(code).ok_or(LevelError::UnknownTile { row, col, code })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(tiles);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// Parse level text into a grid. Blank lines are skipped.
pub fn parse_tile_grid(text: &str) -> Result<TileGrid, LevelError> {
    let mut codes = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row = codes.len();
        let parsed = line
            .split_whitespace()
            .enumerate()
            .map(|(col, token)| {
                token.parse::<u32>().map_err(|_| LevelError::InvalidNumber {
                    row,
                    col,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        codes.push(parsed);
    }
    TileGrid::from_codes(codes)
}

/// Built-in level files, in selection order
const BUILTIN_LEVELS: [(&str, &str); 4] = [
    ("Standard", include_str!("../../levels/level0.txt")),
    ("A few small gaps", include_str!("../../levels/level1.txt")),
    ("Space invader", include_str!("../../levels/level2.txt")),
    ("Bounce galore", include_str!("../../levels/level3.txt")),
];

/// A set of bricks laid out over the top part of the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub bricks: Vec<Entity>,
    grid: Option<TileGrid>,
    area: Vec2,
}

impl Level {
    /// An empty level covering `width` x `height`
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            bricks: Vec::new(),
            grid: None,
            area: Vec2::new(width, height),
        }
    }

    /// The embedded levels, laid out over `width` x `height`
    pub fn builtin(width: f32, height: f32) -> Result<Vec<Level>, LevelError> {
        BUILTIN_LEVELS
            .iter()
            .map(|(name, text)| -> Result<Level, LevelError> {
                let mut level = Level::new(*name, width, height);
                level.load(parse_tile_grid(text)?);
                Ok(level)
            })
            .collect()
    }

    /// Replace the bricks with one per non-empty tile, on a uniform grid
    pub fn load(&mut self, grid: TileGrid) {
        let unit = Vec2::new(
            self.area.x / grid.columns() as f32,
            self.area.y / grid.rows() as f32,
        );

        self.bricks.clear();
        for (row, tiles) in grid.rows.iter().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                let Some(color) = tile.color() else { continue };
                let pos = Vec2::new(unit.x * col as f32, unit.y * row as f32);
                self.bricks.push(
                    Entity::new(pos, unit)
                        .with_color(color)
                        .solid(*tile == Tile::Solid),
                );
            }
        }

        log::info!(
            "Level '{}' loaded: {}x{} grid, {} bricks ({} breakable)",
            self.name,
            grid.rows(),
            grid.columns(),
            self.bricks.len(),
            self.breakable_count()
        );
        self.grid = Some(grid);
    }

    /// Read, parse and load a level file. On error the current bricks are kept.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let grid = parse_tile_grid(&text)?;
        self.load(grid);
        Ok(())
    }

    /// Rebuild every brick from the last loaded grid
    pub fn reload(&mut self) {
        if let Some(grid) = self.grid.take() {
            self.load(grid);
        }
    }

    /// True once every breakable brick is destroyed
    pub fn cleared(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    pub fn breakable_count(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid).count()
    }

    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    }
}
