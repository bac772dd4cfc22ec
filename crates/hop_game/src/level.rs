//! Hardcoded tile layout and the parser that turns it into spawn descriptors.
//!
//! Palette: `#` platform, `P` player start, `E` enemy start. Anything else is
//! air. Each `#` becomes its own one-tile platform; runs are not merged.

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_LEVEL: &[&str] = &[
    "....................",
    "....................",
    "....................",
    "..............E.....",
    "............######..",
    "....................",
    "......E.............",
    "....#######.........",
    "....................",
    "..P.............E...",
    "####################",
    "####################",
];

const PLATFORM_TILE: char = '#';
const PLAYER_TILE: char = 'P';
const ENEMY_TILE: char = 'E';

/// Tile coordinate: `x` is the column, `y` the row.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Platform,
    PlayerStart,
    EnemyStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub cell: GridCell,
}

#[derive(Debug, Clone, Default)]
pub struct LevelLayout {
    pub width: usize,
    pub height: usize,
    /// Row-major scan order.
    pub spawns: Vec<Spawn>,
}

impl LevelLayout {
    pub fn player_start(&self) -> Option<GridCell> {
        self.cells_of(SpawnKind::PlayerStart).next()
    }

    pub fn platforms(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells_of(SpawnKind::Platform)
    }

    pub fn enemies(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells_of(SpawnKind::EnemyStart)
    }

    fn cells_of(&self, kind: SpawnKind) -> impl Iterator<Item = GridCell> + '_ {
        self.spawns
            .iter()
            .filter(move |spawn| spawn.kind == kind)
            .map(|spawn| spawn.cell)
    }
}

pub fn parse_level<S: AsRef<str>>(rows: &[S]) -> Result<LevelLayout, ConfigError> {
    let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
    let mut layout = LevelLayout {
        width,
        height: rows.len(),
        spawns: Vec::new(),
    };
    let mut player_seen = false;

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != width {
            return Err(ConfigError::RaggedLevel {
                row: y,
                expected: width,
                found,
            });
        }

        for (x, tile) in row.chars().enumerate() {
            let cell = GridCell {
                x: x as u32,
                y: y as u32,
            };
            let kind = match tile {
                PLATFORM_TILE => SpawnKind::Platform,
                PLAYER_TILE if !player_seen => {
                    player_seen = true;
                    SpawnKind::PlayerStart
                }
                ENEMY_TILE => SpawnKind::EnemyStart,
                _ => continue,
            };
            layout.spawns.push(Spawn { kind, cell });
        }
    }

    Ok(layout)
}
