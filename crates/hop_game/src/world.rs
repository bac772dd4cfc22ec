//! Simulation context: every entity of the running level plus the ordered
//! per-tick update pass (player against platforms, then each enemy).

use hop_core::input::{InputEvent, Key};
use serde::Deserialize;

use crate::collision::Aabb;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::entity::{EntityKind, EntityRef, Platform};
use crate::error::ConfigError;
use crate::level::{parse_level, LevelLayout};
use crate::player::Player;

/// Player intent derived from discrete key transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    StopLeft,
    StopRight,
    Jump,
}

impl Command {
    /// Quit is handled by the frame loop, not the world.
    pub fn from_input(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::Pressed(Key::Left) => Some(Self::MoveLeft),
            InputEvent::Pressed(Key::Right) => Some(Self::MoveRight),
            InputEvent::Pressed(Key::Jump) => Some(Self::Jump),
            InputEvent::Released(Key::Left) => Some(Self::StopLeft),
            InputEvent::Released(Key::Right) => Some(Self::StopRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub tick_count: u64,
}

impl World {
    pub fn load<S: AsRef<str>>(rows: &[S], config: &GameConfig) -> Result<Self, ConfigError> {
        let layout = parse_level(rows)?;
        Ok(Self::from_layout(&layout, config))
    }

    pub fn from_layout(layout: &LevelLayout, config: &GameConfig) -> Self {
        let tile = config.tile_world_size();

        let platforms: Vec<Platform> = layout
            .platforms()
            .map(|cell| {
                let (x, y) = config.cell_to_world(cell);
                Platform {
                    aabb: Aabb::new(x, y, tile, tile),
                }
            })
            .collect();

        let enemies: Vec<Enemy> = layout
            .enemies()
            .map(|cell| config.spawn_enemy(cell))
            .collect();

        let player_cell = layout.player_start().unwrap_or_else(|| {
            log::warn!(
                "Level has no player start, spawning at fallback tile ({}, {})",
                config.fallback_spawn.x,
                config.fallback_spawn.y
            );
            config.fallback_spawn
        });
        let (w, h) = config.scaled_size(config.player_size);
        let (x, y) = config.place_in_cell(player_cell, w, h);
        let player = Player::new(Aabb::new(x, y, w, h), config.player_config());

        log::info!(
            "Level loaded: {}x{} tiles, {} platforms, {} enemies, player at ({}, {})",
            layout.width,
            layout.height,
            platforms.len(),
            enemies.len(),
            player_cell.x,
            player_cell.y
        );

        Self {
            player,
            platforms,
            enemies,
            tick_count: 0,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.player.move_left(),
            Command::MoveRight => self.player.move_right(),
            Command::StopLeft => self.player.stop_left(),
            Command::StopRight => self.player.stop_right(),
            Command::Jump => self.player.jump(),
        }
    }

    pub fn tick(&mut self) {
        self.player.update(&self.platforms);
        for enemy in &mut self.enemies {
            enemy.update();
        }
        self.tick_count += 1;
    }

    /// Flat draw-order view: platforms, then enemies, then the player on top.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.platforms
            .iter()
            .map(EntityRef::Platform)
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(std::iter::once(EntityRef::Player(&self.player)))
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities().filter(|entity| entity.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{GridCell, DEFAULT_LEVEL};

    fn load(rows: &[&str]) -> World {
        World::load(rows, &GameConfig::default()).expect("level should load")
    }

    #[test]
    fn missing_player_marker_uses_fallback_tile() {
        let config = GameConfig::default();
        let world = load(&["....", "####"]);
        let (w, h) = config.scaled_size(config.player_size);
        let (x, y) = config.place_in_cell(GridCell { x: 5, y: 5 }, w, h);
        assert_eq!(world.player.aabb, Aabb::new(x, y, w, h));
        assert_eq!(world.count(EntityKind::Player), 1);
    }

    #[test]
    fn player_spawns_in_its_marker_tile() {
        let config = GameConfig::default();
        let world = load(&["......", "......", "...P.."]);
        let tile = config.tile_world_size();
        let aabb = world.player.aabb;
        assert!(aabb.left() >= 3.0 * tile && aabb.right() <= 4.0 * tile);
        assert_eq!(aabb.bottom(), 3.0 * tile);
    }

    #[test]
    fn platforms_map_tiles_to_world_space() {
        let world = load(&["..", ".#"]);
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].aabb, Aabb::new(48.0, 48.0, 48.0, 48.0));
    }

    #[test]
    fn ragged_level_fails_to_load() {
        let err = World::load(&["...", ".."], &GameConfig::default())
            .expect_err("ragged level must fail");
        assert!(matches!(err, ConfigError::RaggedLevel { .. }));
    }

    #[test]
    fn entities_cover_every_spawn_once() {
        let world = load(DEFAULT_LEVEL);
        let total = world.entities().count();
        assert_eq!(total, world.platforms.len() + world.enemies.len() + 1);
        assert_eq!(world.count(EntityKind::Enemy), 3);
        assert!(matches!(world.entities().last(), Some(EntityRef::Player(_))));
    }

    #[test]
    fn command_mapping_follows_key_transitions() {
        assert_eq!(
            Command::from_input(InputEvent::Pressed(Key::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            Command::from_input(InputEvent::Released(Key::Right)),
            Some(Command::StopRight)
        );
        assert_eq!(
            Command::from_input(InputEvent::Pressed(Key::Jump)),
            Some(Command::Jump)
        );
        assert_eq!(Command::from_input(InputEvent::Released(Key::Jump)), None);
        assert_eq!(Command::from_input(InputEvent::Pressed(Key::Quit)), None);
    }

    #[test]
    fn player_settles_on_default_level_floor() {
        let mut world = load(DEFAULT_LEVEL);
        for _ in 0..30 {
            world.tick();
        }
        assert!(world.player.grounded);
        assert_eq!(world.player.aabb.bottom(), 10.0 * 48.0);
        assert_eq!(world.tick_count, 30);
    }

    #[test]
    fn released_opposite_key_does_not_stop_motion() {
        let mut world = load(DEFAULT_LEVEL);
        world.apply(Command::MoveLeft);
        world.apply(Command::MoveRight);
        world.apply(Command::StopLeft);
        assert!(world.player.velocity_x > 0.0);
    }

    #[test]
    fn enemies_advance_every_tick() {
        let mut world = load(&["E..", "..."]);
        let start = world.enemies[0].aabb.x;
        world.tick();
        assert!(world.enemies[0].aabb.x > start);
    }
}
