//! Game tuning loaded from `assets/config/game.json`.
//!
//! Every field has a default, so the file may list only the values it wants
//! to override. Lengths are in internal (unscaled) pixels and velocities in
//! internal pixels per tick; `scale` converts both to display pixels.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::enemy::Enemy;
use crate::error::ConfigError;
use crate::level::GridCell;
use crate::player::PlayerConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub tile_size: u32,
    pub scale: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub tick_rate: u32,

    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_impulse: f32,
    pub player_speed: f32,
    pub player_size: [f32; 2],

    pub enemy_speed: f32,
    pub enemy_size: [f32; 2],
    pub patrol_range_tiles: f32,

    pub fallback_spawn: GridCell,
    pub overlay_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Tile Hop".to_string(),
            tile_size: 16,
            scale: 3,
            screen_width: 320,
            screen_height: 192,
            tick_rate: 60,

            gravity: 0.5,
            max_fall_speed: 10.0,
            jump_impulse: -8.0,
            player_speed: 2.0,
            player_size: [12.0, 16.0],

            enemy_speed: 1.0,
            enemy_size: [14.0, 14.0],
            patrol_range_tiles: 3.0,

            fallback_spawn: GridCell { x: 5, y: 5 },
            overlay_font_size: 18.0,
        }
    }
}

impl GameConfig {
    pub fn scale_factor(&self) -> f32 {
        self.scale as f32
    }

    /// Edge length of one tile in world (display) pixels.
    pub fn tile_world_size(&self) -> f32 {
        (self.tile_size * self.scale) as f32
    }

    pub fn screen_width_px(&self) -> u32 {
        self.screen_width * self.scale
    }

    pub fn screen_height_px(&self) -> u32 {
        self.screen_height * self.scale
    }

    /// World-space top-left corner of a grid cell.
    pub fn cell_to_world(&self, cell: GridCell) -> (f32, f32) {
        let tile = self.tile_world_size();
        (cell.x as f32 * tile, cell.y as f32 * tile)
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            move_speed: self.player_speed,
            gravity: self.gravity,
            max_fall_speed: self.max_fall_speed,
            jump_impulse: self.jump_impulse,
            scale: self.scale_factor(),
            screen_width: self.screen_width_px() as f32,
        }
    }

    pub fn spawn_enemy(&self, cell: GridCell) -> Enemy {
        let (w, h) = self.scaled_size(self.enemy_size);
        let (x, y) = self.place_in_cell(cell, w, h);
        Enemy::new(
            x,
            y,
            w,
            h,
            self.enemy_speed,
            self.patrol_range_tiles * self.tile_world_size(),
            self.scale_factor(),
        )
    }

    pub fn scaled_size(&self, size: [f32; 2]) -> (f32, f32) {
        (size[0] * self.scale_factor(), size[1] * self.scale_factor())
    }

    /// Center an entity horizontally in `cell` and rest it on the cell's
    /// bottom edge.
    pub fn place_in_cell(&self, cell: GridCell, width: f32, height: f32) -> (f32, f32) {
        let tile = self.tile_world_size();
        let (x, y) = self.cell_to_world(cell);
        (x + (tile - width) * 0.5, y + tile - height)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// A missing file falls back to defaults; a present but broken file is an error.
pub fn load_config_or_default(path: &Path) -> Result<GameConfig, ConfigError> {
    if !path.exists() {
        log::warn!(
            "Config '{}' not found, using built-in defaults",
            path.display()
        );
        return Ok(GameConfig::default());
    }
    let config = load_config_from_path(path)?;
    log::info!("Config loaded from '{}'", path.display());
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| -> Result<(), ConfigError> {
        Err(ConfigError::Invalid(msg.to_string()))
    };

    if config.tile_size == 0 {
        return invalid("tile_size must be > 0");
    }
    if config.scale == 0 {
        return invalid("scale must be > 0");
    }
    if config.screen_width == 0 || config.screen_height == 0 {
        return invalid("screen_width and screen_height must be > 0");
    }
    let scaled = [
        config.tile_size.checked_mul(config.scale),
        config.screen_width.checked_mul(config.scale),
        config.screen_height.checked_mul(config.scale),
    ];
    if scaled.iter().any(Option::is_none) {
        return invalid("tile_size and screen size times scale must fit in u32");
    }
    if config.tick_rate == 0 {
        return invalid("tick_rate must be > 0");
    }
    if config.gravity <= 0.0 {
        return invalid("gravity must be > 0");
    }
    if config.max_fall_speed <= 0.0 {
        return invalid("max_fall_speed must be > 0");
    }
    if config.jump_impulse >= 0.0 {
        return invalid("jump_impulse must be negative (screen y points down)");
    }
    if config.player_speed < 0.0 || config.enemy_speed < 0.0 {
        return invalid("speeds must be >= 0");
    }
    if config.patrol_range_tiles < 0.0 {
        return invalid("patrol_range_tiles must be >= 0");
    }
    let mut sizes = config.player_size.iter().chain(config.enemy_size.iter());
    if sizes.any(|&s| s <= 0.0) {
        return invalid("entity sizes must be > 0");
    }
    if config.overlay_font_size <= 0.0 {
        return invalid("overlay_font_size must be > 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hop_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_are_valid() {
        validate_config(&GameConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn derived_sizes_follow_scale() {
        let config = GameConfig::default();
        assert_eq!(config.tile_world_size(), 48.0);
        assert_eq!(config.screen_width_px(), 960);
        assert_eq!(config.screen_height_px(), 576);
        assert_eq!(config.cell_to_world(GridCell { x: 3, y: 2 }), (144.0, 96.0));
    }

    #[test]
    fn place_in_cell_rests_on_cell_bottom() {
        let config = GameConfig::default();
        let (x, y) = config.place_in_cell(GridCell { x: 1, y: 1 }, 36.0, 48.0);
        assert_eq!(x, 48.0 + 6.0);
        assert_eq!(y, 48.0);
    }

    #[test]
    fn partial_file_overrides_only_listed_fields() {
        let path = temp_file_path("partial");
        fs::write(&path, r#"{ "scale": 2, "gravity": 0.25 }"#).expect("write temp file");

        let config = load_config_from_path(&path).expect("partial config should load");
        assert_eq!(config.scale, 2);
        assert_eq!(config.gravity, 0.25);
        assert_eq!(config.tile_size, GameConfig::default().tile_size);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let path = temp_file_path("zero_scale");
        fs::write(&path, r#"{ "scale": 0 }"#).expect("write temp file");

        let err = load_config_from_path(&path).expect_err("zero scale should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("scale"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn positive_jump_impulse_is_rejected() {
        let config = GameConfig {
            jump_impulse: 4.0,
            ..GameConfig::default()
        };
        let err = validate_config(&config).expect_err("upward jump must be negative");
        assert!(err.to_string().contains("jump_impulse"));
    }

    #[test]
    fn scaled_sizes_overflowing_u32_are_rejected() {
        let path = temp_file_path("overflow");
        fs::write(&path, r#"{ "tile_size": 100000, "scale": 100000 }"#).expect("write temp file");

        let err = load_config_from_path(&path).expect_err("overflowing tile size should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn oversized_screen_is_rejected() {
        let config = GameConfig {
            screen_height: u32::MAX / 2,
            ..GameConfig::default()
        };
        let err = validate_config(&config).expect_err("screen height times scale overflows");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_gravity_is_rejected() {
        let config = GameConfig {
            gravity: 0.0,
            ..GameConfig::default()
        };
        let err = validate_config(&config).expect_err("player could never land");
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let path = temp_file_path("malformed");
        fs::write(&path, "{ not json").expect("write temp file");

        let err = load_config_from_path(&path).expect_err("malformed json should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        let config = load_config_or_default(&path).expect("missing file is not an error");
        assert_eq!(config, GameConfig::default());
    }
}
