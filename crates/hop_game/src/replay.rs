use crate::error::ConfigError;
use crate::world::Command;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayScript {
    pub frames: Vec<ReplayFrame>,
}

/// `commands` are issued once, on the first of the `repeat` ticks.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayScript {
    /// One entry per simulated tick.
    pub fn expanded_ticks(&self) -> Vec<Vec<Command>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            out.push(frame.commands.clone());
            for _ in 1..frame.repeat.max(1) {
                out.push(Vec::new());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplayScript, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let replay: ReplayScript = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if replay.frames.is_empty() {
        return Err(ConfigError::Invalid("replay frames list is empty".to_string()));
    }
    Ok(replay)
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::level::DEFAULT_LEVEL;
    use crate::world::World;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hop_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn run(script: &ReplayScript) -> World {
        let mut world =
            World::load(DEFAULT_LEVEL, &GameConfig::default()).expect("built-in level loads");
        for commands in script.expanded_ticks() {
            for command in commands {
                world.apply(command);
            }
            world.tick();
        }
        world
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "commands": ["move_right"], "repeat": 3 },
                { "commands": ["jump", "stop_right"] }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let ticks = replay.expanded_ticks();
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[0], vec![Command::MoveRight]);
        assert!(ticks[1].is_empty() && ticks[2].is_empty());
        assert_eq!(ticks[3], vec![Command::Jump, Command::StopRight]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        let path = temp_file_path("unknown");
        fs::write(&path, r#"{ "frames": [{ "commands": ["fly"] }] }"#)
            .expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("unknown command should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 20 },
                { "commands": ["move_right"], "repeat": 40 },
                { "commands": ["jump"], "repeat": 50 },
                { "commands": ["move_left", "stop_right"], "repeat": 30 },
                { "commands": ["stop_left"], "repeat": 60 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let a = run(&replay);
        let b = run(&replay);

        assert_eq!(a.tick_count, 200);
        assert_eq!(a.tick_count, b.tick_count);
        assert_eq!(a.player.aabb, b.player.aabb);
        assert_eq!(a.player.velocity_x, b.player.velocity_x);
        assert_eq!(a.player.velocity_y, b.player.velocity_y);
        assert_eq!(a.player.grounded, b.player.grounded);
        let enemies_a: Vec<_> = a.enemies.iter().map(|e| (e.aabb, e.direction)).collect();
        let enemies_b: Vec<_> = b.enemies.iter().map(|e| (e.aabb, e.direction)).collect();
        assert_eq!(enemies_a, enemies_b);

        let _ = fs::remove_file(path);
    }
}
