use std::path::PathBuf;

/// Startup failures. All of these are fatal; nothing in the per-tick
/// simulation can produce one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("level row {row} is {found} tiles wide, expected {expected}")]
    RaggedLevel {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config validation failed: {0}")]
    Invalid(String),
}
