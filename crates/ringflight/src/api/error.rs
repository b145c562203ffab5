use thiserror::Error;

/// Failure to load or validate game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },

    #[error("spawn band is empty: [{low}, {high}] in a world {height} high")]
    EmptySpawnBand { low: f32, high: f32, height: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}
