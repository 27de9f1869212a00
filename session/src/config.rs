//! Loading and validation of [`SessionConfig`] overrides.
//!
//! Overrides are a flat TOML table whose keys mirror the [`SessionConfig`]
//! fields. Keys that are absent keep their built-in defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use wave_survivor_core::SessionConfig;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}")]
    Read {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid TOML table of known keys.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    /// A value is outside the range the simulation accepts.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Human readable constraint that was violated.
        reason: &'static str,
    },
}

/// Reads, parses and validates the configuration stored at `path`.
pub fn load(path: &Path) -> Result<SessionConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&contents)?;
    log::debug!("loaded session config from {}", path.display());
    Ok(config)
}

/// Parses and validates configuration overrides from TOML text.
pub fn parse(contents: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = toml::from_str(contents)?;
    validate(&config)?;
    Ok(config)
}

/// Checks that every value can drive a session.
pub fn validate(config: &SessionConfig) -> Result<(), ConfigError> {
    positive("map_width", config.map_width)?;
    positive("map_height", config.map_height)?;
    non_negative("player_speed", config.player_speed)?;
    non_negative("enemy_speed", config.enemy_speed)?;
    positive("bullet_speed", config.bullet_speed)?;
    non_negative("spawn_distance_min", config.spawn_distance_min)?;
    non_negative("spawn_distance_max", config.spawn_distance_max)?;
    non_negative("spawn_margin", config.spawn_margin)?;
    non_negative("burst_radius", config.burst_radius)?;
    non_negative("miss_margin", config.miss_margin)?;
    positive("player_radius", config.player_radius)?;
    positive("enemy_radius", config.enemy_radius)?;
    positive("bullet_radius", config.bullet_radius)?;

    if config.spawn_distance_min > config.spawn_distance_max {
        return Err(ConfigError::Invalid {
            field: "spawn_distance_min",
            reason: "must not exceed spawn_distance_max",
        });
    }
    if config.player_max_health == 0 {
        return Err(ConfigError::Invalid {
            field: "player_max_health",
            reason: "must be at least 1",
        });
    }
    if config.wave_duration_ms == 0 {
        return Err(ConfigError::Invalid {
            field: "wave_duration_ms",
            reason: "must be at least 1",
        });
    }
    if config.bullet_fire_interval_ms == 0 {
        return Err(ConfigError::Invalid {
            field: "bullet_fire_interval_ms",
            reason: "must be at least 1",
        });
    }

    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a finite positive number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a finite non-negative number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_keeps_defaults() {
        let config = parse("").expect("empty config parses");
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn overrides_replace_only_named_keys() {
        let config = parse("map_width = 800.0\nbullet_fire_interval_ms = 250\n")
            .expect("overrides parse");
        assert_eq!(config.map_width, 800.0);
        assert_eq!(config.bullet_fire_interval_ms, 250);
        assert_eq!(config.map_height, 2_000.0);
    }

    #[test]
    fn rejects_inverted_spawn_ring() {
        let error = parse("spawn_distance_min = 600.0\n").expect_err("min above max");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "spawn_distance_min",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_map() {
        let error = parse("map_height = 0.0\n").expect_err("zero height");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "map_height",
                ..
            }
        ));
    }

    #[test]
    fn reports_malformed_toml() {
        let error = parse("map_width = \"wide\"").expect_err("string width");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn reports_missing_file() {
        let error = load(Path::new("/definitely/not/here.toml")).expect_err("missing file");
        assert!(matches!(error, ConfigError::Read { .. }));
    }
}
