//! Benchmark settings with file overrides.
//!
//! Settings come from an optional `rbench.toml` in the working directory;
//! every knob has a default so the file is never required.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConfigResult;
use rbench_core::error::RbenchError;

/// Name of the optional settings file
pub const SETTINGS_FILE: &str = "rbench.toml";

/// Tunable knobs for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    /// Measurement time budget per task, in milliseconds
    pub measurement_time_ms: u64,

    /// Unmeasured warm-up time per task, in milliseconds
    pub warm_up_time_ms: u64,

    /// Time-to-live of cached filesystem entries, in milliseconds
    pub cache_ttl_ms: u64,

    /// Upper bound on cached filesystem entries per map
    pub cache_capacity: usize,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            measurement_time_ms: 10_000,
            warm_up_time_ms: 1_000,
            cache_ttl_ms: 4_000,
            cache_capacity: 4_096,
        }
    }
}

impl BenchSettings {
    /// Load settings from `dir/rbench.toml`, falling back to defaults
    /// when the file does not exist
    pub fn load(dir: &Utf8Path) -> ConfigResult<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|e| RbenchError::io(format!("Failed to read {}", path), e))?;
        let settings: Self = toml::from_str(&text)
            .map_err(|e| RbenchError::TomlParse { message: e.to_string() })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate that the settings describe a runnable benchmark
    pub fn validate(&self) -> ConfigResult<()> {
        if self.measurement_time_ms == 0 {
            return Err(RbenchError::ConfigValidation {
                field: "measurement_time_ms".to_string(),
                reason: "measurement time must be greater than zero".to_string(),
            });
        }
        if self.cache_capacity == 0 {
            return Err(RbenchError::ConfigValidation {
                field: "cache_capacity".to_string(),
                reason: "cache capacity must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Measurement time budget per task
    pub fn measurement_time(&self) -> Duration {
        Duration::from_millis(self.measurement_time_ms)
    }

    /// Warm-up time per task
    pub fn warm_up_time(&self) -> Duration {
        Duration::from_millis(self.warm_up_time_ms)
    }

    /// Cache entry time-to-live
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let settings = BenchSettings::load(&dir).unwrap();
        assert_eq!(settings, BenchSettings::default());
        assert_eq!(settings.measurement_time(), Duration::from_secs(10));
        assert_eq!(settings.cache_ttl(), Duration::from_secs(4));
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "measurement_time_ms = 250\nwarm_up_time_ms = 50\n",
        )
        .unwrap();
        let dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let settings = BenchSettings::load(&dir).unwrap();
        assert_eq!(settings.measurement_time_ms, 250);
        assert_eq!(settings.warm_up_time_ms, 50);
        // Untouched knobs keep their defaults
        assert_eq!(settings.cache_ttl_ms, 4_000);
        assert_eq!(settings.cache_capacity, 4_096);
    }

    #[test]
    fn test_zero_measurement_time_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "measurement_time_ms = 0\n").unwrap();
        let dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let err = BenchSettings::load(&dir).unwrap_err();
        assert!(matches!(err, RbenchError::ConfigValidation { .. }));
    }

    #[test]
    fn test_malformed_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "measurement_time_ms = \"fast\"\n").unwrap();
        let dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let err = BenchSettings::load(&dir).unwrap_err();
        assert!(matches!(err, RbenchError::TomlParse { .. }));
    }
}
