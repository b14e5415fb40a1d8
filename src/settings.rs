//! Wave configuration
//!
//! Built once at startup from defaults plus optional positional overrides,
//! then passed by reference into every new `Wave`. Never mutated mid-run.

use serde::{Deserialize, Serialize};

use crate::consts::{ALIEN_ROWS, ALIEN_SPEED, ALIENS_IN_ROW};

/// Allowed range for the number of alien rows
pub const ROWS_RANGE: std::ops::RangeInclusive<usize> = 1..=10;
/// Allowed range for the number of aliens per row
pub const COLUMNS_RANGE: std::ops::RangeInclusive<usize> = 1..=15;
/// Upper bound on seconds between march steps (lower bound is exclusive zero)
pub const MAX_MARCH_INTERVAL: f32 = 3.0;

/// Tunables for a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Number of alien rows
    pub rows: usize,
    /// Number of aliens per row
    pub columns: usize,
    /// Seconds between formation march steps
    pub march_interval: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            rows: ALIEN_ROWS,
            columns: ALIENS_IN_ROW,
            march_interval: ALIEN_SPEED,
        }
    }
}

impl WaveConfig {
    /// Parse a row count, None if non-numeric or out of range
    pub fn parse_rows(s: &str) -> Option<usize> {
        s.trim().parse().ok().filter(|r| ROWS_RANGE.contains(r))
    }

    /// Parse a column count, None if non-numeric or out of range
    pub fn parse_columns(s: &str) -> Option<usize> {
        s.trim().parse().ok().filter(|c| COLUMNS_RANGE.contains(c))
    }

    /// Parse a march interval, None if non-numeric or not in (0, 3]
    pub fn parse_march_interval(s: &str) -> Option<f32> {
        s.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0 && *v <= MAX_MARCH_INTERVAL)
    }

    /// Apply positional overrides `[rows] [columns] [speed]`.
    ///
    /// Each value is validated on its own; a bad one keeps its default.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut config = Self::default();

        if let Some(arg) = args.first().map(AsRef::as_ref) {
            match Self::parse_rows(arg) {
                Some(rows) => config.rows = rows,
                None => log::debug!("Ignoring rows override {:?}", arg),
            }
        }
        if let Some(arg) = args.get(1).map(AsRef::as_ref) {
            match Self::parse_columns(arg) {
                Some(columns) => config.columns = columns,
                None => log::debug!("Ignoring columns override {:?}", arg),
            }
        }
        if let Some(arg) = args.get(2).map(AsRef::as_ref) {
            match Self::parse_march_interval(arg) {
                Some(interval) => config.march_interval = interval,
                None => log::debug!("Ignoring speed override {:?}", arg),
            }
        }

        config
    }

    /// Replace out-of-range values in hand-built or deserialized configs
    /// with their defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let valid_interval = self.march_interval > 0.0 && self.march_interval <= MAX_MARCH_INTERVAL;
        Self {
            rows: if ROWS_RANGE.contains(&self.rows) {
                self.rows
            } else {
                defaults.rows
            },
            columns: if COLUMNS_RANGE.contains(&self.columns) {
                self.columns
            } else {
                defaults.columns
            },
            march_interval: if valid_interval {
                self.march_interval
            } else {
                defaults.march_interval
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WaveConfig::default();
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 12);
        assert_eq!(config.march_interval, 1.0);
    }

    #[test]
    fn test_valid_overrides() {
        let config = WaveConfig::from_args(&["3", "4", "0.5"]);
        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, 4);
        assert_eq!(config.march_interval, 0.5);
    }

    #[test]
    fn test_bad_overrides_keep_defaults() {
        let config = WaveConfig::from_args(&["11", "abc", "0"]);
        assert_eq!(config, WaveConfig::default());

        let config = WaveConfig::from_args(&["0", "16", "3.5"]);
        assert_eq!(config, WaveConfig::default());
    }

    #[test]
    fn test_overrides_are_independent() {
        let config = WaveConfig::from_args(&["oops", "15", "3"]);
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 15);
        assert_eq!(config.march_interval, 3.0);
    }

    #[test]
    fn test_missing_args_keep_defaults() {
        let none: [&str; 0] = [];
        assert_eq!(WaveConfig::from_args(&none), WaveConfig::default());
        let config = WaveConfig::from_args(&["10"]);
        assert_eq!(config.rows, 10);
        assert_eq!(config.columns, 12);
    }

    #[test]
    fn test_json_round_trip_with_missing_fields() {
        let config: WaveConfig = serde_json::from_str(r#"{"rows": 2}"#).unwrap();
        assert_eq!(config.rows, 2);
        assert_eq!(config.columns, 12);

        let json = serde_json::to_string(&config).unwrap();
        let back: WaveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_sanitized_falls_back_to_defaults() {
        let config = WaveConfig {
            rows: 0,
            columns: 99,
            march_interval: -1.0,
        }
        .sanitized();
        assert_eq!(config, WaveConfig::default());

        let config: WaveConfig = serde_json::from_str(r#"{"rows": 50, "columns": 0}"#).unwrap();
        let config = config.sanitized();
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 12);
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let config = WaveConfig {
            rows: 10,
            columns: 1,
            march_interval: 3.0,
        };
        assert_eq!(config.sanitized(), config);
    }
}
