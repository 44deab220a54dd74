use std::str::FromStr;
use std::time::Duration;

use wayfarer_core::filter::DurationRange;

/// Default quiet period before a typed search term is applied.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Default registration password floor.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

/// Planner configuration loaded from environment variables.
///
/// | Env Var                       | Default |
/// |-------------------------------|---------|
/// | `WAYFARER_SEARCH_DEBOUNCE_MS` | `300`   |
/// | `WAYFARER_MIN_DURATION`       | `1`     |
/// | `WAYFARER_MAX_DURATION`       | `5`     |
/// | `WAYFARER_MIN_PASSWORD_LEN`   | `8`     |
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Quiet period applied to search-box input.
    pub search_debounce: Duration,
    /// Duration slider position on load and after a filter reset.
    pub initial_duration_range: DurationRange,
    pub min_password_length: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            initial_duration_range: DurationRange::SLIDER_DEFAULT,
            min_password_length: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the process environment with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let debounce_ms = parse_or(
            &lookup,
            "WAYFARER_SEARCH_DEBOUNCE_MS",
            DEFAULT_SEARCH_DEBOUNCE_MS,
        );
        let min = parse_or(
            &lookup,
            "WAYFARER_MIN_DURATION",
            defaults.initial_duration_range.min,
        );
        let max = parse_or(
            &lookup,
            "WAYFARER_MAX_DURATION",
            defaults.initial_duration_range.max,
        );
        let min_password_length = parse_or(
            &lookup,
            "WAYFARER_MIN_PASSWORD_LEN",
            defaults.min_password_length,
        );

        Self {
            search_debounce: Duration::from_millis(debounce_ms),
            initial_duration_range: DurationRange::new(min, max),
            min_password_length,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Invalid config value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PlannerConfig::from_lookup(|_| None);
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.initial_duration_range, DurationRange::new(1, 5));
    }

    #[test]
    fn overrides_are_applied() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("WAYFARER_SEARCH_DEBOUNCE_MS", "150"),
            ("WAYFARER_MIN_DURATION", "2"),
            ("WAYFARER_MAX_DURATION", " 4 "),
            ("WAYFARER_MIN_PASSWORD_LEN", "12"),
        ]));
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert_eq!(config.initial_duration_range, DurationRange::new(2, 4));
        assert_eq!(config.min_password_length, 12);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("WAYFARER_SEARCH_DEBOUNCE_MS", "soon"),
            ("WAYFARER_MAX_DURATION", "-3"),
        ]));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.initial_duration_range.max, 5);
    }
}
