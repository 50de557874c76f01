use crate::search::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// Smallest heuristic weight any engine accepts.
pub const MIN_WEIGHT: f64 = 1.0;

/// Knobs shared by all engines. Can be read from a TOML file such as
///
/// ```toml
/// weight = 1.5
/// max-expansions = 100000
/// max-iterations = 64
/// time-limit = "30s"
/// memory-limit-mb = 2048
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Multiplier on h in f = g + w * h. Only engines that use a heuristic
    /// look at it.
    pub weight: f64,
    /// Hard cap on expansions, after which the search gives up
    pub max_expansions: Option<u64>,
    /// Hard cap on IDA* threshold passes
    pub max_iterations: u64,
    /// Wall-clock limit, written in TOML as a humantime string
    #[serde(with = "humantime_option")]
    pub time_limit: Option<Duration>,
    /// Limit on resident memory, sampled every ten seconds
    pub memory_limit_mb: Option<usize>,
}

mod humantime_option {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        limit: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match limit {
            Some(limit) => {
                serializer.serialize_some(&humantime::format_duration(*limit).to_string())
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| humantime::parse_duration(&text).map_err(D::Error::custom))
            .transpose()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weight: MIN_WEIGHT,
            max_expansions: None,
            max_iterations: 1_000_000,
            time_limit: None,
            memory_limit_mb: None,
        }
    }
}

impl SearchConfig {
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| SearchError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no engine can run with.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < MIN_WEIGHT {
            return Err(SearchError::InvalidWeight {
                weight: self.weight,
                minimum: MIN_WEIGHT,
            });
        }
        if self.max_iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "max-iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SEARCH_CONFIG_TEXT;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert_eq!(config.weight, 1.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_expansions, None);
    }

    #[test]
    fn weight_below_one_is_rejected() {
        for weight in [0.5, 0., -1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SearchConfig::with_weight(weight).validate(),
                Err(SearchError::InvalidWeight { .. })
            ));
        }
    }

    #[test]
    fn loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weight = 2.5\nmax-expansions = 10").unwrap();
        let config = SearchConfig::from_path(file.path()).unwrap();
        assert_eq!(config.weight, 2.5);
        assert_eq!(config.max_expansions, Some(10));
        assert_eq!(config.max_iterations, 1_000_000);
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn bundled_config_parses() {
        let config: SearchConfig = toml::from_str(SEARCH_CONFIG_TEXT).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.weight, 1.5);
        assert_eq!(config.time_limit, Some(Duration::from_secs(300)));
    }

    #[test]
    fn time_limit_is_humantime() {
        let config: SearchConfig =
            toml::from_str("time-limit = \"1m 30s\"\nmemory-limit-mb = 512").unwrap();
        assert_eq!(config.time_limit, Some(Duration::from_secs(90)));
        assert_eq!(config.memory_limit_mb, Some(512));
        assert!(toml::from_str::<SearchConfig>("time-limit = \"soon\"").is_err());
    }

    #[test]
    fn invalid_weight_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weight = 0.5").unwrap();
        assert!(matches!(
            SearchConfig::from_path(file.path()),
            Err(SearchError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wieght = 2.0").unwrap();
        assert!(matches!(
            SearchConfig::from_path(file.path()),
            Err(SearchError::Toml { .. })
        ));
    }
}
