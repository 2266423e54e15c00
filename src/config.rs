use serde::Deserialize;

use crate::error::Result;

pub const ENV_PREFIX: &str = "WIKI_FACTS";

/// Runtime knobs, read from `WIKI_FACTS_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// JSON indentation width of the report.
    pub indent: usize,
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            indent: 2,
            show_progress: true,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();
        let settings = config::Config::builder()
            .set_default("indent", defaults.indent as u64)?
            .set_default("show_progress", defaults.show_progress)?
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_apply_without_env() {
        assert_eq!(Settings::from_source(env(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn env_overrides_defaults() {
        let s = Settings::from_source(env(&[
            ("WIKI_FACTS_INDENT", "4"),
            ("WIKI_FACTS_SHOW_PROGRESS", "false"),
        ]))
        .unwrap();
        assert_eq!(s.indent, 4);
        assert!(!s.show_progress);
    }

    #[test]
    fn bad_value_is_a_config_error() {
        let err = Settings::from_source(env(&[("WIKI_FACTS_INDENT", "wide")])).unwrap_err();
        assert!(matches!(err, crate::error::FactsError::Config(_)));
    }
}
