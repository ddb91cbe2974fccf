//! Project configuration loading and defaults.
//!
//! Flags are read once per invocation and treated as an immutable
//! snapshot for the duration of a compile; tests vary them per call
//! instead of touching process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name at the project root
pub const CONFIG_FILE: &str = ".blade-expects.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Master switch; when false, annotations are stripped from the
    /// output instead of compiled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether templates may contain raw PHP tags besides the guards
    /// this tool generates
    #[serde(default = "default_true", rename = "allowRawCode")]
    pub allow_raw_code: bool,

    /// Template patterns to include (glob syntax)
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Template patterns to exclude (glob syntax)
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_include() -> Vec<String> {
    vec!["**/*.blade.php".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/vendor/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/storage/**".to_string(),
        "**/bootstrap/cache/**".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_raw_code: true,
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load(CONFIG_FILE).unwrap_or_default()
    }

    /// Whether a discovered file matches the include/exclude patterns
    pub fn matches<P: AsRef<Path>>(&self, path: P) -> crate::Result<bool> {
        let path = path.as_ref();
        for pattern in &self.exclude {
            if glob::Pattern::new(pattern)?.matches_path(path) {
                return Ok(false);
            }
        }
        for pattern in &self.include {
            if glob::Pattern::new(pattern)?.matches_path(path) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enabled);
        assert!(config.allow_raw_code);
        assert_eq!(config.include, vec!["**/*.blade.php"]);
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert!(config.allow_raw_code);
        assert!(!config.include.is_empty());
    }

    #[test]
    fn test_matches_include_and_exclude() {
        let config = Config::default();
        assert!(config.matches("resources/views/home.blade.php").unwrap());
        assert!(!config.matches("resources/views/home.php").unwrap());
        assert!(!config
            .matches("vendor/pkg/views/home.blade.php")
            .unwrap());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.allow_raw_code = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(!loaded.allow_raw_code);
        assert!(loaded.enabled);
    }
}
