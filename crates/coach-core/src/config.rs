//! Coach configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override at `~/.config/coach/config.toml`
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::SignConvention;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/coach.toml");

/// Default near-limit ratio for budget insights
pub const DEFAULT_NEAR_LIMIT_THRESHOLD: f64 = 0.8;

/// Default trajectory window in months
pub const DEFAULT_TRAJECTORY_MONTHS: usize = 6;

/// Mapping from a raw import label to a display category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryAlias {
    pub raw: String,
    pub display: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub near_limit_threshold: f64,
    pub trajectory_months: usize,
    pub sign_convention: SignConvention,
    pub aliases: Vec<CategoryAlias>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            near_limit_threshold: DEFAULT_NEAR_LIMIT_THRESHOLD,
            trajectory_months: DEFAULT_TRAJECTORY_MONTHS,
            sign_convention: SignConvention::default(),
            aliases: Vec::new(),
        }
    }
}

impl CoachConfig {
    /// Load configuration (explicit path, then override location, then embedded)
    ///
    /// An explicit path that does not exist is an error; a missing override
    /// file at the default location is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!(path = %default_path.display(), "Loading config override");
                    fs::read_to_string(&default_path)
                        .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml(&content)
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse config from TOML content, layering it over the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let base = parse_raw(DEFAULT_CONFIG)?;
        let raw = parse_raw(content)?;

        let mut config = Self::default();
        apply(&mut config, base)?;
        apply(&mut config, raw)?;
        Ok(config)
    }

    /// Resolve a raw import label to (display name, group)
    ///
    /// Matching is exact after trimming. Unknown labels map to themselves.
    pub fn normalize_category(&self, raw: &str) -> (String, Option<String>) {
        let raw = raw.trim();
        self.aliases
            .iter()
            .find(|a| a.raw == raw)
            .map(|a| (a.display.clone(), a.group.clone()))
            .unwrap_or_else(|| (raw.to_string(), None))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("coach").join("config.toml"))
}

/// Validate a near-limit threshold
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(Error::InvalidBudget(format!(
            "near-limit threshold must be between 0 and 1 (exclusive), got {}",
            threshold
        )))
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    trajectory: Option<RawTrajectory>,
    import: Option<RawImport>,
    categories: Option<RawCategories>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    near_limit_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTrajectory {
    default_months: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawImport {
    sign_convention: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    #[serde(default)]
    aliases: Vec<CategoryAlias>,
}

fn parse_raw(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

fn apply(config: &mut CoachConfig, raw: RawConfig) -> Result<()> {
    if let Some(threshold) = raw.budget.and_then(|b| b.near_limit_threshold) {
        config.near_limit_threshold =
            validate_threshold(threshold).map_err(|e| Error::Config(e.to_string()))?;
    }

    if let Some(months) = raw.trajectory.and_then(|t| t.default_months) {
        config.trajectory_months = months;
    }

    if let Some(convention) = raw.import.and_then(|i| i.sign_convention) {
        config.sign_convention = convention.parse().map_err(Error::Config)?;
    }

    if let Some(categories) = raw.categories {
        // Aliases from a later layer replace earlier entries with the same raw label
        for alias in categories.aliases {
            if let Some(existing) = config.aliases.iter_mut().find(|a| a.raw == alias.raw) {
                *existing = alias;
            } else {
                config.aliases.push(alias);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = CoachConfig::embedded().unwrap();
        assert_eq!(config.near_limit_threshold, 0.8);
        assert_eq!(config.trajectory_months, 6);
        assert_eq!(config.sign_convention, SignConvention::ExpensesNegative);
        assert_eq!(config.aliases.len(), 3);
    }

    #[test]
    fn test_default_aliases() {
        let config = CoachConfig::embedded().unwrap();
        assert_eq!(
            config.normalize_category("Coffe"),
            ("Coffee".to_string(), Some("Food & Drink".to_string()))
        );
        assert_eq!(
            config.normalize_category(" Film/enjoyment "),
            ("Entertainment".to_string(), Some("Leisure".to_string()))
        );
        assert_eq!(
            config.normalize_category("Groceries"),
            ("Groceries".to_string(), None)
        );
    }

    #[test]
    fn test_override_keeps_unset_defaults() {
        let config = CoachConfig::from_toml(
            r#"
            [import]
            sign_convention = "expenses_positive"

            [[categories.aliases]]
            raw = "Coffe"
            display = "Cafe"
            "#,
        )
        .unwrap();

        assert_eq!(config.sign_convention, SignConvention::ExpensesPositive);
        assert_eq!(config.near_limit_threshold, 0.8);
        assert_eq!(config.aliases.len(), 3);
        assert_eq!(config.normalize_category("Coffe"), ("Cafe".to_string(), None));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for bad in ["0.0", "1.0", "1.5", "-0.2"] {
            let toml = format!("[budget]\nnear_limit_threshold = {}", bad);
            assert!(
                matches!(CoachConfig::from_toml(&toml), Err(Error::Config(_))),
                "threshold {} should be rejected",
                bad
            );
        }
        assert!(validate_threshold(0.9).is_ok());
    }

    #[test]
    fn test_rejects_unknown_sign_convention() {
        let result = CoachConfig::from_toml("[import]\nsign_convention = \"sideways\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[trajectory]\ndefault_months = 12").unwrap();

        let config = CoachConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.trajectory_months, 12);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = CoachConfig::load(Some(Path::new("/nonexistent/coach.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
