use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Extra units to add to a [`UnitSystem`](crate::UnitSystem), read from TOML:
///
/// ```toml
/// [[unit]]
/// symbol = "t"
/// name = "Tonne"
/// base = "kg"
/// factor = "1000"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDefinition {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Symbol or label of a unit registered before this one.
    pub base: String,
    /// One of this unit is `factor` of `base`.
    #[serde(default = "default_factor", with = "rust_decimal::serde::str")]
    pub factor: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub offset: Option<Decimal>,
    /// Register `symbol` as a display label of the scaled unit rather than as
    /// a named unit of its own.
    #[serde(default)]
    pub label_only: bool,
}

fn default_factor() -> Decimal {
    Decimal::ONE
}

impl SystemConfig {
    /// Parse from TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse unit config: {e}"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_defaults() {
        let config = SystemConfig::from_toml_str(
            r#"
            [[unit]]
            symbol = "degF"
            name = "Fahrenheit"
            base = "K"
            factor = "0.5555555555555555555555555556"
            offset = "255.37"

            [[unit]]
            symbol = "unity"
            base = "1"
            "#,
        )
        .unwrap();
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[0].offset, Some(dec!(255.37)));
        assert_eq!(config.units[1].factor, dec!(1));
        assert_eq!(config.units[1].name, None);
        assert!(!config.units[1].label_only);
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(SystemConfig::from_toml_str("").unwrap(), SystemConfig::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = SystemConfig::from_toml_str(
            "[[unit]]\nsymbol = \"x\"\nbase = \"m\"\nalias = \"y\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse unit config"));
    }

    #[test]
    fn test_load_reports_path() {
        let err = SystemConfig::load(Path::new("/nonexistent/units.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/units.toml"));
    }
}
