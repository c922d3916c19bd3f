use anyhow::Result;
use std::collections::HashSet;

use crate::core::config;
use crate::core::engine::DemoKind;

/// The `ConfigValidator` trait defines the public interface for validating the
/// gallery configuration.
pub trait ConfigValidator {
    /// Performs a full validation of the `GalleryConfig` and returns a list of
    /// issues found. An empty list means the configuration is usable.
    fn validate_config(&self, config: &config::GalleryConfig) -> Result<Vec<String>>;

    /// Validates the `global_settings` table on its own.
    fn validate_settings(&self, settings: &config::GlobalSettings) -> Result<Vec<String>>;
}

/// Checks the version, the demo list, and the payment currency.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Reports unknown demo names and names listed more than once.
    fn check_demo_list(&self, demos: &[String]) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for demo in demos {
            if demo.parse::<DemoKind>().is_err() {
                warnings.push(format!("Unknown demo: {demo}"));
            }
            if !seen.insert(demo.as_str()) {
                warnings.push(format!("Demo listed more than once: {demo}"));
            }
        }
        warnings
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    fn validate_config(&self, config: &config::GalleryConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != "1.0" {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        if config.demos.is_empty() {
            issues.push("No demos enabled".to_string());
        }
        issues.extend(self.check_demo_list(&config.demos));
        issues.extend(self.validate_settings(&config.global_settings)?);

        Ok(issues)
    }

    fn validate_settings(&self, settings: &config::GlobalSettings) -> Result<Vec<String>> {
        let mut issues = Vec::new();
        let currency = settings.default_currency.as_str();

        if currency.is_empty() {
            issues.push("Default currency must not be empty".to_string());
        } else if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            issues.push(format!(
                "Default currency should be a 3-letter ISO code, got '{currency}'"
            ));
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GalleryConfig;

    #[test]
    fn test_default_config_is_valid() {
        let issues = StandardValidator::new()
            .validate_config(&GalleryConfig::default())
            .unwrap();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_reports_unknown_and_duplicate_demos() {
        let mut config = GalleryConfig::default();
        config.demos = vec![
            "builder".to_string(),
            "builder".to_string(),
            "observer".to_string(),
        ];

        let issues = StandardValidator::new().validate_config(&config).unwrap();
        assert!(issues.contains(&"Unknown demo: observer".to_string()));
        assert!(issues.contains(&"Demo listed more than once: builder".to_string()));
    }

    #[test]
    fn test_reports_bad_version_and_currency() {
        let mut config = GalleryConfig::default();
        config.version = "2.0".to_string();
        config.global_settings.default_currency = "dollars".to_string();

        let issues = StandardValidator::new().validate_config(&config).unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("Unsupported config version"));
        assert!(issues[1].contains("3-letter ISO code"));
    }
}
