//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use super::types::AppConfig;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

/// Validate the entire config, returning warnings for non-fatal issues.
///
/// This function checks for:
/// - Icon sizes outside the range icon themes ship
/// - Extra scan directories that don't exist
/// - Blank exclusion entries, which would match nothing or everything
pub fn validate_config(config: &AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if config.icon_size < 16 {
        warnings.push(ValidationWarning {
            field: "icon_size".to_string(),
            message: format!(
                "Icon size {} is below minimum (16). Icons will look blurry.",
                config.icon_size
            ),
        });
    } else if config.icon_size > 512 {
        warnings.push(ValidationWarning {
            field: "icon_size".to_string(),
            message: format!(
                "Icon size {} exceeds maximum (512). Most themes will fall back to smaller sizes.",
                config.icon_size
            ),
        });
    }

    for dir in &config.extra_dirs {
        if !dir.is_dir() {
            warnings.push(ValidationWarning {
                field: "extra_dirs".to_string(),
                message: format!("Directory {:?} does not exist and will be skipped.", dir),
            });
        }
    }

    // An empty keyword is a substring of every name.
    if config.excluded_keywords.iter().any(|k| k.trim().is_empty()) {
        warnings.push(ValidationWarning {
            field: "excluded_keywords".to_string(),
            message: "Empty keyword ignored; it would exclude every application.".to_string(),
        });
    }

    if config.excluded_apps.iter().any(|a| a.trim().is_empty()) {
        warnings.push(ValidationWarning {
            field: "excluded_apps".to_string(),
            message: "Empty entry ignored.".to_string(),
        });
    }

    if config
        .icon_theme
        .as_deref()
        .is_some_and(|t| t.trim().is_empty())
    {
        warnings.push(ValidationWarning {
            field: "icon_theme".to_string(),
            message: "Empty icon theme, the desktop theme will be used.".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_valid_config() {
        let config = AppConfig::default();
        let warnings = validate_config(&config);
        assert!(warnings.is_empty(), "Warnings: {:?}", warnings);
    }

    #[test]
    fn test_validate_icon_size_too_small() {
        let config = AppConfig {
            icon_size: 8,
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "icon_size"));
    }

    #[test]
    fn test_validate_icon_size_too_large() {
        let config = AppConfig {
            icon_size: 1024,
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "icon_size"));
    }

    #[test]
    fn test_validate_missing_extra_dir() {
        let config = AppConfig {
            extra_dirs: vec![PathBuf::from("/nonexistent/appfinder/dir")],
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "extra_dirs"));
    }

    #[test]
    fn test_validate_existing_extra_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            extra_dirs: vec![dir.path().to_path_buf()],
            ..AppConfig::default()
        };
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_validate_blank_keyword() {
        let config = AppConfig {
            excluded_keywords: vec!["uninstall".to_string(), "  ".to_string()],
            ..AppConfig::default()
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.field == "excluded_keywords"));
    }
}
