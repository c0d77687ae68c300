pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::recorder::default_output_path;

/// Get the config directory path (~/.config/gradebook/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("gradebook"))
}

/// Get the default config file path (~/.config/gradebook/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/gradebook/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref output) = config.output {
        if output.as_os_str().is_empty() {
            errors.push("output: must not be empty".to_string());
        } else if output.is_dir() {
            errors.push(format!(
                "output: {} is a directory, expected a file path",
                output.display()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Pick the CSV destination: command-line flag, then config, then ./grades.csv
pub fn resolve_output_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.output.clone())
        .unwrap_or_else(default_output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "output: class-b.csv\ntheme: dark\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("class-b.csv")));
        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "theme: [not, a, theme]\n").unwrap();

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_directory_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output: Some(dir.path().to_path_buf()),
            theme: ThemeMode::Auto,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("is a directory"));
    }

    #[test]
    fn test_validate_rejects_empty_output() {
        let config = Config {
            output: Some(PathBuf::new()),
            theme: ThemeMode::Auto,
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("must not be empty"));
    }

    #[test]
    fn test_resolve_output_path_precedence() {
        let config = Config {
            output: Some(PathBuf::from("from-config.csv")),
            theme: ThemeMode::Auto,
        };
        assert_eq!(
            resolve_output_path(Some(PathBuf::from("flag.csv")), &config),
            PathBuf::from("flag.csv")
        );
        assert_eq!(
            resolve_output_path(None, &config),
            PathBuf::from("from-config.csv")
        );
        assert_eq!(
            resolve_output_path(None, &Config::default()),
            PathBuf::from("grades.csv")
        );
    }
}
