use super::{AppConfig, ConfigError};
use std::fs;

/// Loads the service configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Optional path to the YAML configuration file
///
/// # Returns
///
/// * `Result<AppConfig, ConfigError>` - The parsed configuration, or the defaults
///   when no file is given. Keys missing from the file keep their default value.
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into an AppConfig
pub fn load_config(file_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let Some(file_path) = file_path else {
        return Ok(AppConfig::default());
    };

    let yaml_str = fs::read_to_string(file_path)?;
    let config: AppConfig = serde_yaml::from_str(&yaml_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("school.yaml");
        fs::write(&path, "port: 8080\ndatabase_path: school.db\nlog_to_file: false\n").unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "school.db");
        assert!(!config.log_to_file);
        assert_eq!(config.pool_size, AppConfig::default().pool_size);
    }

    #[test]
    fn test_unreadable_or_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.yaml");
        assert!(matches!(
            load_config(missing.to_str()),
            Err(ConfigError::Io(_))
        ));

        let malformed = temp_dir.path().join("bad.yaml");
        fs::write(&malformed, "port: [not, a, port]\n").unwrap();
        assert!(matches!(
            load_config(malformed.to_str()),
            Err(ConfigError::Yaml(_))
        ));
    }
}
