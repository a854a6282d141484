use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.service.properties.jobs_virtual_directory.is_empty() {
        return Err(ConfigError::Validation {
            message: "jobsVirtualDirectory must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_config() {
        let config_json = r#"
        {
            "service": {
                "properties": { "jobsVirtualDirectory": "/jobs" },
                "extensions": [
                    {
                        "typeName": "WPSServer",
                        "properties": { "onlineResource": "https://host/arcgis/services/svc/WPSServer" }
                    }
                ]
            }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(config.service.properties.jobs_virtual_directory, "/jobs");
        assert_eq!(config.service.extensions.len(), 1);
    }

    #[test]
    fn test_extensions_default_to_empty() {
        let config_json = r#"
        {
            "service": {
                "properties": { "jobsVirtualDirectory": "/jobs" }
            }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert!(config.service.extensions.is_empty());
    }

    #[test]
    fn test_missing_properties_is_error() {
        let config_json = r#"{ "service": { "extensions": [] } }"#;

        let result = load_config_from_str(config_json);
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_empty_virtual_directory_is_error() {
        let config_json = r#"
        {
            "service": {
                "properties": { "jobsVirtualDirectory": "" }
            }
        }
        "#;

        let result = load_config_from_str(config_json);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = load_config_from_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/server.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
