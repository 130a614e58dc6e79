use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI theme name ("light" or "dark")
    pub theme: Option<String>,
    /// Base URL of the chat relay
    pub endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "healthassist", "healthassist")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset, defaults to light)"),
        }
        match &self.endpoint {
            Some(endpoint) => println!("  endpoint: {endpoint}"),
            None => println!(
                "  endpoint: (unset, defaults to {})",
                crate::core::constants::DEFAULT_RELAY_BASE_URL
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nonexistent_config.toml");

        let config = Config::load_from_path(&config_path).expect("Failed to load config");

        // Should return default config
        assert_eq!(config.theme, None);
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn test_save_and_load_theme() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("theme_config.toml");

        let cfg = Config {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        cfg.save_to_path(&config_path).expect("save config failed");

        let loaded = Config::load_from_path(&config_path).expect("load config failed");
        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.endpoint, None);
    }

    #[test]
    fn test_save_and_load_endpoint() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("endpoint_config.toml");

        let cfg = Config {
            endpoint: Some("http://10.0.0.5:8080".to_string()),
            ..Default::default()
        };
        cfg.save_to_path(&config_path).expect("save config failed");

        let loaded = Config::load_from_path(&config_path).expect("load config failed");
        assert_eq!(loaded.endpoint, Some("http://10.0.0.5:8080".to_string()));
    }

    #[test]
    fn test_unset_theme() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("test_config.toml");

        let config = Config {
            theme: Some("dark".to_string()),
            endpoint: Some("http://10.0.0.5:8080".to_string()),
        };
        config
            .save_to_path(&config_path)
            .expect("Failed to save config");

        let mut config = Config::load_from_path(&config_path).expect("Failed to load config");
        config.theme = None;
        config
            .save_to_path(&config_path)
            .expect("Failed to save config");

        let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
        assert_eq!(loaded.theme, None);
        // The other entry is untouched
        assert_eq!(loaded.endpoint, Some("http://10.0.0.5:8080".to_string()));
    }
}
