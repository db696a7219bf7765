use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "keydeck";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Glyph that marks a slide title as essential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_filtered: Option<bool>,

    /// Viewport width below which the TOC closes after a jump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrow_width: Option<f32>,
}

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.marker",
    "defaults.start_filtered",
    "defaults.narrow_width",
];

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `keydeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# keydeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn defaults(&self) -> DefaultsConfig {
        self.defaults.clone().unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut defaults = self.defaults();
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.marker" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid marker: must not be empty.");
                }
                defaults.marker = Some(value.to_string());
            }
            "defaults.start_filtered" => {
                let flag = value.parse::<bool>().map_err(|_| {
                    anyhow::anyhow!("Invalid start_filtered: {value}. Must be 'true' or 'false'.")
                })?;
                defaults.start_filtered = Some(flag);
            }
            "defaults.narrow_width" => {
                let width = value
                    .parse::<f32>()
                    .ok()
                    .filter(|w| w.is_finite() && *w > 0.0)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid narrow_width: {value}. Must be a positive number of pixels."
                        )
                    })?;
                defaults.narrow_width = Some(width);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        self.defaults = Some(defaults);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.marker", "[!]").unwrap();
        config.set("defaults.start_filtered", "true").unwrap();
        config.set("defaults.narrow_width", "900").unwrap();
        let d = config.defaults();
        assert_eq!(d.theme.as_deref(), Some("dark"));
        assert_eq!(d.marker.as_deref(), Some("[!]"));
        assert_eq!(d.start_filtered, Some(true));
        assert_eq!(d.narrow_width, Some(900.0));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.marker", "").is_err());
        assert!(config.set("defaults.start_filtered", "yes").is_err());
        assert!(config.set("defaults.narrow_width", "-5").is_err());
        assert!(config.set("defaults.narrow_width", "wide").is_err());
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        let err = config.set("defaults.aspect", "16:9").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = std::env::temp_dir().join(format!("keydeck-config-{}", std::process::id()));
        let path = dir.join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.marker", "*").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_message() {
        let err = Config::load_from(Path::new("/nonexistent/keydeck/config.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn test_empty_defaults_serialize_compactly() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
