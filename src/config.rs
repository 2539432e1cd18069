use std::path::PathBuf;

use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};

use crate::error::{KisanError, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub enrichment: Option<EnrichmentConfig>,
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// OpenAI-compatible chat completions URL
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl std::fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    pub location: Option<String>,
    pub language: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            location: None,
            language: "English".into(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(KisanError::Config(format!(
                "Config file not found at {:?}. Run `kisan init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| KisanError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| KisanError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("kisan").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| KisanError::Config("Cannot determine config directory".into()))?
            .join("kisan")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/kisan/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KisanError::Config("Cannot determine config directory".into()))?
            .join("kisan");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Kisan!");
        println!();

        println!("OpenWeatherMap");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

        let default_location: String = Input::new()
            .with_prompt("  Default location (city name, blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

        let language: String = Input::new()
            .with_prompt("  Advisory language")
            .default("English".into())
            .interact_text()
            .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Advisory explanations (leave endpoint blank to skip)");
        let enrichment_endpoint: String = Input::new()
            .with_prompt("  Chat completions endpoint")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

        let enrichment = if enrichment_endpoint.is_empty() {
            None
        } else {
            let api_key: String = Password::new()
                .with_prompt("  API key")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

            let model: String = Input::new()
                .with_prompt("  Model")
                .default("gpt-4o-mini".into())
                .interact_text()
                .map_err(|e| KisanError::Config(format!("Input error: {}", e)))?;

            Some(EnrichmentConfig {
                endpoint: enrichment_endpoint,
                api_key,
                model,
                timeout_secs: default_timeout_secs(),
            })
        };

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: owm_api_key,
            },
            enrichment,
            defaults: Defaults {
                location: if default_location.is_empty() {
                    None
                } else {
                    Some(default_location)
                },
                language,
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| KisanError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# Kisan Configuration\n# Generated by `kisan init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = "openweathermap:\n  api_key: abc123\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.enrichment.is_none());
        assert_eq!(config.defaults.language, "English");
        assert!(config.defaults.location.is_none());
    }

    #[test]
    fn parse_full_config() {
        let yaml = "\
openweathermap:
  api_key: abc123
enrichment:
  endpoint: https://api.example.com/v1/chat/completions
  api_key: secret
  model: gpt-4o-mini
defaults:
  location: Pune
  language: Hindi
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let enrichment = config.enrichment.unwrap();
        assert_eq!(enrichment.model, "gpt-4o-mini");
        assert_eq!(enrichment.timeout_secs, 10);
        assert_eq!(config.defaults.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn env_var_substitution() {
        std::env::set_var("KISAN_TEST_OWM_KEY", "from-env");
        let substituted =
            Config::substitute_env_vars("openweathermap:\n  api_key: ${KISAN_TEST_OWM_KEY}\n");
        assert!(substituted.contains("from-env"));
        assert!(!substituted.contains("${KISAN_TEST_OWM_KEY}"));
    }

    #[test]
    fn unknown_env_vars_left_in_place() {
        let raw = "api_key: ${KISAN_DEFINITELY_UNSET_VAR}";
        assert_eq!(Config::substitute_env_vars(raw), raw);
    }

    #[test]
    fn secrets_redacted_from_debug() {
        let config = OpenWeatherMapConfig {
            api_key: "topsecret".into(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
