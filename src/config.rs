use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "~/.readme-creator/config.yaml";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sessions_dir: String,
    pub api_key_path: String,
    pub backend: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sessions_dir: "~/.readme-creator/generated".to_string(),
            api_key_path: "~/.readme-creator/api_key".to_string(),
            backend: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

pub fn load() -> Result<Config> {
    let expanded_config_path = shellexpand::tilde(CONFIG_PATH);
    let config_path = Path::new(expanded_config_path.as_ref());

    let config: Config = if config_path.exists() {
        let file_contents = fs::read_to_string(config_path)?;
        serde_yaml::from_str(&file_contents)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", config_path.display(), e))?
    } else {
        Config::default()
    };

    tracing::debug!(path = %config_path.display(), "loaded configuration");

    Ok(Config {
        sessions_dir: shellexpand::tilde(&config.sessions_dir).to_string(),
        api_key_path: shellexpand::tilde(&config.api_key_path).to_string(),
        ..config
    })
}
