use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-reviewr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Review workflow settings.
    #[serde(default)]
    pub review: ReviewConfig,
    /// Tracker connection parameters.
    #[serde(default)]
    pub gitlab: GitLabConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReviewConfig {
    /// Identifier of the project the reviewed content belongs to. Rendered
    /// verbatim into the review body.
    #[serde(default)]
    pub project: String,
}

#[derive(Debug, Deserialize)]
pub struct GitLabConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Personal access token. `GITLAB_TOKEN` in the environment wins over
    /// the config file.
    #[serde(default)]
    pub token: String,
    /// Project path of the review repository, e.g. `eclipsefdn/iplab`.
    #[serde(default = "default_repository")]
    pub repository: String,
}

fn default_host() -> String {
    "https://gitlab.eclipse.org".to_string()
}

fn default_repository() -> String {
    "eclipsefdn/iplab".to_string()
}

impl Default for GitLabConfig {
    fn default() -> Self {
        GitLabConfig {
            host: default_host(),
            token: String::new(),
            repository: default_repository(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            review: ReviewConfig::default(),
            gitlab: GitLabConfig::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<cwd>/.license-reviewr/config.toml`
/// 3. `~/.config/license-reviewr/config.toml`
/// 4. Built-in [`Config::default`]
///
/// Whatever the source, a `GITLAB_TOKEN` environment variable overrides the
/// token so credentials can stay out of files.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let mut config = read_config(config_override)?;

    if let Ok(token) = std::env::var("GITLAB_TOKEN") {
        if !token.is_empty() {
            config.gitlab.token = token;
        }
    }

    Ok(config)
}

fn read_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".license-reviewr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-reviewr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
