use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://your-api-endpoint.com/api";
pub const DEFAULT_SESSION_PATH: &str = "~/.config/bizdash/session.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl SessionSettings {
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }
}

/// Defaults, then `config/dashboard.toml` if present, then `BIZDASH__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = base_builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("BIZDASH")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn base_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("session.path", DEFAULT_SESSION_PATH)?
        .set_default("log.level", "info")?)
}

/// Replace a leading `~` with the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}
