use crate::domain::time_window::WindowPreset;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_readings_path")]
    pub readings_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_range")]
    pub default_range: WindowPreset,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_range: default_range(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_readings_path() -> String {
    "/readings".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_range() -> WindowPreset {
    WindowPreset::LastHour
}

/// Load `config/dashboard.toml`, overridden by `DASHBOARD__SECTION__KEY`
/// environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_parses() {
        let settings: Settings =
            toml::from_str(include_str!("../../config/dashboard.toml")).unwrap();

        assert_eq!(settings.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.backend.readings_path, "/readings");
        assert_eq!(settings.backend.timeout_secs, 10);
        assert_eq!(settings.backend.token, None);
        assert_eq!(settings.dashboard.default_range, WindowPreset::LastHour);
    }

    #[test]
    fn test_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [backend]
            base_url = "http://backend"

            [dashboard]
            default_range = "7d"
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.backend.timeout_secs, 10);
        assert_eq!(settings.dashboard.default_range, WindowPreset::LastWeek);
    }

    #[test]
    fn test_config_builder_source() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[backend]\nbase_url = \"http://backend\"\ntoken = \"secret\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.backend.token.as_deref(), Some("secret"));
        assert_eq!(settings.dashboard.default_range, WindowPreset::LastHour);
    }
}
