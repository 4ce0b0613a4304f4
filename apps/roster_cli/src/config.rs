use std::{fs, path::Path};

use anyhow::Context;
use roster_core::{
    config::{DEFAULT_PAGE_SIZE, DEFAULT_PLACEHOLDER_IMAGE},
    PagingMode, RefreshPolicy, RosterConfig,
};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub paging: PagingMode,
    pub refresh: RefreshPolicy,
    pub placeholder_image: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://reqres.in".into(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            paging: PagingMode::default(),
            refresh: RefreshPolicy::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_url: Option<String>,
    api_key: Option<String>,
    page_size: Option<u32>,
    paging_mode: Option<PagingMode>,
    refresh_policy: Option<RefreshPolicy>,
    placeholder_image: Option<String>,
}

impl Settings {
    pub fn roster_config(&self) -> anyhow::Result<RosterConfig> {
        let config = RosterConfig::new(self.page_size)
            .with_context(|| format!("invalid page_size {}", self.page_size))?
            .with_paging(self.paging)
            .with_refresh(self.refresh)
            .with_placeholder_image(self.placeholder_image.clone());
        Ok(config)
    }
}

/// Defaults, then the settings file if it exists, then the environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.api_key {
        settings.api_key = Some(v);
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.paging_mode {
        settings.paging = v;
    }
    if let Some(v) = file_cfg.refresh_policy {
        settings.refresh = v;
    }
    if let Some(v) = file_cfg.placeholder_image {
        settings.placeholder_image = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ROSTER_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("ROSTER_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = lookup("APP__API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = lookup("APP__PAGE_SIZE") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.page_size = parsed,
            Err(err) => warn!(value = %v, error = %err, "ignoring APP__PAGE_SIZE"),
        }
    }
    if let Some(v) = lookup("APP__PAGING_MODE") {
        match v.parse::<PagingMode>() {
            Ok(parsed) => settings.paging = parsed,
            Err(err) => warn!(error = %err, "ignoring APP__PAGING_MODE"),
        }
    }
    if let Some(v) = lookup("APP__REFRESH_POLICY") {
        match v.parse::<RefreshPolicy>() {
            Ok(parsed) => settings.refresh = parsed,
            Err(err) => warn!(error = %err, "ignoring APP__REFRESH_POLICY"),
        }
    }
    if let Some(v) = lookup("APP__PLACEHOLDER_IMAGE") {
        settings.placeholder_image = v;
    }
}
