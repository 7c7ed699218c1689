use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/posts";
pub const DEFAULT_SETTINGS_FILE: &str = "post_board.toml";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

/// Defaults, then the settings file, then the process environment.
///
/// An explicit `config_path` must exist; the implicit `post_board.toml` in the
/// working directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            apply_settings_file(&mut settings, &raw, path)?;
        }
        None => {
            let path = Path::new(DEFAULT_SETTINGS_FILE);
            if let Ok(raw) = fs::read_to_string(path) {
                apply_settings_file(&mut settings, &raw, path)?;
            }
        }
    }

    if let Some(v) = env("POSTS_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn apply_settings_file(settings: &mut Settings, raw: &str, path: &Path) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    if let Some(v) = file_cfg.get("base_url") {
        settings.base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }

    Ok(())
}

/// Parses the collection URL, dropping surrounding whitespace and trailing
/// slashes. Blank input falls back to [`DEFAULT_BASE_URL`].
pub fn normalize_base_url(raw_base_url: &str) -> anyhow::Result<Url> {
    let trimmed = raw_base_url.trim().trim_end_matches('/');
    let trimmed = if trimmed.is_empty() {
        DEFAULT_BASE_URL
    } else {
        trimmed
    };

    let url = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported scheme '{other}' in base url '{trimmed}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
