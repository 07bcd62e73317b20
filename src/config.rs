//! Configuration loaded from a TOML file (default `config.toml`).
//!
//! Secrets and fetch headers are required; the `[schedule]` section defaults
//! to the 2023 open-lectures event and can be overridden wholesale, which is
//! how the tests run the pipeline against synthetic track lists.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_SCHEDULE_URL: &str = "https://yandex.ru/yaintern/schools/open-lectures";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub notion: NotionConfig,
    pub fetch: FetchConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// `[notion]` section: destination database and auth.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    pub database_id: String,
    pub secret: String,
}

/// `[fetch]` section: headers the schedule page expects.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub cookie: String,
    pub user_agent: String,
    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,
}

/// `[schedule]` section: event-specific constants for the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Year attached to the `DD.MM` raw dates.
    #[serde(default = "default_year")]
    pub year: i32,

    /// Raw date whose repetition marks the start of a new day/track section.
    #[serde(default = "default_first_day")]
    pub first_day: String,

    /// Ordered track list; must match the number of day sections on the page.
    #[serde(default = "default_tracks")]
    pub tracks: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            first_day: default_first_day(),
            tracks: default_tracks(),
        }
    }
}

fn default_schedule_url() -> String {
    DEFAULT_SCHEDULE_URL.into()
}

fn default_year() -> i32 {
    2023
}

fn default_first_day() -> String {
    "06.06".into()
}

fn default_tracks() -> Vec<String> {
    [
        "interfaces development",
        "backend (Python)",
        "backend (Java)",
        "backend (C++)",
        "backend (Go)",
        "mobile (Android)",
        "mobile (iOS)",
        "mobile (Flutter)",
        "management",
        "marketing",
        "product analytics",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}

// ── Tests ──
