//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Hard ceiling for page sizes; `GridConfig::max_page_size` may only lower it.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// How `iTotalRecords` is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// `iTotalRecords` is the row count before any search filter.
    #[default]
    Accurate,
    /// Both totals carry the filtered count.
    Legacy,
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountMode::Accurate => write!(f, "accurate"),
            CountMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for CountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accurate" => Ok(CountMode::Accurate),
            "legacy" => Ok(CountMode::Legacy),
            other => Err(format!(
                "unknown count mode '{}', expected 'accurate' or 'legacy'",
                other
            )),
        }
    }
}

/// Paging limits and count semantics for grid requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    #[serde(default)]
    pub count_mode: CountMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            count_mode: CountMode::default(),
        }
    }
}

impl GridConfig {
    /// Largest page this config serves, never above [`MAX_PAGE_SIZE`].
    pub fn page_size_limit(&self) -> u64 {
        self.max_page_size.min(MAX_PAGE_SIZE)
    }

    /// Clamp a requested page size into `[0, page_size_limit()]`.
    pub fn clamp_page_size(&self, requested: i64) -> u64 {
        if requested <= 0 {
            return 0;
        }
        (requested as u64).min(self.page_size_limit())
    }
}
