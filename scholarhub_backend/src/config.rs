use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ScholarhubConfig {
    pub paging: PagingConfig,
    pub latency: LatencyConfig,
    pub search: SearchConfig,
    /// Optional JSON record store; the built-in seed is used when unset.
    pub seed_path: Option<PathBuf>,
}

impl ScholarhubConfig {
    pub fn from_env() -> Self {
        let seed_path = env::var("SCHOLARHUB_SEED_PATH").ok().and_then(|raw| {
            if raw.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(raw))
            }
        });
        Self {
            paging: PagingConfig::from_env(),
            latency: LatencyConfig::from_env(),
            search: SearchConfig::from_env(),
            seed_path,
        }
    }

    /// Same knobs as the defaults but with every simulated delay removed.
    pub fn instant() -> Self {
        Self {
            latency: LatencyConfig {
                page_load: Duration::ZERO,
                search: Duration::ZERO,
                send: Duration::ZERO,
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self { page_size: 4 }
    }
}

impl PagingConfig {
    pub fn from_env() -> Self {
        let page_size = parse_env("SCHOLARHUB_PAGE_SIZE")
            .filter(|size: &usize| *size > 0)
            .unwrap_or(4);
        Self { page_size }
    }
}

/// Simulated server round-trips.
#[derive(Debug, Clone, Copy)]
pub struct LatencyConfig {
    pub page_load: Duration,
    pub search: Duration,
    pub send: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            page_load: Duration::from_millis(800),
            search: Duration::from_millis(1000),
            send: Duration::from_millis(1000),
        }
    }
}

impl LatencyConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            page_load: parse_env("SCHOLARHUB_PAGE_LOAD_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.page_load),
            search: parse_env("SCHOLARHUB_SEARCH_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.search),
            send: parse_env("SCHOLARHUB_SEND_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.send),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub suggestion_limit: usize,
    pub min_suggestion_chars: usize,
    pub recent_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: 5,
            min_suggestion_chars: 2,
            recent_limit: 5,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            suggestion_limit: parse_env("SCHOLARHUB_SUGGESTION_LIMIT")
                .unwrap_or(defaults.suggestion_limit),
            min_suggestion_chars: defaults.min_suggestion_chars,
            recent_limit: parse_env("SCHOLARHUB_RECENT_LIMIT").unwrap_or(defaults.recent_limit),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}
