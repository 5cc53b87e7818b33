//! Process configuration, read from the environment.

use std::env;

use crate::runtime::handle::RuntimeConfig;

/// Default generative model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default REST base for the generative language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the insight generator.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// API credential; absence is reported before any request is made.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// REST base URL, without a trailing slash.
    pub endpoint: String,
    /// Business named in the prompt.
    pub business_name: String,
    /// Per-request timeout in milliseconds; `0` disables it.
    pub request_timeout_ms: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            business_name: "Norina Fashions".to_string(),
            request_timeout_ms: 60_000,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Product slug used in export file names.
    pub product: String,
    /// Insight generator settings.
    pub insight: InsightConfig,
    /// Store runtime settings.
    pub runtime: RuntimeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product: "norina-fashions".to_string(),
            insight: InsightConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Config {
    /// Overlays environment variables on [`Config::default`].
    ///
    /// `API_KEY` (or `GEMINI_API_KEY`), `STOCKLOG_PRODUCT`, `STOCKLOG_BUSINESS`,
    /// `STOCKLOG_MODEL`, `STOCKLOG_INSIGHT_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        cfg.insight.api_key = get("API_KEY").or_else(|| get("GEMINI_API_KEY"));
        if let Some(v) = get("STOCKLOG_PRODUCT") {
            cfg.product = v;
        }
        if let Some(v) = get("STOCKLOG_BUSINESS") {
            cfg.insight.business_name = v;
        }
        if let Some(v) = get("STOCKLOG_MODEL") {
            cfg.insight.model = v;
        }
        if let Some(v) = get("STOCKLOG_INSIGHT_ENDPOINT") {
            cfg.insight.endpoint = v.trim_end_matches('/').to_string();
        }
        if cfg.insight.api_key.is_none() {
            tracing::warn!("API_KEY not set; insight generation is unavailable");
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "k"),
            ("STOCKLOG_PRODUCT", "acme"),
            ("STOCKLOG_INSIGHT_ENDPOINT", "http://localhost:9/"),
        ]
        .into_iter()
        .collect();
        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.insight.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.product, "acme");
        assert_eq!(cfg.insight.endpoint, "http://localhost:9");
        assert_eq!(cfg.insight.model, DEFAULT_MODEL);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let cfg = Config::from_lookup(|k| (k == "API_KEY").then(|| "  ".to_string()));
        assert!(cfg.insight.api_key.is_none());
    }
}
