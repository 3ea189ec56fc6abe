use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LOCAL_MAX_TOKENS: u32 = 100;
const DEFAULT_DEMO_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct MindtrackConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub local_model: LocalModelConfig,
    pub insights: InsightsConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// `GOOGLE_AI_API_KEY`; empty means the service runs in fallback mode.
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini model used for tips and insights (e.g., gemini-1.5-flash)
    pub text_model: String,
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LocalModelConfig {
    pub enabled: bool,
    /// Base URL of the llama.cpp-compatible inference server
    pub endpoint: String,
    pub max_new_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct InsightsConfig {
    /// Artificial latency of the demo response, in milliseconds
    pub demo_delay_ms: u64,
}

impl MindtrackConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_production();

        Ok(MindtrackConfig {
            google: GoogleConfig {
                api_key: env::var("GOOGLE_AI_API_KEY").unwrap_or_default(),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("GEMINI_TEXT_MODEL", Some("gemini-1.5-flash"), is_prod)?,
                upstream_timeout_secs: parse_env(
                    "UPSTREAM_TIMEOUT_SECS",
                    DEFAULT_UPSTREAM_TIMEOUT_SECS,
                )?,
            },
            local_model: LocalModelConfig {
                enabled: parse_env("LOCAL_MODEL_ENABLED", false)?,
                endpoint: get_env("LOCAL_MODEL_URL", Some("http://127.0.0.1:8081"), is_prod)?,
                max_new_tokens: parse_env("LOCAL_MODEL_MAX_TOKENS", DEFAULT_LOCAL_MAX_TOKENS)?,
            },
            insights: InsightsConfig {
                demo_delay_ms: parse_env("INSIGHTS_DEMO_DELAY_MS", DEFAULT_DEMO_DELAY_MS)?,
            },
            common: common_config,
        })
    }

    /// Whether `GOOGLE_AI_API_KEY` is set to a non-empty value.
    pub fn api_key_configured(&self) -> bool {
        !self.google.api_key.is_empty()
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.models.upstream_timeout_secs)
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.insights.demo_delay_ms)
    }
}

impl Default for MindtrackConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            google: GoogleConfig {
                api_key: String::new(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            },
            models: ModelConfig {
                text_model: "gemini-1.5-flash".to_string(),
                upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            },
            local_model: LocalModelConfig {
                enabled: false,
                endpoint: "http://127.0.0.1:8081".to_string(),
                max_new_tokens: DEFAULT_LOCAL_MAX_TOKENS,
            },
            insights: InsightsConfig {
                demo_delay_ms: DEFAULT_DEMO_DELAY_MS,
            },
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                if is_prod {
                    tracing::warn!(key, default = def, "Using default value in production");
                }
                Ok(def.to_string())
            } else {
                Err(AppError::config(format!("{} is required but not set", key)))
            }
        }
    }
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{} has an invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_api_key() {
        let config = MindtrackConfig::default();
        assert!(!config.api_key_configured());
        assert_eq!(config.models.text_model, "gemini-1.5-flash");
        assert_eq!(config.demo_delay(), Duration::from_secs(1));
    }

    #[test]
    fn any_non_empty_api_key_is_configured() {
        let mut config = MindtrackConfig::default();
        config.google.api_key = "   ".to_string();
        assert!(config.api_key_configured());

        config.google.api_key = "secret".to_string();
        assert!(config.api_key_configured());
    }

    // The only test in this crate that touches GOOGLE_AI_API_KEY
    #[test]
    fn load_reads_api_key_from_environment() {
        env::set_var("GOOGLE_AI_API_KEY", "   ");
        let whitespace = MindtrackConfig::load().unwrap();

        env::set_var("GOOGLE_AI_API_KEY", "");
        let empty = MindtrackConfig::load().unwrap();

        env::remove_var("GOOGLE_AI_API_KEY");
        let unset = MindtrackConfig::load().unwrap();

        assert_eq!(whitespace.google.api_key, "   ");
        assert!(whitespace.api_key_configured());
        assert!(!empty.api_key_configured());
        assert!(!unset.api_key_configured());
    }

    #[test]
    fn parse_env_falls_back_to_default_when_unset() {
        let value: u64 = parse_env("MINDTRACK_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
