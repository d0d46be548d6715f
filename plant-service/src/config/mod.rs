use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Uploads above this size are rejected before they reach the image decoder.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct PlantConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub limits: LimitsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` when `GEMINI_API_KEY` is unset; model calls then fail individually.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl PlantConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);

        Ok(PlantConfig {
            common,
            gemini: GeminiSettings {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout_secs: parse_var(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            limits: LimitsConfig {
                max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            observability: ObservabilityConfig {
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
