use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

/// Gemini REST API base URL.
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Origins whose value is echoed back by the portrait endpoint instead of `*`.
const DEFAULT_ALLOWED_ORIGINS: &str = "https://redirectfilter.com,https://www.redirectfilter.com";

/// Inbound body cap, in line with typical serverless request limits.
const DEFAULT_MAX_BODY_BYTES: usize = 4_500_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub models: ModelConfig,
    pub cors: CorsSettings,
    pub portrait: PortraitSettings,
    pub limits: LimitsConfig,
    /// Whether internal error messages reach the caller.
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub base_url: String,
    /// `None` leaves outbound calls unbounded.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for the portrait endpoint (must support IMAGE output).
    pub image_model: String,
    /// Model for the passthrough endpoint.
    pub text_model: String,
    /// Model for the edge passthrough endpoint.
    pub edge_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortraitSettings {
    pub input_mime_type: String,
    pub aspect_ratio: String,
    pub image_size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_body_bytes: usize,
}

impl ProxyConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ProxyConfig {
            common: common_config,
            gemini: GeminiSettings {
                base_url: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                request_timeout_secs: non_zero_timeout(get_optional_env(
                    "GEMINI_REQUEST_TIMEOUT_SECS",
                )?)?,
            },
            models: ModelConfig {
                image_model: get_env(
                    "GENAI_IMAGE_MODEL",
                    Some("gemini-3-pro-image-preview"),
                    is_prod,
                )?,
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-1.5-flash"), is_prod)?,
                edge_model: get_env("GENAI_EDGE_MODEL", Some("gemini-1.5-flash"), is_prod)?,
            },
            cors: CorsSettings {
                allowed_origins: split_list(&get_env(
                    "PROXY_ALLOWED_ORIGINS",
                    Some(DEFAULT_ALLOWED_ORIGINS),
                    is_prod,
                )?),
            },
            portrait: PortraitSettings {
                input_mime_type: get_env("PORTRAIT_INPUT_MIME_TYPE", Some("image/jpeg"), is_prod)?,
                aspect_ratio: get_env("PORTRAIT_ASPECT_RATIO", Some("9:16"), is_prod)?,
                image_size: get_env("PORTRAIT_IMAGE_SIZE", Some("1K"), is_prod)?,
            },
            limits: LimitsConfig {
                max_body_bytes: parse_env(
                    "PROXY_MAX_BODY_BYTES",
                    &get_env(
                        "PROXY_MAX_BODY_BYTES",
                        Some(&DEFAULT_MAX_BODY_BYTES.to_string()),
                        is_prod,
                    )?,
                )?,
            },
            expose_error_details: parse_env(
                "PROXY_EXPOSE_ERROR_DETAILS",
                &get_env("PROXY_EXPOSE_ERROR_DETAILS", Some("true"), is_prod)?,
            )?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::config(format!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::config(format!("{} is required but not set", key)))
            }
        }
    }
}

fn get_optional_env<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => parse_env(key, &val).map(Some),
        _ => Ok(None),
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        AppError::config(format!("{} has invalid value '{}': {}", key, value, e))
    })
}

/// `Some(0)` is rejected: a zero timeout fails every upstream call. `None` means no timeout.
fn non_zero_timeout(secs: Option<u64>) -> Result<Option<u64>, AppError> {
    match secs {
        Some(0) => Err(AppError::config(
            "GEMINI_REQUEST_TIMEOUT_SECS must be greater than 0, or unset for no timeout",
        )),
        other => Ok(other),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_skips_blanks() {
        assert_eq!(
            split_list(" https://a.example.com, ,https://b.example.com ,"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn parse_env_reports_key_and_value() {
        let err = parse_env::<usize>("PROXY_MAX_BODY_BYTES", "lots").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("PROXY_MAX_BODY_BYTES"));
        assert!(message.contains("lots"));
    }

    #[test]
    fn parse_env_accepts_booleans() {
        assert!(parse_env::<bool>("PROXY_EXPOSE_ERROR_DETAILS", "true").unwrap());
        assert!(!parse_env::<bool>("PROXY_EXPOSE_ERROR_DETAILS", " false ").unwrap());
    }

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env("GENAI_PROXY_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = non_zero_timeout(Some(0)).unwrap_err();
        assert!(err.to_string().contains("GEMINI_REQUEST_TIMEOUT_SECS"));

        assert_eq!(non_zero_timeout(Some(30)).unwrap(), Some(30));
        assert_eq!(non_zero_timeout(None).unwrap(), None);
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env("GENAI_PROXY_TEST_UNSET_KEY", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }
}
