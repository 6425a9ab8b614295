use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Workers AI model used for listing extraction.
const DEFAULT_TEXT_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub cloudflare: CloudflareConfig,
    pub models: ModelConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareConfig {
    pub account_id: String,
    pub api_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Chat model answering the listing prompt (e.g. llama-3.3-70b)
    pub text_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory the frontend is served from
    pub dir: String,
}

impl CompetitionsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CompetitionsConfig {
            common: common_config,
            cloudflare: CloudflareConfig {
                account_id: get_env("CLOUDFLARE_ACCOUNT_ID", None, is_prod)?,
                api_token: get_env("CLOUDFLARE_API_TOKEN", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("COMPETITIONS_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
            assets: AssetConfig {
                dir: get_env("STATIC_ASSETS_DIR", Some("static"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
