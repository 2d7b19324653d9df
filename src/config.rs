use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Groq,
}

impl LlmProvider {
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Groq => "GROQ_API_KEY",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Groq => "https://api.groq.com/openai/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "gpt-4.1",
            LlmProvider::Groq => "llama-3.3-70b-versatile",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "groq" => Ok(LlmProvider::Groq),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Everything the completion client needs; built once and handed to `AppState`.
#[derive(Clone)]
pub struct CompletionConfig {
    pub provider: LlmProvider,
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub max_body_bytes: usize,
    pub completion: CompletionConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let provider: LlmProvider = get_env_or("LLM_PROVIDER", "openai")?;
        let base_url = env::var("COMPLETION_API_URL")
            .unwrap_or_else(|_| provider.default_base_url().to_string());
        let timeout_secs: u64 = get_env_or("COMPLETION_TIMEOUT_SECS", "120")?;

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:3000")?,
            max_body_bytes: get_env_or("MAX_BODY_BYTES", "1048576")?,
            completion: CompletionConfig {
                provider,
                base_url: parse_url("COMPLETION_API_URL", &base_url)?,
                api_key: get_env(provider.api_key_var())?,
                model: env::var("COMPLETION_MODEL")
                    .unwrap_or_else(|_| provider.default_model().to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Invalid value for {}: unsupported scheme {}",
            name,
            url.scheme()
        )));
    }
    Ok(url)
}
