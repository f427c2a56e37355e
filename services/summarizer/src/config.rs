use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const SUMMARY_MODEL: &str = "llama-3.1-8b-instant";
pub const SUMMARY_SYSTEM_PROMPT: &str = "Summarize this text into 3 clear bullet points.";
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in environment variables")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    pub upstream: UpstreamConfig,
}

#[derive(Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Groq endpoint with the standard timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            url: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            api_key: api_key.into(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let host = match lookup("SUMMARIZER_HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "SUMMARIZER_HOST",
                value,
                expected: "an IP address",
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("SUMMARIZER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "SUMMARIZER_PORT",
                value,
                expected: "a valid port number",
            })?,
            None => DEFAULT_PORT,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                    expected: "\"pretty\" or \"json\"",
                })
            }
        };

        let mut upstream = UpstreamConfig::new(api_key);
        if let Some(url) = lookup("SUMMARIZER_UPSTREAM_URL") {
            upstream.url = url;
        }

        Ok(Self {
            host,
            port,
            log_format,
            upstream,
        })
    }
}
