use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_DB_LOCATION: &str = "./data";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Values read from a dotenv-style file (`KEY=value`, `#` comments,
/// optional `export ` prefix and quotes).
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment. Blank values count as unset.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    OpenAI,
}

impl Backend {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(Backend::Gemini),
            "openai" => Some(Backend::OpenAI),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReflectionSettings {
    pub backend: Backend,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

/// Everything the binary needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub reflection: ReflectionSettings,
}

impl Settings {
    pub fn resolve(config: &AppConfig) -> Self {
        let backend = config
            .lookup("REFLECTION_BACKEND")
            .and_then(|name| Backend::from_name(&name))
            .unwrap_or(Backend::Gemini);
        let api_key = match backend {
            Backend::Gemini => config
                .lookup("GEMINI_API_KEY")
                .or_else(|| config.lookup("API_KEY")),
            Backend::OpenAI => config.lookup("OPENAI_API_KEY"),
        };
        let timeout = config
            .lookup("REFLECTION_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            data_dir: PathBuf::from(
                config
                    .lookup("DB_LOCATION")
                    .unwrap_or(DEFAULT_DB_LOCATION.to_string()),
            ),
            log_level: config
                .lookup("LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL.to_string()),
            reflection: ReflectionSettings {
                backend,
                api_key,
                model: config.lookup("REFLECTION_MODEL"),
                base_url: config.lookup("REFLECTION_BASE_URL"),
                timeout: Duration::from_secs(timeout),
            },
        }
    }
}
