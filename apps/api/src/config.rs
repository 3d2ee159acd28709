use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the CV record is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    File { data_dir: PathBuf },
    Redis { url: String },
    Memory,
}

impl StoreBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StoreBackend::File { .. } => "file",
            StoreBackend::Redis { .. } => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match var("PORT") {
            Some(p) => p
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8080,
        };

        let backend = var("CV_STORE").unwrap_or_else(|| "file".to_string());
        let store = match backend.as_str() {
            "file" => StoreBackend::File {
                data_dir: var("CV_DATA_DIR")
                    .unwrap_or_else(|| "./data".to_string())
                    .into(),
            },
            "redis" => StoreBackend::Redis {
                url: var("REDIS_URL").with_context(|| {
                    "Required environment variable 'REDIS_URL' is not set (CV_STORE=redis)"
                })?,
            },
            "memory" => StoreBackend::Memory,
            other => bail!("CV_STORE must be one of file, redis, memory (got '{other}')"),
        };

        Ok(Config {
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(
            config.store,
            StoreBackend::File {
                data_dir: PathBuf::from("./data")
            }
        );
    }

    #[test]
    fn test_redis_requires_url() {
        assert!(load(&[("CV_STORE", "redis")]).is_err());
        let config = load(&[("CV_STORE", "redis"), ("REDIS_URL", "redis://localhost")]).unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: "redis://localhost".into()
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("CV_STORE", "postgres")]).is_err());
    }

    #[test]
    fn test_memory_backend() {
        let config = load(&[("CV_STORE", "memory"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.port, 9000);
    }
}
