//! Server configuration from environment variables

use std::path::PathBuf;

use anyhow::Context;
use dictation_core::{CheckerConfig, ThresholdOverrides};

/// Runtime configuration for the checking server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of level JSON files; no items are served when unset
    pub items_dir: Option<PathBuf>,
    pub checker: CheckerConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", value))?,
            None => 3000,
        };
        let items_dir = lookup("ITEMS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let overrides = ThresholdOverrides {
            correctness_threshold: parse_threshold(&lookup, "CORRECTNESS_THRESHOLD")?,
            fuzzy_threshold: parse_threshold(&lookup, "FUZZY_THRESHOLD")?,
        };
        let checker = CheckerConfig::merge(&CheckerConfig::default(), Some(&overrides));
        checker
            .validate()
            .context("invalid checker thresholds in environment")?;

        Ok(Self {
            host,
            port,
            items_dir,
            checker,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_threshold<F>(lookup: &F, name: &str) -> anyhow::Result<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} must be a number, got {:?}", name, value))
        })
        .transpose()
}
