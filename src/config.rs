//! Runtime settings resolved from CLI flags, environment and defaults.
//!
//! A flag wins over its environment variable, which wins over the default.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_INPUT: &str = "carregamentos.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_TITLE: &str = "Análise de Produção - Carregamento";
pub const DEFAULT_LOG_FILE: &str = "logs/carregamento.log";

pub const INPUT_ENV: &str = "CARREGAMENTO_INPUT";
pub const HOST_ENV: &str = "CARREGAMENTO_HOST";
pub const PORT_ENV: &str = "CARREGAMENTO_PORT";
pub const TITLE_ENV: &str = "CARREGAMENTO_TITLE";
pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

/// Settings of the `serve` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub input: PathBuf,
    pub host: String,
    pub port: u16,
    pub title: String,
}

impl ServeConfig {
    /// Resolves against the process environment.
    pub fn resolve(
        input: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
        title: Option<String>,
    ) -> Result<Self> {
        Self::resolve_with(input, host, port, title, env_var)
    }

    /// Resolves against an arbitrary variable lookup.
    pub fn resolve_with(
        input: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
        title: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let port = match port {
            Some(port) => port,
            None => match lookup(PORT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{PORT_ENV} must be a port number, got '{raw}'"))?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Self {
            input: resolve_input_with(input, &lookup),
            host: host
                .or_else(|| lookup(HOST_ENV))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            title: title
                .or_else(|| lookup(TITLE_ENV))
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }
}

/// Input path for commands that only need the data file.
pub fn resolve_input(input: Option<PathBuf>) -> PathBuf {
    resolve_input_with(input, &env_var)
}

fn resolve_input_with(input: Option<PathBuf>, lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    input
        .or_else(|| lookup(INPUT_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Log file path for the JSON log layer.
pub fn log_file_path() -> PathBuf {
    env_var(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
