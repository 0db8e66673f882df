use crate::errors::{CalcError, CalcResult};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub dashboard_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> CalcResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (process env in production).
    pub fn from_lookup<F>(lookup: F) -> CalcResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = var_or("SERVER_PORT", "8501")
            .parse::<u16>()
            .map_err(|e| CalcError::Config(format!("SERVER_PORT: {e}")))?;

        Ok(Self {
            server_host: var_or("SERVER_HOST", "0.0.0.0"),
            server_port,
            dashboard_dir: PathBuf::from(var_or("DASHBOARD_DIR", "dashboard")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
