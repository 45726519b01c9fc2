use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

#[serde_inline_default]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde_inline_default("127.0.0.1".to_string())]
    pub app_host: String,
    #[serde_inline_default(9876)]
    pub app_port: u32,
    #[serde_inline_default("info".to_string())]
    pub rust_log: String,
    // upper bound for a single outbound delivery, connect + response
    #[serde_inline_default(10_000)]
    pub delivery_timeout_ms: u64,
    #[serde_inline_default(3_000)]
    pub delivery_connect_timeout_ms: u64,
    #[serde_inline_default(60)]
    pub tcp_keepalive_secs: u64,
    #[serde_inline_default(1024)]
    pub listen_backlog: u32,
}

impl Config {
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    pub fn delivery_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_connect_timeout_ms)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

fn load_config() -> Result<Config> {
    // a missing .env is fine, the process env is authoritative
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("failed to read .env file");
        }
    }
    envy::from_env::<Config>()
        .map_err(|e| anyhow!(e))
        .context(format!(
            "at {} line {} column {}",
            file!(),
            line!(),
            column!(),
        ))
}

pub fn get() -> Result<&'static Config> {
    CONFIG.get_or_try_init(load_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_vars() -> anyhow::Result<()> {
        let cnf: Config = envy::from_iter(Vec::<(String, String)>::new())?;
        assert_eq!(cnf.app_host, "127.0.0.1");
        assert_eq!(cnf.app_port, 9876);
        assert_eq!(cnf.delivery_timeout(), Duration::from_secs(10));
        assert_eq!(cnf.socket_addr(), "127.0.0.1:9876");
        Ok(())
    }

    #[test]
    fn env_overrides_defaults() -> anyhow::Result<()> {
        let cnf: Config = envy::from_iter(vec![
            ("APP_PORT".to_string(), "8080".to_string()),
            ("DELIVERY_TIMEOUT_MS".to_string(), "250".to_string()),
        ])?;
        assert_eq!(cnf.app_port, 8080);
        assert_eq!(cnf.delivery_timeout(), Duration::from_millis(250));
        Ok(())
    }
}
