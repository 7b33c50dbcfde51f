use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub base_url: String,
    pub session_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub demo_accounts: Vec<DemoAccount>,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(10))
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("webmail_client"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn default_session_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("session.json");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // first run: write an example pointing at a local backend
        let sample = Config {
            base_url: "http://127.0.0.1:5000/".to_string(),
            session_path: None,
            request_timeout_secs: Some(10),
            demo_accounts: vec![DemoAccount {
                email: "demo@example.com".to_string(),
                password: "demo123".to_string(),
            }],
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {}, edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    url::Url::parse(&cfg.base_url)
        .map_err(|e| anyhow::anyhow!("invalid base_url '{}': {e}", cfg.base_url))?;
    Ok(cfg)
}

pub fn resolve_session_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.session_path {
        Ok(PathBuf::from(p))
    } else {
        default_session_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_demo_accounts_and_defaults() {
        let cfg = parse_config(
            r#"
            base_url = "http://mail.local:5000/"

            [[demo_accounts]]
            email = "alice@example.com"
            password = "alice123"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.demo_accounts.len(), 1);
        assert_eq!(cfg.demo_accounts[0].email, "alice@example.com");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(cfg.session_path.is_none());
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(parse_config(r#"base_url = "not a url""#).is_err());
    }
}
