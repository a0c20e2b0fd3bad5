use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_DASHBOARD_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_path: PathBuf,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            data_path: resolve_data_path(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let mut config =
            Self::new(env::var("DASHBOARD_URL").unwrap_or_else(|_| DEFAULT_DASHBOARD_URL.into()));
        if let Ok(raw) = env::var("DASHBOARD_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                format!("DASHBOARD_TIMEOUT_SECS must be a whole number, got '{raw}'")
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
