use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::format::{DisplayFormat, Grouping};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub tls: Option<TlsFiles>,
    pub data_file: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub display: DisplayFormat,
}

impl Settings {
    /// Read settings from the process environment. Call `dotenv` first if a
    /// `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get("DASHBOARD_HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "DASHBOARD_HOST",
                value: raw,
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match get("DASHBOARD_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "DASHBOARD_PORT",
                value: raw,
            })?,
            None => 8080,
        };

        let tls = match (get("DASHBOARD_TLS_CERT"), get("DASHBOARD_TLS_KEY")) {
            (Some(cert), Some(key)) => Some(TlsFiles {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let grouping = match get("DASHBOARD_GROUPING") {
            Some(raw) => Grouping::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: "DASHBOARD_GROUPING",
                value: raw,
            })?,
            None => Grouping::default(),
        };

        let mut display = DisplayFormat {
            grouping,
            ..DisplayFormat::default()
        };
        if let Some(currency) = get("DASHBOARD_CURRENCY") {
            display.currency = currency.trim().to_string();
        }

        Ok(Settings {
            host,
            port,
            tls,
            data_file: get("DASHBOARD_DATA_FILE").map(PathBuf::from),
            static_dir: get("DASHBOARD_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            display,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.tls.is_some() { "https" } else { "http" };
        format!("{}://localhost:{}", scheme, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_with(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_with(&[]).unwrap();
        assert_eq!(settings.bind_addr().to_string(), "0.0.0.0:8080");
        assert!(settings.tls.is_none());
        assert!(settings.data_file.is_none());
        assert_eq!(settings.static_dir, PathBuf::from("static"));
        assert_eq!(settings.display, DisplayFormat::default());
        assert_eq!(settings.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_overrides() {
        let settings = settings_with(&[
            ("DASHBOARD_HOST", "127.0.0.1"),
            ("DASHBOARD_PORT", "9443"),
            ("DASHBOARD_TLS_CERT", "cert.pem"),
            ("DASHBOARD_TLS_KEY", "key.pem"),
            ("DASHBOARD_DATA_FILE", "data/transactions.json"),
            ("DASHBOARD_CURRENCY", "$"),
            ("DASHBOARD_GROUPING", "indian"),
        ])
        .unwrap();
        assert_eq!(settings.bind_addr().to_string(), "127.0.0.1:9443");
        assert_eq!(settings.base_url(), "https://localhost:9443");
        assert_eq!(settings.data_file, Some(PathBuf::from("data/transactions.json")));
        assert_eq!(settings.display.currency, "$");
        assert_eq!(settings.display.grouping, Grouping::Indian);
    }

    #[test]
    fn test_rejects_bad_port() {
        let err = settings_with(&[("DASHBOARD_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DASHBOARD_PORT", .. }));
    }

    #[test]
    fn test_rejects_unknown_grouping() {
        let err = settings_with(&[("DASHBOARD_GROUPING", "swiss")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DASHBOARD_GROUPING", .. }));
    }

    #[test]
    fn test_rejects_half_tls() {
        let err = settings_with(&[("DASHBOARD_TLS_CERT", "cert.pem")]).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteTls));
    }
}
