use thiserror::Error;
use url::Url;

pub const PROCESS_PATH: &str = "/email/process";
pub const CLASSIFY_PATH: &str = "/email/classify";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("unsupported scheme {scheme:?} in base url (expected http or https)")]
    UnsupportedScheme { scheme: String },
}

/// Location of the parsing/classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: String,
}

impl ServiceConfig {
    /// Accepts an absolute http(s) URL, with or without a trailing `/`.
    /// Endpoints are appended to it verbatim, so query strings and fragments
    /// are rejected.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "query strings and fragments are not allowed".to_string(),
            });
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn process_url(&self) -> String {
        format!("{}{PROCESS_PATH}", self.base_url)
    }

    pub fn classify_url(&self) -> String {
        format!("{}{CLASSIFY_PATH}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_appended_to_base() {
        let config = ServiceConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.process_url(), "http://localhost:8000/email/process");
        assert_eq!(config.classify_url(), "http://localhost:8000/email/classify");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let config = ServiceConfig::new("https://api.example.com/v1").unwrap();
        assert_eq!(
            config.process_url(),
            "https://api.example.com/v1/email/process"
        );
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            ServiceConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(
            ServiceConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme {
                scheme: "ftp".to_string()
            })
        );
        assert!(ServiceConfig::new("http://example.com/?x=1").is_err());
    }
}
