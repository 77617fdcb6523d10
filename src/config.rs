use std::path::PathBuf;

use serde::Deserialize;

use crate::api::{HttpDispatcher, Token, API_BASE_URL};
use crate::{Error, Result};

pub static ENV_PREFIX: &str = "BROWSIFY_";

#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub access_token: Option<String>,
    pub token_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: API_BASE_URL.to_string(),
            access_token: None,
            token_type: "Bearer".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[derive(Default, Deserialize)]
struct Overrides {
    api_base: Option<String>,
    access_token: Option<String>,
    token_type: Option<String>,
}

impl Config {
    /// Defaults, then the first yaml file that exists, then `BROWSIFY_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_with_fallback(["browsify.yml", "browsify.yaml"])?.with_env()
    }

    pub fn load_with_fallback<const N: usize>(paths: [&str; N]) -> Result<Self> {
        match paths.iter().map(PathBuf::from).find(|p| p.exists()) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_yaml(&std::fs::read_to_string(path)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn with_env(self) -> Result<Self> {
        #[cfg(feature = "env-file")]
        {
            if let Err(e) = dotenvy::dotenv() {
                log::trace!("No .env file loaded: {e}");
            }
        }
        self.with_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn with_vars<I: IntoIterator<Item = (String, String)>>(mut self, vars: I) -> Result<Self> {
        let overrides: Overrides = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(access_token) = overrides.access_token {
            self.access_token = Some(access_token);
        }
        if let Some(token_type) = overrides.token_type {
            self.token_type = token_type;
        }
        Ok(self)
    }

    pub fn token(&self) -> Result<Token> {
        match self.access_token.as_deref() {
            Some(access) if !access.trim().is_empty() => Ok(Token::new(&self.token_type, access)),
            _ => Err(Error::MissingToken),
        }
    }

    pub fn dispatcher(&self) -> Result<HttpDispatcher> {
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(Error::Config(format!("api_base must be an http(s) url, got {:?}", self.api_base)));
        }
        Ok(HttpDispatcher::with_base(&self.api_base, self.token()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, API_BASE_URL);
        assert_eq!(config.token(), Err(Error::MissingToken));
        assert!(matches!(config.dispatcher(), Err(Error::MissingToken)));
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = Config::from_yaml("access_token: abc\n").unwrap();
        assert_eq!(config.api_base, API_BASE_URL);
        assert_eq!(config.token().unwrap().to_header(), "Bearer abc");
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert!(matches!(Config::from_yaml("api_base: [1, 2]"), Err(Error::Config(_))));
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::from_yaml("api_base: http://localhost:1\naccess_token: file\n")
            .unwrap()
            .with_vars(vars(&[
                ("BROWSIFY_ACCESS_TOKEN", "env"),
                ("BROWSIFY_TOKEN_TYPE", "Basic"),
                ("HOME", "/root"),
            ]))
            .unwrap();

        assert_eq!(config.api_base, "http://localhost:1");
        assert_eq!(config.token().unwrap(), Token::new("Basic", "env"));

        let dispatcher = config.dispatcher().unwrap();
        assert_eq!(dispatcher.base(), "http://localhost:1");
    }

    #[test]
    fn blank_token_is_missing() {
        let config = Config::default()
            .with_vars(vars(&[("BROWSIFY_ACCESS_TOKEN", "  ")]))
            .unwrap();
        assert_eq!(config.token(), Err(Error::MissingToken));
    }

    #[test]
    fn debug_hides_the_token() {
        let config = Config::from_yaml("access_token: s3cret\n").unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"), "{printed}");
        assert!(printed.contains("access_token: Some(\"***\")"), "{printed}");
    }

    #[test]
    fn rejects_non_http_base() {
        let config = Config::from_yaml("api_base: ftp://example.com\naccess_token: abc\n").unwrap();
        assert!(matches!(config.dispatcher(), Err(Error::Config(_))));
    }
}
