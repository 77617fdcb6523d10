use std::fmt::{Display, Formatter};

use color_eyre::{Report, Section};
use serde::Deserialize;

pub mod api;
pub mod config;

pub use api::{
    browse::{
        Browse, CategoriesOptions, CategoryOptions, CategoryPlaylistsOptions,
        FeaturedPlaylistsOptions, NewReleasesOptions, RecommendationsOptions,
    },
    markets::{Locale, Market},
    request::{Pagination, Query, QueryPair, QueryValue, Range},
    Dispatcher, HttpDispatcher, Token, TokenProvider, API_BASE_URL,
};
pub use config::Config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Deserialize)]
struct ErrorData {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    pub error: ErrorData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter value that has no textual form the API accepts, e.g. a NaN range bound.
    Encoding(String),
    /// Non-2xx response from the API, with the raw response body.
    Http { status: u16, body: String },
    /// Response body did not match the expected schema.
    Decode(String),
    /// The request never produced a response.
    Request(String),
    Config(String),
    MissingToken,
}

impl Error {
    pub fn encoding<D: Display>(message: D) -> Self {
        Error::Encoding(message.to_string())
    }

    pub fn decode<D: Display>(message: D) -> Self {
        Error::Decode(message.to_string())
    }

    /// Message from the API's json error object, if the failed response carried one.
    pub fn message(&self) -> Option<String> {
        match self {
            Error::Http { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .map(|b| b.error.message),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Encoding(e) => write!(f, "failed to encode query parameter: {e}"),
            Error::Http { status, body } => match self.message() {
                Some(message) => write!(f, "[{status}] {message}"),
                None if body.is_empty() => write!(f, "[{status}] request failed"),
                None => write!(f, "[{status}] {body}"),
            },
            Error::Decode(e) => write!(f, "failed to decode response: {e}"),
            Error::Request(e) => write!(f, "failed to send request: {e}"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
            Error::MissingToken => write!(f, "no access token configured"),
        }
    }
}

impl From<Error> for Report {
    fn from(value: Error) -> Self {
        let report = Report::msg(value.to_string());
        match value {
            Error::Http { status: 401, .. } => report
                .suggestion("The token is invalid or expired, try requesting a new one"),
            Error::Http { status: 429, .. } => report.suggestion("Rate limited, try again later"),
            Error::Decode(_) => report
                .suggestion("Check the Spotify Web API reference for the current response shape"),
            Error::MissingToken => report
                .suggestion("Set BROWSIFY_ACCESS_TOKEN or add `access_token` to browsify.yml"),
            _ => report,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Request(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Decode(value.to_string())
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Error::Decode(value.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        Error::Encoding(value.to_string())
    }
}

impl From<envy::Error> for Error {
    fn from(value: envy::Error) -> Self {
        Error::Config(value.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Error::Config(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Config(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_api_message() {
        let error = Error::Http {
            status: 404,
            body: r#"{"error":{"status":404,"message":"Non existing id"}}"#.into(),
        };
        assert_eq!(error.message().as_deref(), Some("Non existing id"));
        assert_eq!(error.to_string(), "[404] Non existing id");
    }

    #[test]
    fn http_error_without_json_body() {
        let error = Error::Http { status: 502, body: "Bad Gateway".into() };
        assert_eq!(error.message(), None);
        assert_eq!(error.to_string(), "[502] Bad Gateway");
    }
}
