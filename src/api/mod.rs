pub mod browse;
pub mod markets;
pub mod request;
pub mod response;

use std::fmt::{Debug, Display, Formatter};
use std::future::Future;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

use request::Query;

pub static API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Access token attached to every request as the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    ttype: String,
    access: String,
}

impl Token {
    pub fn new<T: Into<String>, A: Into<String>>(ttype: T, access: A) -> Self {
        Self {
            ttype: ttype.into(),
            access: access.into(),
        }
    }

    pub fn bearer<A: Into<String>>(access: A) -> Self {
        Self::new("Bearer", access)
    }

    pub fn ttype(&self) -> &str {
        self.ttype.as_str()
    }

    pub fn access(&self) -> &str {
        self.access.as_str()
    }

    pub fn to_header(&self) -> String {
        format!("{} {}", self.ttype, self.access)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Never print the secret itself
        write!(f, "{} ***", self.ttype)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("ttype", &self.ttype)
            .field("access", &"***")
            .finish()
    }
}

/// Source of the access token for each request.
///
/// Acquiring and refreshing tokens is left to the implementor; a plain [`Token`] always
/// hands out itself.
pub trait TokenProvider {
    fn token(&self) -> impl Future<Output = Result<Token>>;
}

impl TokenProvider for Token {
    fn token(&self) -> impl Future<Output = Result<Token>> {
        let token = self.clone();
        async move { Ok(token) }
    }
}

/// Authenticated GET against the Web API.
///
/// Implementors only provide [`Dispatcher::get_raw`]; decoding is shared so every
/// transport reports schema mismatches the same way.
pub trait Dispatcher {
    /// Body of a successful GET on `path` relative to the API base.
    ///
    /// A non-2xx status must fail with [`Error::Http`].
    fn get_raw(&self, path: &str, query: &Query) -> impl Future<Output = Result<String>>;

    fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> impl Future<Output = Result<T>> {
        async move {
            let body = self.get_raw(path, query).await?;
            decode(&body)
        }
    }

    /// Same as [`Dispatcher::get`] but decodes the object stored under `key` in the response.
    fn get_unwrapped<T: DeserializeOwned>(
        &self,
        key: &str,
        path: &str,
        query: &Query,
    ) -> impl Future<Output = Result<T>> {
        async move {
            let body = self.get_raw(path, query).await?;
            decode_unwrapped(key, &body)
        }
    }
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    let jd = &mut serde_json::Deserializer::from_str(body);
    Ok(serde_path_to_error::deserialize(jd)?)
}

pub fn decode_unwrapped<T: DeserializeOwned>(key: &str, body: &str) -> Result<T> {
    let mut envelope: serde_json::Value = serde_json::from_str(body)?;
    let inner = envelope
        .get_mut(key)
        .map(serde_json::Value::take)
        .ok_or_else(|| Error::decode(format!("missing `{key}` in response")))?;

    serde_path_to_error::deserialize(inner).map_err(|e| {
        let path = e.path().to_string();
        match path.as_str() {
            "." => Error::decode(format!("{key}: {}", e.inner())),
            _ => Error::decode(format!("{key}.{path}: {}", e.inner())),
        }
    })
}

/// [`Dispatcher`] sending requests with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpDispatcher<P = Token> {
    client: reqwest::Client,
    base: String,
    tokens: P,
}

impl<P: TokenProvider> HttpDispatcher<P> {
    pub fn new(tokens: P) -> Self {
        Self::with_base(API_BASE_URL, tokens)
    }

    pub fn with_base<S: AsRef<str>>(base: S, tokens: P) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.as_ref().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    pub fn url(&self, path: &str, query: &Query) -> Result<String> {
        let url = format!("{}/{}", self.base, path.trim_start_matches('/'));
        if query.is_empty() {
            Ok(url)
        } else {
            Ok(format!("{url}?{}", query.to_query_string()?))
        }
    }
}

impl<P: TokenProvider> Dispatcher for HttpDispatcher<P> {
    async fn get_raw(&self, path: &str, query: &Query) -> Result<String> {
        let url = self.url(path, query)?;
        let token = self.tokens.token().await?;

        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.as_str())
            .header(AUTHORIZATION, token.to_header())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("GET {url} failed with {status}");
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        log::trace!("{body}");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::response::{Category, Page};
    use super::*;
    use crate::api::markets::Market;

    #[test]
    fn url_joins_base_path_and_query() {
        let dispatcher = HttpDispatcher::with_base("http://localhost:8080/v1/", Token::bearer("abc"));
        let query = Query::new().optional("country", Some(Market::US)).unwrap();
        assert_eq!(
            dispatcher.url("/browse/categories/dining", &query).unwrap(),
            "http://localhost:8080/v1/browse/categories/dining?country=US"
        );
        assert_eq!(
            dispatcher.url("browse/categories", &Query::new()).unwrap(),
            "http://localhost:8080/v1/browse/categories"
        );
    }

    #[test]
    fn token_header() {
        let token = Token::bearer("abc");
        assert_eq!(token.to_header(), "Bearer abc");
        assert_eq!(token.to_string(), "Bearer ***");
    }

    #[test]
    fn debug_masks_the_secret() {
        let token = Token::bearer("s3cret");
        let dispatcher = HttpDispatcher::new(token.clone());
        assert!(!format!("{token:?}").contains("s3cret"));
        assert!(!format!("{dispatcher:?}").contains("s3cret"));
        assert!(format!("{dispatcher:?}").contains("Bearer"));
    }

    #[test]
    fn escaped_segment_keeps_the_query() {
        let dispatcher = HttpDispatcher::with_base("http://localhost:8080/v1", Token::bearer("abc"));
        let query = Query::new().optional("country", Some(Market::US)).unwrap();
        assert_eq!(
            dispatcher.url("browse/categories/hip%20hop%3Fx", &query).unwrap(),
            "http://localhost:8080/v1/browse/categories/hip%20hop%3Fx?country=US"
        );
    }

    #[test]
    fn unwrap_envelope() {
        let body = r#"{"categories":{"href":"h","items":[{"href":"h","icons":[],"id":"dinner","name":"Dinner"}],"limit":20,"next":null,"offset":0,"previous":null,"total":1}}"#;
        let page: Page<Category> = decode_unwrapped("categories", body).unwrap();
        assert_eq!(page.items[0].id, "dinner");
    }

    #[test]
    fn missing_envelope_key() {
        let result = decode_unwrapped::<Page<Category>>("playlists", r#"{"categories":{}}"#);
        assert_eq!(result, Err(Error::Decode("missing `playlists` in response".into())));
    }

    #[test]
    fn decode_error_names_the_path() {
        let result = decode::<Category>(r#"{"href":"h","icons":[],"id":7,"name":"Dinner"}"#);
        match result {
            Err(Error::Decode(message)) => assert!(message.starts_with("id"), "{message}"),
            other => panic!("expected decode error, got {other:?}"),
        }

        let result = decode_unwrapped::<Page<Category>>("categories", r#"{"categories":{"href":"h"}}"#);
        match result {
            Err(Error::Decode(message)) => assert!(message.starts_with("categories"), "{message}"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
