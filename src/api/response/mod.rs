mod album;
mod category;
mod playlist;
mod recommendations;

pub use album::*;
pub use category::*;
pub use playlist::*;
pub use recommendations::*;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Offset and limit carried by a `next`/`previous` page link.
#[derive(Default, Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Paginate {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Pull the query of a page link apart into its [`Paginate`] window.
pub fn parse_pagination(url: Option<&str>) -> Option<Paginate> {
    let url = url?;
    match url.split_once('?') {
        Some((_, query)) => match serde_qs::from_str(query) {
            Ok(paginate) => Some(paginate),
            Err(e) => {
                log::warn!("Ignoring malformed page link {url}: {e}");
                None
            }
        },
        None => Some(Paginate::default()),
    }
}

/// One page of a list resource, unwrapped from its envelope key.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Page<T> {
    /// A link to the Web API endpoint returning the full result of the request
    pub href: String,
    pub items: Vec<T>,
    /// The maximum number of items in the response (as set in the query or by default).
    pub limit: usize,
    /// URL to the next page of items.
    pub next: Option<String>,
    /// The offset of the items returned (as set in the query or by default)
    pub offset: usize,
    /// URL to the previous page of items.
    pub previous: Option<String>,
    /// The total number of items available to return.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn next_page(&self) -> Option<Paginate> {
        parse_pagination(self.next.as_deref())
    }

    pub fn prev_page(&self) -> Option<Paginate> {
        parse_pagination(self.previous.as_deref())
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// External URLs
///
/// Usually just the Spotify URL
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExternalUrls {
    /// The Spotify URL for the object.
    pub spotify: Option<String>,
}

/// Spotify Image
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Image {
    /// The source URL of the image
    pub url: String,
    /// The image height in pixels.
    pub height: Option<u32>,
    /// The image width in pixels.
    pub width: Option<u32>,
}

pub fn deserialize_release_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    // Precision varies per album: `2024`, `2024-03` or `2024-03-08`
    let s = String::deserialize(deserializer)?;
    let full = match s.matches('-').count() {
        0 => format!("{s}-01-01"),
        1 => format!("{s}-01"),
        _ => s,
    };
    NaiveDate::parse_from_str(&full, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
