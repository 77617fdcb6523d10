use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::{deserialize_release_date, ExternalUrls, Image};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

impl<'de> Deserialize<'de> for AlbumType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "album" => Ok(Self::Album),
            "single" => Ok(Self::Single),
            "compilation" => Ok(Self::Compilation),
            _ => Err(serde::de::Error::custom(format!(
                "invalid album type {s:?}: expected one of 'album', 'single' or 'compilation'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplifiedArtist {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimplifiedAlbum {
    pub album_type: AlbumType,
    pub total_tracks: usize,
    /// Markets the album is available in. An album counts as available when at least one of its tracks is.
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    /// The cover art for the album in various sizes, widest first.
    #[serde(default)]
    pub images: Vec<Image>,
    pub name: String,
    #[serde(deserialize_with = "deserialize_release_date")]
    pub release_date: NaiveDate,
    pub release_date_precision: DatePrecision,
    pub uri: String,
    pub artists: Vec<SimplifiedArtist>,
}
