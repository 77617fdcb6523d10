use serde::Deserialize;

use super::{ExternalUrls, SimplifiedAlbum, SimplifiedArtist};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SeedType {
    #[serde(alias = "ARTIST")]
    Artist,
    #[serde(alias = "TRACK")]
    Track,
    #[serde(alias = "GENRE")]
    Genre,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecommendationSeed {
    /// The number of tracks available after min_* and max_* filters have been applied.
    #[serde(rename = "afterFilteringSize")]
    pub after_filtering_size: usize,
    /// The number of tracks available after relinking for regional availability.
    #[serde(rename = "afterRelinkingSize")]
    pub after_relinking_size: usize,
    /// A link to the full track or artist data for this seed. Null for genre seeds.
    pub href: Option<String>,
    /// The id used to select this seed, same as the one passed in the request.
    pub id: String,
    /// The number of recommended tracks available for this seed.
    #[serde(rename = "initialPoolSize")]
    pub initial_pool_size: usize,
    #[serde(rename = "type")]
    pub seed_type: SeedType,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Track {
    pub album: SimplifiedAlbum,
    pub artists: Vec<SimplifiedArtist>,
    pub duration_ms: u64,
    pub explicit: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    pub name: String,
    pub popularity: u8,
    pub preview_url: Option<String>,
    pub track_number: u32,
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Recommendations {
    pub seeds: Vec<RecommendationSeed>,
    pub tracks: Vec<Track>,
}
