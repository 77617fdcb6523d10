use serde::Deserialize;

use super::{ExternalUrls, Image, Page};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TracksLink {
    /// A link to the Web API endpoint where full details of the playlist's tracks can be retrieved.
    pub href: String,
    /// Number of tracks in the playlist.
    pub total: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Owner {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    /// The name displayed on the user's profile. null if not available.
    #[serde(rename = "display_name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimplifiedPlaylist {
    /// true if the owner allows other users to modify the playlist.
    #[serde(default)]
    pub collaborative: bool,
    /// The playlist description. Only returned for modified, verified playlists, otherwise null.
    pub description: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    /// Images for the playlist, sorted by size in descending order.
    #[serde(default)]
    pub images: Vec<Image>,
    pub name: String,
    pub owner: Owner,
    pub public: Option<bool>,
    /// The version identifier for the current playlist.
    pub snapshot_id: Option<String>,
    pub tracks: TracksLink,
    pub uri: String,
}

/// Featured playlists along with the localized headline Spotify shows above them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeaturedPlaylists {
    /// The localized message of a playlist, e.g. "Popular Playlists".
    pub message: Option<String>,
    pub playlists: Page<SimplifiedPlaylist>,
}
