use serde::Deserialize;

use super::Image;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Category {
    /// A link to the Web API endpoint returning the full result of the request
    pub href: String,
    /// The category icon, in various sizes.
    pub icons: Vec<Image>,
    /// The [Spotify ID](https://developer.spotify.com/documentation/web-api/concepts/spotify-uris-ids) for the category.
    pub id: String,
    /// The name of the category.
    pub name: String,
}
