use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::{Error, Result};

use super::{
    markets::{Locale, Market},
    request::{Bound, Pagination, Query, Range},
    response::{
        Category, FeaturedPlaylists, Page, Recommendations, SimplifiedAlbum, SimplifiedPlaylist,
    },
    Dispatcher,
};

/// Parameters of [`Browse::featured_playlists`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedPlaylistsOptions {
    /// Language of the response message and playlist names, e.g. `es_MX`.
    pub locale: Option<Locale>,
    pub country: Option<Market>,
    /// Local time of the user, used to pick playlists relevant to that time of day.
    pub timestamp: Option<NaiveDateTime>,
    pub page: Pagination,
}

impl FeaturedPlaylistsOptions {
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn country(mut self, country: Market) -> Self {
        self.country = Some(country);
        self
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    pub fn query(&self) -> Result<Query> {
        Ok(Query::new()
            .optional("locale", self.locale.as_ref())?
            .optional("country", self.country)?
            .optional("timestamp", self.timestamp)?
            .paginate(self.page))
    }
}

/// Parameters of [`Browse::new_releases`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReleasesOptions {
    pub country: Option<Market>,
    pub page: Pagination,
}

impl NewReleasesOptions {
    pub fn country(mut self, country: Market) -> Self {
        self.country = Some(country);
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    pub fn query(&self) -> Result<Query> {
        Ok(Query::new()
            .optional("country", self.country)?
            .paginate(self.page))
    }
}

/// Parameters of [`Browse::category`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryOptions {
    pub country: Option<Market>,
    pub locale: Option<Locale>,
}

impl CategoryOptions {
    pub fn country(mut self, country: Market) -> Self {
        self.country = Some(country);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn query(&self) -> Result<Query> {
        Query::new()
            .optional("country", self.country)?
            .optional("locale", self.locale.as_ref())
    }
}

/// Parameters of [`Browse::categories`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesOptions {
    pub country: Option<Market>,
    pub locale: Option<Locale>,
    pub page: Pagination,
}

impl CategoriesOptions {
    pub fn country(mut self, country: Market) -> Self {
        self.country = Some(country);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    pub fn query(&self) -> Result<Query> {
        Ok(Query::new()
            .optional("country", self.country)?
            .optional("locale", self.locale.as_ref())?
            .paginate(self.page))
    }
}

/// Parameters of [`Browse::category_playlists`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPlaylistsOptions {
    pub country: Option<Market>,
    pub page: Pagination,
}

impl CategoryPlaylistsOptions {
    pub fn country(mut self, country: Market) -> Self {
        self.country = Some(country);
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    pub fn query(&self) -> Result<Query> {
        Ok(Query::new()
            .optional("country", self.country)?
            .paginate(self.page))
    }
}

macro_rules! recommendations_options {
    ($($(#[$meta: meta])* $attr: ident: $ty: ty),* $(,)?) => {
        /// Parameters of [`Browse::recommendations`].
        ///
        /// Every tunable attribute is a [`Range`] sent as `min_<attr>`, `target_<attr>` and
        /// `max_<attr>`. The total number of seeds is capped by the API (currently five), which
        /// is not checked here.
        #[derive(Debug, Clone, PartialEq)]
        pub struct RecommendationsOptions {
            /// Target size of the list of recommended tracks. Default: 20
            pub limit: usize,
            pub market: Option<Market>,
            pub seed_artists: Vec<String>,
            pub seed_genres: Vec<String>,
            pub seed_tracks: Vec<String>,
            $(
                $(#[$meta])*
                pub $attr: Range<$ty>,
            )*
        }

        impl Default for RecommendationsOptions {
            fn default() -> Self {
                Self {
                    limit: Pagination::default().limit,
                    market: None,
                    seed_artists: Vec::new(),
                    seed_genres: Vec::new(),
                    seed_tracks: Vec::new(),
                    $($attr: Range::default(),)*
                }
            }
        }

        impl RecommendationsOptions {
            /// Tunable attribute names in the order they are encoded.
            pub const ATTRIBUTES: &'static [&'static str] = &[$(stringify!($attr),)*];

            $(
                pub fn $attr(mut self, range: Range<$ty>) -> Self {
                    self.$attr = range;
                    self
                }
            )*

            /// Set one bound of an attribute from its textual value, e.g. `("tempo", "120")`.
            pub fn tune(&mut self, bound: Bound, attr: &str, value: &str) -> Result<()> {
                $(
                    if attr == stringify!($attr) {
                        let value = value.trim().parse::<$ty>().map_err(|e| {
                            Error::encoding(format!("invalid {bound} {attr} {value:?}: {e}"))
                        })?;
                        self.$attr.set(bound, value);
                        return Ok(());
                    }
                )*
                Err(Error::encoding(format!("unknown tunable attribute {attr:?}")))
            }

            fn ranges(&self, mut query: Query) -> Result<Query> {
                $(query = query.range(stringify!($attr), &self.$attr)?;)*
                Ok(query)
            }
        }
    };
}

recommendations_options! {
    /// Confidence from 0.0 to 1.0 that the track is acoustic.
    acousticness: f32,
    /// How suitable a track is for dancing, from 0.0 to 1.0.
    danceability: f32,
    duration_ms: u32,
    /// Perceptual measure of intensity and activity, from 0.0 to 1.0.
    energy: f32,
    instrumentalness: f32,
    /// Pitch class of the track, 0 = C, 1 = C♯/D♭ and so on.
    key: u8,
    liveness: f32,
    /// Overall loudness in decibels, typically between -60 and 0.
    loudness: f32,
    /// 1 for major, 0 for minor.
    mode: u8,
    popularity: u8,
    speechiness: f32,
    /// Estimated tempo in beats per minute.
    tempo: f32,
    time_signature: u8,
    /// Musical positiveness conveyed by the track, from 0.0 to 1.0.
    valence: f32,
}

impl RecommendationsOptions {
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn seed_artists<S: Into<String>, I: IntoIterator<Item = S>>(mut self, ids: I) -> Self {
        self.seed_artists = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn seed_genres<S: Into<String>, I: IntoIterator<Item = S>>(mut self, genres: I) -> Self {
        self.seed_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn seed_tracks<S: Into<String>, I: IntoIterator<Item = S>>(mut self, ids: I) -> Self {
        self.seed_tracks = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn query(&self) -> Result<Query> {
        let query = Query::new()
            .push("limit", self.limit)
            .optional("market", self.market)?
            .seeds("seed_artists", self.seed_artists.as_slice())
            .seeds("seed_genres", self.seed_genres.as_slice())
            .seeds("seed_tracks", self.seed_tracks.as_slice());
        self.ranges(query)
    }
}

/// Client for the browse resources of the Web API.
///
/// Each call builds its query from the options it is given and issues exactly one GET
/// through the injected [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct Browse<D> {
    dispatcher: D,
}

/// Percent-encode a caller supplied id so it stays a single path segment.
fn segment<I: Display>(id: I) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

impl<D: Dispatcher> Browse<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Get a list of Spotify featured playlists (shown, for example, on a Spotify player's 'Browse' tab).
    pub async fn featured_playlists(&self, options: FeaturedPlaylistsOptions) -> Result<FeaturedPlaylists> {
        self.dispatcher
            .get("browse/featured-playlists", &options.query()?)
            .await
    }

    /// Get a list of new album releases featured in Spotify.
    pub async fn new_releases(&self, options: NewReleasesOptions) -> Result<Page<SimplifiedAlbum>> {
        self.dispatcher
            .get_unwrapped("albums", "browse/new-releases", &options.query()?)
            .await
    }

    /// Get a single category used to tag items in Spotify (on, for example, the Spotify player's 'Browse' tab).
    pub async fn category<I: Display>(&self, id: I, options: CategoryOptions) -> Result<Category> {
        self.dispatcher
            .get(&format!("browse/categories/{}", segment(id)), &options.query()?)
            .await
    }

    /// Get a list of categories used to tag items in Spotify.
    pub async fn categories(&self, options: CategoriesOptions) -> Result<Page<Category>> {
        self.dispatcher
            .get_unwrapped("categories", "browse/categories", &options.query()?)
            .await
    }

    /// Get a list of Spotify playlists tagged with a particular category.
    pub async fn category_playlists<I: Display>(
        &self,
        id: I,
        options: CategoryPlaylistsOptions,
    ) -> Result<Page<SimplifiedPlaylist>> {
        self.dispatcher
            .get_unwrapped(
                "playlists",
                &format!("browse/categories/{}/playlists", segment(id)),
                &options.query()?,
            )
            .await
    }

    /// Recommendations generated from the given seeds and tuned by the attribute ranges.
    pub async fn recommendations(&self, options: RecommendationsOptions) -> Result<Recommendations> {
        self.dispatcher
            .get("browse/recommendations", &options.query()?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(query: &Query) -> Vec<&str> {
        query.pairs().iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn featured_playlists_order() {
        let timestamp =
            NaiveDateTime::parse_from_str("2014-10-23T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let query = FeaturedPlaylistsOptions::default()
            .country(Market::SE)
            .locale("sv_SE".parse().unwrap())
            .timestamp(timestamp)
            .query()
            .unwrap();

        assert_eq!(keys(&query), ["locale", "country", "timestamp", "limit", "offset"]);
        assert_eq!(query.get("timestamp"), Some("2014-10-23T09:00:00"));
    }

    #[test]
    fn default_pages() {
        let query = NewReleasesOptions::default().query().unwrap();
        assert_eq!(keys(&query), ["limit", "offset"]);
        assert_eq!(query.get("limit"), Some("20"));
        assert_eq!(query.get("offset"), Some("0"));

        let query = CategoriesOptions::default()
            .page(Pagination::new(5, 10))
            .query()
            .unwrap();
        assert_eq!(query.get("limit"), Some("5"));
        assert_eq!(query.get("offset"), Some("10"));
    }

    #[test]
    fn category_has_no_pagination() {
        assert!(CategoryOptions::default().query().unwrap().is_empty());
    }

    #[test]
    fn recommendations_tune_from_text() {
        let mut options = RecommendationsOptions::default();
        options.tune(Bound::Min, "tempo", "120").unwrap();
        options.tune(Bound::Target, "key", "5").unwrap();
        options.tune(Bound::Max, "duration_ms", "240000").unwrap();

        assert_eq!(options.tempo, Range::at_least(120.0));
        assert_eq!(options.key, Range::around(5));
        assert_eq!(options.duration_ms, Range::at_most(240000));

        assert!(options.tune(Bound::Min, "key", "C#").is_err());
        assert!(options.tune(Bound::Min, "acousticnesss", "0.5").is_err());
    }

    #[test]
    fn recommendations_range_order() {
        let query = RecommendationsOptions::default()
            .valence(Range::at_least(0.5))
            .acousticness(Range::at_most(0.2))
            .time_signature(Range::around(4))
            .query()
            .unwrap();

        assert_eq!(
            keys(&query),
            ["limit", "max_acousticness", "target_time_signature", "min_valence"]
        );
    }

    #[test]
    fn every_attribute_is_encoded() {
        let mut options = RecommendationsOptions::default();
        for attr in RecommendationsOptions::ATTRIBUTES {
            options.tune(Bound::Target, attr, "1").unwrap();
        }
        let query = options.query().unwrap();
        assert_eq!(query.len(), 1 + RecommendationsOptions::ATTRIBUTES.len());
        assert_eq!(query.get("target_acousticness"), Some("1"));
    }
}
