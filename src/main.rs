use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use color_eyre::Result;

use browsify::api::request::Bound;
use browsify::{
    Browse, CategoriesOptions, CategoryOptions, CategoryPlaylistsOptions, Config,
    FeaturedPlaylistsOptions, Locale, Market, NewReleasesOptions, Pagination,
    RecommendationsOptions,
};

/// Browse the Spotify catalog: featured playlists, new releases, categories and recommendations.
#[derive(Debug, Parser)]
#[command(name = "browsify", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long, default_value_t = 20)]
    limit: usize,
    #[arg(long, default_value_t = 0)]
    offset: usize,
}

impl From<PageArgs> for Pagination {
    fn from(value: PageArgs) -> Self {
        Pagination::new(value.limit, value.offset)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Featured playlists
    Featured {
        #[arg(long, value_parser = parse_market)]
        country: Option<Market>,
        #[arg(long, value_parser = parse_locale)]
        locale: Option<Locale>,
        /// Local time of the user, e.g. 2014-10-23T09:00:00
        #[arg(long, value_parser = parse_timestamp)]
        timestamp: Option<NaiveDateTime>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// New album releases
    NewReleases {
        #[arg(long, value_parser = parse_market)]
        country: Option<Market>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// A single category
    Category {
        id: String,
        #[arg(long, value_parser = parse_market)]
        country: Option<Market>,
        #[arg(long, value_parser = parse_locale)]
        locale: Option<Locale>,
    },
    /// All categories
    Categories {
        #[arg(long, value_parser = parse_market)]
        country: Option<Market>,
        #[arg(long, value_parser = parse_locale)]
        locale: Option<Locale>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Playlists tagged with a category
    CategoryPlaylists {
        id: String,
        #[arg(long, value_parser = parse_market)]
        country: Option<Market>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Track recommendations from seeds, tuned with `--min/--target/--max <attr>=<value>`
    Recommendations {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long, value_parser = parse_market)]
        market: Option<Market>,
        #[arg(long = "seed-artist")]
        seed_artists: Vec<String>,
        #[arg(long = "seed-genre")]
        seed_genres: Vec<String>,
        #[arg(long = "seed-track")]
        seed_tracks: Vec<String>,
        #[arg(long, value_parser = parse_tuning)]
        min: Vec<(String, String)>,
        #[arg(long, value_parser = parse_tuning)]
        target: Vec<(String, String)>,
        #[arg(long, value_parser = parse_tuning)]
        max: Vec<(String, String)>,
    },
}

fn parse_market(s: &str) -> std::result::Result<Market, String> {
    s.parse().map_err(|e: browsify::Error| e.to_string())
}

fn parse_locale(s: &str) -> std::result::Result<Locale, String> {
    s.parse().map_err(|e: browsify::Error| e.to_string())
}

fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map_err(|e| e.to_string())
}

fn parse_tuning(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(attr, value)| (attr.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected <attr>=<value>, got {s:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();
    let browse = Browse::new(Config::load()?.dispatcher()?);

    match cli.command {
        Command::Featured { country, locale, timestamp, page } => {
            let options = FeaturedPlaylistsOptions {
                locale,
                country,
                timestamp,
                page: page.into(),
            };
            println!("{:#?}", browse.featured_playlists(options).await?);
        }
        Command::NewReleases { country, page } => {
            let options = NewReleasesOptions {
                country,
                page: page.into(),
            };
            println!("{:#?}", browse.new_releases(options).await?);
        }
        Command::Category { id, country, locale } => {
            let options = CategoryOptions { country, locale };
            println!("{:#?}", browse.category(id, options).await?);
        }
        Command::Categories { country, locale, page } => {
            let options = CategoriesOptions {
                country,
                locale,
                page: page.into(),
            };
            println!("{:#?}", browse.categories(options).await?);
        }
        Command::CategoryPlaylists { id, country, page } => {
            let options = CategoryPlaylistsOptions {
                country,
                page: page.into(),
            };
            println!("{:#?}", browse.category_playlists(id, options).await?);
        }
        Command::Recommendations {
            limit,
            market,
            seed_artists,
            seed_genres,
            seed_tracks,
            min,
            target,
            max,
        } => {
            let mut options = RecommendationsOptions {
                limit,
                market,
                seed_artists,
                seed_genres,
                seed_tracks,
                ..Default::default()
            };

            for (bound, tunings) in [(Bound::Min, min), (Bound::Target, target), (Bound::Max, max)] {
                for (attr, value) in tunings {
                    options.tune(bound, &attr, &value)?;
                }
            }
            println!("{:#?}", browse.recommendations(options).await?);
        }
    }

    Ok(())
}
