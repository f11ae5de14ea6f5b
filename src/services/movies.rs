//! Movie catalog operations: search, browse, discover, details.
//!
//! A flat mapping of semantic operation to (path, verb, params); response
//! bodies come back deserialized but otherwise untouched.

use crate::domain::{Genre, MovieDetail, MoviePage};
use crate::error::Result;
use crate::http::ApiClient;

/// Base URL for TMDB poster and backdrop images.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Shown when a movie has no poster of its own.
const PLACEHOLDER_POSTER: &str = "/placeholder-movie.png";

/// Filters for the discover endpoint. Unset fields are omitted from the
/// query string and fall back to backend defaults.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilters {
    /// TMDB genre ids, sent comma-joined (e.g. "28,12").
    pub genre_ids: Vec<i64>,
    /// Sort criterion such as `popularity.desc` or `vote_average.desc`.
    pub sort_by: Option<String>,
    /// Release year.
    pub year: Option<i32>,
}

#[derive(Clone)]
pub struct MovieService {
    // ---
    client: ApiClient,
}

impl MovieService {
    // ---
    pub fn new(client: ApiClient) -> Self {
        // ---
        Self { client }
    }

    /// Full-text search over the movie catalog.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        // ---
        self.client
            .get_query(
                "/movies/search",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await
    }

    /// Currently popular movies.
    pub async fn popular(&self, page: u32) -> Result<MoviePage> {
        // ---
        self.client
            .get_query("/movies/popular", &[("page", page.to_string())])
            .await
    }

    /// All-time top-rated movies.
    pub async fn top_rated(&self, page: u32) -> Result<MoviePage> {
        // ---
        self.client
            .get_query("/movies/top-rated", &[("page", page.to_string())])
            .await
    }

    /// Movies currently in theaters.
    pub async fn now_playing(&self, page: u32) -> Result<MoviePage> {
        // ---
        self.client
            .get_query("/movies/now-playing", &[("page", page.to_string())])
            .await
    }

    /// Filtered discovery (genres, sort order, release year).
    #[tracing::instrument(skip(self))]
    pub async fn discover(&self, page: u32, filters: &DiscoverFilters) -> Result<MoviePage> {
        // ---
        let mut query = vec![("page", page.to_string())];

        if !filters.genre_ids.is_empty() {
            let joined = filters
                .genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("genre_ids", joined));
        }
        if let Some(sort_by) = &filters.sort_by {
            query.push(("sort_by", sort_by.clone()));
        }
        if let Some(year) = filters.year {
            query.push(("year", year.to_string()));
        }

        self.client.get_query("/movies/discover", &query).await
    }

    /// Full record for one movie, including the caller's own rating.
    pub async fn details(&self, movie_id: i64) -> Result<MovieDetail> {
        // ---
        self.client.get(&format!("/movies/{movie_id}")).await
    }

    /// The catalog's genre list.
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        // ---
        self.client.get("/movies/genres").await
    }
}

/// Builds the full image URL for a TMDB poster/backdrop path.
///
/// `size` is a TMDB size slug such as `w500`; an absent path yields the
/// bundled placeholder.
pub fn poster_url(path: Option<&str>, size: &str) -> String {
    // ---
    match path {
        Some(path) if !path.is_empty() => format!("{IMAGE_BASE_URL}/{size}{path}"),
        _ => PLACEHOLDER_POSTER.to_string(),
    }
}
