//! Typed records mirroring the MediaRate backend's response schemas.
//!
//! Only fields the client actually consumes are modeled; unknown fields in
//! server responses are ignored by serde. Every record is owned "as the
//! server last returned it" — there is no client-side referential
//! integrity beyond that.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Auth
// ============================================================================

/// Server-supplied identity record, fetched via `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Credential-exchange response from `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// ============================================================================
// Movies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A movie as returned by search, discover, and list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub popularity: Option<f64>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Full movie record from `/movies/{id}`, including per-user statistics
/// computed by the backend for the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub runtime: Option<i64>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    /// The calling user's own rating, when one exists.
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub total_user_ratings: i64,
    pub avg_user_rating: Option<f64>,
}

/// Paged search/list envelope used by the movie endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: i64,
    pub total_results: i64,
    pub total_pages: i64,
    pub results: Vec<Movie>,
}

// ============================================================================
// Music
// ============================================================================

/// A music track, Spotify-sourced but keyed by the backend's own id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_year: Option<i32>,
    pub preview_url: Option<String>,
    pub image_url: Option<String>,
    pub duration_ms: Option<i64>,
    pub popularity: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Offset-paged envelope used by the music search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Books
// ============================================================================

/// A book, Google-Books-sourced but keyed by the backend's own id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub google_books_id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub language: Option<String>,
    pub isbn_13: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<i64>,
}

/// Search envelope from `/books/search` (Google Books paging).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPage {
    pub items: Vec<Book>,
    pub total_items: i64,
}

// ============================================================================
// Ratings
// ============================================================================

/// A movie rating owned by the calling user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRating {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Movie rating with the rated movie embedded, as returned by `/ratings/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRatingWithMovie {
    #[serde(flatten)]
    pub rating: MovieRating,
    pub movie: Movie,
}

/// A track rating owned by the calling user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRating {
    pub id: i64,
    pub user_id: i64,
    pub track_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub track: Option<Track>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A book rating owned by the calling user, with optional free-text review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRating {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: u8,
    pub review: Option<String>,
    #[serde(default)]
    pub book: Option<Book>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate rating statistics from `/ratings/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingStats {
    pub total_ratings: i64,
    pub average_rating: f64,
    /// Count of subjects rated 4 or 5.
    pub highly_rated_count: i64,
    /// Star value (as a string key) to count.
    #[serde(default)]
    pub rating_distribution: HashMap<String, i64>,
    pub favorite_genres: Option<HashMap<String, f64>>,
    pub last_rating_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Recommendations
// ============================================================================

/// A backend-computed recommendation. Read-only from the client's side
/// apart from the view/dismiss/clear transitions forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub movie: Movie,
}

/// Outcome summary from `/recommendations/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRecommendations {
    pub message: String,
    pub count: i64,
    #[serde(default)]
    pub recommendations_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarRatedMovie {
    pub id: i64,
    pub title: String,
    pub rating: u8,
}

/// Why a movie was recommended, from `/recommendations/explain/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationExplanation {
    pub movie_id: i64,
    pub movie_title: String,
    pub score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub similar_rated_movies: Vec<SimilarRatedMovie>,
    pub genres_match: Option<HashMap<String, f64>>,
    pub created_at: DateTime<Utc>,
}
