// Test helpers are intentionally partially used
#![allow(dead_code)]

//! In-process stub of the MediaRate backend.
//!
//! Serves just enough of the REST surface for the client to exercise every
//! service module, and counts create/update calls so tests can assert the
//! create-vs-update resolution ("exactly one POST, exactly one PUT").

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use mediarate_client::domain::TokenStorePtr;
use mediarate_client::{
    create_memory_token_store, create_noop_metrics, ApiConfig, AppConfig, MediaRateClient,
    StorageConfig,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

pub const TEST_TOKEN: &str = "abc";
pub const TEST_EMAIL: &str = "u@x.com";
pub const TEST_PASSWORD: &str = "pw";

const NOW: &str = "2024-03-01T10:00:00Z";

// ============================================================================
// Backend state
// ============================================================================

#[derive(Default)]
pub struct BackendState {
    // Call counters for upsert assertions
    pub me_calls: AtomicUsize,
    pub music_posts: AtomicUsize,
    pub music_puts: AtomicUsize,
    pub book_posts: AtomicUsize,
    pub book_puts: AtomicUsize,
    pub movie_rating_posts: AtomicUsize,

    /// When set, `/auth/me` answers 401 even for the valid token.
    pub reject_me: AtomicBool,

    next_rating_id: AtomicI64,

    // rating id -> (subject id, stars)
    pub music_ratings: Mutex<HashMap<i64, (i64, u8)>>,
    pub movie_ratings: Mutex<HashMap<i64, (i64, u8)>>,
    // rating id -> (subject id, stars, review)
    pub book_ratings: Mutex<HashMap<i64, (i64, u8, Option<String>)>>,

    /// Last query string seen by `/music/recommendations`.
    pub last_music_query: Mutex<Option<HashMap<String, String>>>,
}

impl BackendState {
    fn next_id(&self) -> i64 {
        self.next_rating_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Pre-seed a music rating, as if created in an earlier session.
    pub fn seed_music_rating(&self, rating_id: i64, track_id: i64, stars: u8) {
        self.music_ratings
            .lock()
            .unwrap()
            .insert(rating_id, (track_id, stars));
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TEST_TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "u",
        "email": TEST_EMAIL,
        "is_active": true,
        "created_at": NOW,
    })
}

fn movie_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": "A movie.",
        "poster_path": "/p.jpg",
        "vote_average": 7.5,
        "genres": [{"id": 28, "name": "Action"}],
    })
}

fn track_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "spotify_id": format!("sp{id}"),
        "title": title,
        "artist": "Artist",
        "genres": ["rock"],
    })
}

fn book_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "google_books_id": format!("gb{id}"),
        "title": title,
        "authors": ["Author"],
        "categories": ["Fiction"],
    })
}

fn recommendation_json(id: i64, movie_id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "movie_id": movie_id,
        "score": 0.92,
        "created_at": NOW,
        "movie": movie_json(movie_id, "Recommended"),
    })
}

// ============================================================================
// Auth handlers
// ============================================================================

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    // ---
    let username = body["username"].as_str().unwrap_or_default();
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 2,
            "username": username,
            "email": body["email"],
            "is_active": true,
            "created_at": NOW,
        })),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    // ---
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if email == TEST_EMAIL && password == TEST_PASSWORD {
        (StatusCode::OK, Json(json!({"access_token": TEST_TOKEN})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
    }
}

async fn me(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    // ---
    state.me_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) || state.reject_me.load(Ordering::SeqCst) {
        return unauthorized();
    }

    (StatusCode::OK, Json(user_json()))
}

// ============================================================================
// Movie + movie rating handlers
// ============================================================================

async fn movie_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    // ---
    let query = params.get("query").cloned().unwrap_or_default();
    Json(json!({
        "page": 1,
        "total_results": 1,
        "total_pages": 1,
        "results": [movie_json(42, &format!("Result for {query}"))],
    }))
}

async fn movie_list() -> Json<Value> {
    // ---
    Json(json!({
        "page": 1,
        "total_results": 2,
        "total_pages": 1,
        "results": [movie_json(42, "Heat"), movie_json(43, "Ronin")],
    }))
}

async fn movie_genres() -> Json<Value> {
    // ---
    Json(json!([{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]))
}

async fn movie_details(Path(movie_id): Path<i64>) -> Json<Value> {
    // ---
    let mut detail = movie_json(movie_id, "Heat");
    detail["runtime"] = json!(170);
    detail["user_rating"] = json!(5);
    detail["total_user_ratings"] = json!(3);
    Json(detail)
}

async fn rate_movie(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }
    state.movie_rating_posts.fetch_add(1, Ordering::SeqCst);

    let movie_id = body["movie_id"].as_i64().unwrap_or_default();
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;

    // Server-side upsert: reuse the rating row for an already-rated movie
    let mut ratings = state.movie_ratings.lock().unwrap();
    let existing = ratings
        .iter()
        .find(|(_, (m, _))| *m == movie_id)
        .map(|(id, _)| *id);
    let rating_id = existing.unwrap_or_else(|| state.next_id());
    ratings.insert(rating_id, (movie_id, stars));

    (
        StatusCode::CREATED,
        Json(json!({
            "id": rating_id,
            "user_id": 1,
            "movie_id": movie_id,
            "rating": stars,
            "created_at": NOW,
            "updated_at": NOW,
        })),
    )
}

async fn list_movie_ratings(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }

    let ratings = state.movie_ratings.lock().unwrap();
    let items: Vec<Value> = ratings
        .iter()
        .map(|(id, (movie_id, stars))| {
            json!({
                "id": id,
                "user_id": 1,
                "movie_id": movie_id,
                "rating": stars,
                "created_at": NOW,
                "updated_at": NOW,
                "movie": movie_json(*movie_id, "Rated"),
            })
        })
        .collect();

    (StatusCode::OK, Json(Value::Array(items)))
}

async fn rating_stats(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "total_ratings": 2,
            "average_rating": 4.0,
            "highly_rated_count": 1,
            "rating_distribution": {"3": 1, "5": 1},
            "favorite_genres": {"Action": 0.8},
            "last_rating_date": NOW,
        })),
    )
}

async fn update_movie_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;

    let mut ratings = state.movie_ratings.lock().unwrap();
    match ratings.get_mut(&rating_id) {
        Some(entry) => {
            entry.1 = stars;
            let movie_id = entry.0;
            (
                StatusCode::OK,
                Json(json!({
                    "id": rating_id,
                    "user_id": 1,
                    "movie_id": movie_id,
                    "rating": stars,
                    "created_at": NOW,
                    "updated_at": NOW,
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Rating not found"})),
        ),
    }
}

async fn delete_movie_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
) -> StatusCode {
    // ---
    match state.movie_ratings.lock().unwrap().remove(&rating_id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn rating_for_movie(
    State(state): State<Arc<BackendState>>,
    Path(movie_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    // ---
    let ratings = state.movie_ratings.lock().unwrap();
    let found = ratings
        .iter()
        .find(|(_, (m, _))| *m == movie_id)
        .map(|(id, (m, stars))| (*id, *m, *stars));

    match found {
        Some((id, movie_id, stars)) => (
            StatusCode::OK,
            Json(json!({
                "id": id,
                "user_id": 1,
                "movie_id": movie_id,
                "rating": stars,
                "created_at": NOW,
                "updated_at": NOW,
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Rating not found"})),
        ),
    }
}

// ============================================================================
// Music handlers
// ============================================================================

async fn music_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    // ---
    let limit: i64 = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);
    Json(json!({
        "items": [track_json(42, "One"), track_json(43, "Two")],
        "total": 2,
        "limit": limit,
        "offset": 0,
    }))
}

async fn music_new_releases() -> Json<Value> {
    // ---
    Json(json!([track_json(50, "Fresh")]))
}

async fn music_recommendations(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    // ---
    *state.last_music_query.lock().unwrap() = Some(params);
    Json(json!([track_json(60, "Seeded")]))
}

async fn track_details(Path(spotify_id): Path<String>) -> Json<Value> {
    // ---
    let mut track = track_json(42, "One");
    track["spotify_id"] = json!(spotify_id);
    Json(track)
}

async fn rate_track(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }
    state.music_posts.fetch_add(1, Ordering::SeqCst);

    let track_id = body["track_id"].as_i64().unwrap_or_default();
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;

    let mut ratings = state.music_ratings.lock().unwrap();
    if ratings.values().any(|(t, _)| *t == track_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Track already rated"})),
        );
    }

    let rating_id = state.next_id();
    ratings.insert(rating_id, (track_id, stars));

    (
        StatusCode::OK,
        Json(json!({
            "id": rating_id,
            "user_id": 1,
            "track_id": track_id,
            "rating": stars,
            "created_at": NOW,
            "updated_at": NOW,
        })),
    )
}

async fn update_track_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    state.music_puts.fetch_add(1, Ordering::SeqCst);
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;

    let mut ratings = state.music_ratings.lock().unwrap();
    match ratings.get_mut(&rating_id) {
        Some(entry) => {
            entry.1 = stars;
            let track_id = entry.0;
            (
                StatusCode::OK,
                Json(json!({
                    "id": rating_id,
                    "user_id": 1,
                    "track_id": track_id,
                    "rating": stars,
                    "created_at": NOW,
                    "updated_at": NOW,
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Rating not found"})),
        ),
    }
}

async fn delete_track_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
) -> StatusCode {
    // ---
    match state.music_ratings.lock().unwrap().remove(&rating_id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn my_track_ratings(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }

    let ratings = state.music_ratings.lock().unwrap();
    let items: Vec<Value> = ratings
        .iter()
        .map(|(id, (track_id, stars))| {
            json!({
                "id": id,
                "user_id": 1,
                "track_id": track_id,
                "rating": stars,
                "track": track_json(*track_id, "Rated"),
                "created_at": NOW,
                "updated_at": NOW,
            })
        })
        .collect();

    (StatusCode::OK, Json(Value::Array(items)))
}

// ============================================================================
// Book handlers
// ============================================================================

async fn book_search() -> Json<Value> {
    // ---
    Json(json!({
        "items": [book_json(9, "Dune")],
        "total_items": 1,
    }))
}

async fn book_details(Path(volume_id): Path<String>) -> Json<Value> {
    // ---
    let mut book = book_json(9, "Dune");
    book["google_books_id"] = json!(volume_id);
    Json(book)
}

async fn book_recommendations() -> Json<Value> {
    // ---
    Json(json!([book_json(10, "Foundation")]))
}

async fn rate_book(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }
    state.book_posts.fetch_add(1, Ordering::SeqCst);

    let book_id = body["book_id"].as_i64().unwrap_or_default();
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;
    let review = body["review"].as_str().map(|s| s.to_string());

    let mut ratings = state.book_ratings.lock().unwrap();
    if ratings.values().any(|(b, _, _)| *b == book_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Book already rated"})),
        );
    }

    let rating_id = state.next_id();
    ratings.insert(rating_id, (book_id, stars, review.clone()));

    (
        StatusCode::OK,
        Json(json!({
            "id": rating_id,
            "user_id": 1,
            "book_id": book_id,
            "rating": stars,
            "review": review,
            "created_at": NOW,
            "updated_at": NOW,
        })),
    )
}

async fn update_book_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // ---
    state.book_puts.fetch_add(1, Ordering::SeqCst);
    let stars = body["rating"].as_u64().unwrap_or_default() as u8;
    let review = body["review"].as_str().map(|s| s.to_string());

    let mut ratings = state.book_ratings.lock().unwrap();
    match ratings.get_mut(&rating_id) {
        Some(entry) => {
            entry.1 = stars;
            entry.2 = review.clone();
            let book_id = entry.0;
            (
                StatusCode::OK,
                Json(json!({
                    "id": rating_id,
                    "user_id": 1,
                    "book_id": book_id,
                    "rating": stars,
                    "review": review,
                    "created_at": NOW,
                    "updated_at": NOW,
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Rating not found"})),
        ),
    }
}

async fn delete_book_rating(
    State(state): State<Arc<BackendState>>,
    Path(rating_id): Path<i64>,
) -> StatusCode {
    // ---
    match state.book_ratings.lock().unwrap().remove(&rating_id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn my_book_ratings(State(state): State<Arc<BackendState>>) -> Json<Value> {
    // ---
    let ratings = state.book_ratings.lock().unwrap();
    let items: Vec<Value> = ratings
        .iter()
        .map(|(id, (book_id, stars, review))| {
            json!({
                "id": id,
                "user_id": 1,
                "book_id": book_id,
                "rating": stars,
                "review": review,
                "created_at": NOW,
                "updated_at": NOW,
            })
        })
        .collect();

    Json(Value::Array(items))
}

// ============================================================================
// Recommendation handlers
// ============================================================================

async fn generate_recommendations(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Generated 2 recommendations",
            "count": 2,
            "recommendations_ids": [42, 43],
        })),
    )
}

async fn list_recommendations(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    // ---
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!([recommendation_json(1, 42), recommendation_json(2, 43)])),
    )
}

async fn explain_recommendation(Path(movie_id): Path<i64>) -> Json<Value> {
    // ---
    Json(json!({
        "movie_id": movie_id,
        "movie_title": "Heat",
        "score": 0.92,
        "reasons": ["You liked Ronin"],
        "similar_rated_movies": [{"id": 43, "title": "Ronin", "rating": 5}],
        "genres_match": {"Action": 0.8},
        "created_at": NOW,
    }))
}

async fn view_recommendation(Path(recommendation_id): Path<i64>) -> Json<Value> {
    // ---
    Json(recommendation_json(recommendation_id, 42))
}

async fn dismiss_recommendation(Path(recommendation_id): Path<i64>) -> Json<Value> {
    // ---
    Json(recommendation_json(recommendation_id, 42))
}

async fn clear_recommendations() -> StatusCode {
    // ---
    StatusCode::NO_CONTENT
}

// ============================================================================
// Test backend
// ============================================================================

fn router(state: Arc<BackendState>) -> Router {
    // ---
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/movies/search", get(movie_search))
        .route("/movies/popular", get(movie_list))
        .route("/movies/top-rated", get(movie_list))
        .route("/movies/now-playing", get(movie_list))
        .route("/movies/discover", get(movie_list))
        .route("/movies/genres", get(movie_genres))
        .route("/movies/{movie_id}", get(movie_details))
        .route("/ratings/", post(rate_movie).get(list_movie_ratings))
        .route("/ratings/stats", get(rating_stats))
        .route(
            "/ratings/{rating_id}",
            put(update_movie_rating).delete(delete_movie_rating),
        )
        .route("/ratings/movie/{movie_id}", get(rating_for_movie))
        .route("/music/search", get(music_search))
        .route("/music/new-releases", get(music_new_releases))
        .route("/music/recommendations", get(music_recommendations))
        .route("/music/track/{spotify_id}", get(track_details))
        .route("/music/ratings", post(rate_track))
        .route(
            "/music/ratings/{rating_id}",
            put(update_track_rating).delete(delete_track_rating),
        )
        .route("/music/ratings/me", get(my_track_ratings))
        .route("/books/search", get(book_search))
        .route("/books/book/{volume_id}", get(book_details))
        .route("/books/recommendations", get(book_recommendations))
        .route("/books/ratings", post(rate_book))
        .route(
            "/books/ratings/{rating_id}",
            put(update_book_rating).delete(delete_book_rating),
        )
        .route("/books/ratings/me", get(my_book_ratings))
        .route(
            "/recommendations/generate",
            post(generate_recommendations),
        )
        .route(
            "/recommendations/",
            get(list_recommendations).delete(clear_recommendations),
        )
        .route("/recommendations/explain/{movie_id}", get(explain_recommendation))
        .route(
            "/recommendations/{recommendation_id}/view",
            patch(view_recommendation),
        )
        .route(
            "/recommendations/{recommendation_id}/dismiss",
            patch(dismiss_recommendation),
        )
        .with_state(state)
}

pub struct TestBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl TestBackend {
    // ---
    pub async fn spawn() -> Self {
        // --
        let state = Arc::new(BackendState::default());
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(50)).await;

        Self { addr, state }
    }

    pub fn config(&self) -> AppConfig {
        // ---
        AppConfig {
            api: ApiConfig {
                base_url: format!("http://{}", self.addr),
                timeout: Duration::from_secs(5),
            },
            storage: StorageConfig {
                state_dir: std::env::temp_dir().join("mediarate-unused"),
            },
        }
    }

    /// A client with a fresh in-memory token store.
    pub fn client(&self) -> MediaRateClient {
        // ---
        self.client_with_store(create_memory_token_store())
    }

    /// A client sharing `tokens`, so tests can inspect persisted state.
    pub fn client_with_store(&self, tokens: TokenStorePtr) -> MediaRateClient {
        // ---
        MediaRateClient::new(&self.config(), tokens, create_noop_metrics().unwrap())
            .expect("client should build")
    }
}
