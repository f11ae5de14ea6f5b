//! Music catalog and track rating operations.
//!
//! Track ratings have no server-side upsert: creating a second rating for
//! the same track answers 400. `rate_track` therefore resolves
//! create-vs-update from the local [`RatingIndex`] before choosing the
//! endpoint.

use super::rating_index::{IndexedRating, RatingIndex};
use crate::domain::{Track, TrackPage, TrackRating};
use crate::error::Result;
use crate::http::ApiClient;
use serde::Serialize;

/// Seed material for music recommendations. Empty seed lists are omitted
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct MusicSeeds {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Serialize)]
struct TrackRatingCreate {
    //
    track_id: i64,
    rating: u8,
}

#[derive(Serialize)]
struct TrackRatingUpdate {
    //
    rating: u8,
}

#[derive(Clone)]
pub struct MusicService {
    // ---
    client: ApiClient,
    index: RatingIndex,
}

impl MusicService {
    // ---
    pub fn new(client: ApiClient) -> Self {
        // ---
        Self {
            client,
            index: RatingIndex::new(),
        }
    }

    /// Full-text search over tracks.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32, offset: u32) -> Result<TrackPage> {
        // ---
        self.client
            .get_query(
                "/music/search",
                &[
                    ("query", query.to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await
    }

    /// Full record for one track, by its catalog (Spotify) id.
    pub async fn track_details(&self, spotify_id: &str) -> Result<Track> {
        // ---
        self.client.get(&format!("/music/track/{spotify_id}")).await
    }

    /// Recently released tracks.
    pub async fn new_releases(&self, limit: u32, offset: u32) -> Result<Vec<Track>> {
        // ---
        self.client
            .get_query(
                "/music/new-releases",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await
    }

    /// Seeded track recommendations.
    #[tracing::instrument(skip(self, seeds))]
    pub async fn recommendations(&self, seeds: &MusicSeeds, limit: u32) -> Result<Vec<Track>> {
        // ---
        let mut query = vec![("limit", limit.to_string())];

        if !seeds.tracks.is_empty() {
            query.push(("seed_tracks", seeds.tracks.join(",")));
        }
        if !seeds.artists.is_empty() {
            query.push(("seed_artists", seeds.artists.join(",")));
        }
        if !seeds.genres.is_empty() {
            query.push(("seed_genres", seeds.genres.join(",")));
        }

        self.client.get_query("/music/recommendations", &query).await
    }

    /// Rate a track 1-5, creating or updating as the local index dictates.
    ///
    /// A track already rated per the index goes to the update endpoint with
    /// the known rating id; an unrated one goes to create. The index is
    /// patched with whatever the server persisted.
    #[tracing::instrument(skip(self))]
    pub async fn rate_track(&self, track_id: i64, rating: u8) -> Result<TrackRating> {
        // ---
        let saved: TrackRating = match self.index.get(track_id) {
            Some(existing) => {
                self.client
                    .put(
                        &format!("/music/ratings/{}", existing.rating_id),
                        &TrackRatingUpdate { rating },
                    )
                    .await?
            }
            None => {
                self.client
                    .post("/music/ratings", &TrackRatingCreate { track_id, rating })
                    .await?
            }
        };

        self.index.record(saved.track_id, saved.id, saved.rating);
        Ok(saved)
    }

    /// Remove a track rating.
    pub async fn delete_rating(&self, rating_id: i64) -> Result<()> {
        // ---
        self.client
            .delete(&format!("/music/ratings/{rating_id}"))
            .await?;
        self.index.forget_rating(rating_id);

        Ok(())
    }

    /// All of the caller's track ratings. Rebuilds the local index.
    pub async fn my_ratings(&self) -> Result<Vec<TrackRating>> {
        // ---
        let ratings: Vec<TrackRating> = self.client.get("/music/ratings/me").await?;

        self.index.rebuild(ratings.iter().map(|r| {
            (
                r.track_id,
                IndexedRating {
                    rating_id: r.id,
                    stars: r.rating,
                },
            )
        }));

        Ok(ratings)
    }

    /// The locally known rating for a track, without a network call.
    pub fn local_rating(&self, track_id: i64) -> Option<IndexedRating> {
        // ---
        self.index.get(track_id)
    }
}
