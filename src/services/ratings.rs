//! Movie rating operations and the caller's rating index.
//!
//! Unlike the music and book backends, the movie rating endpoint upserts
//! server-side: `POST /ratings/` creates or replaces in one call, so no
//! local create-vs-update resolution is needed here. The local index is
//! still maintained so views can render the caller's stars without
//! re-querying per movie.

use super::rating_index::{IndexedRating, RatingIndex};
use crate::domain::{MovieRating, MovieRatingWithMovie, RatingStats};
use crate::error::Result;
use crate::http::ApiClient;
use serde::Serialize;

#[derive(Serialize)]
struct MovieRatingCreate {
    //
    movie_id: i64,
    rating: u8,
}

#[derive(Serialize)]
struct MovieRatingUpdate {
    //
    rating: u8,
}

#[derive(Clone)]
pub struct RatingService {
    // ---
    client: ApiClient,
    index: RatingIndex,
}

impl RatingService {
    // ---
    pub fn new(client: ApiClient) -> Self {
        // ---
        Self {
            client,
            index: RatingIndex::new(),
        }
    }

    /// Rate a movie 1-5. The backend upserts, replacing any previous
    /// rating by this user.
    #[tracing::instrument(skip(self))]
    pub async fn rate_movie(&self, movie_id: i64, rating: u8) -> Result<MovieRating> {
        // ---
        let saved: MovieRating = self
            .client
            .post("/ratings/", &MovieRatingCreate { movie_id, rating })
            .await?;

        self.index.record(saved.movie_id, saved.id, saved.rating);
        Ok(saved)
    }

    /// All of the caller's movie ratings, movie records embedded.
    ///
    /// Rebuilds the local index from the fetched list.
    pub async fn user_ratings(&self, skip: u32, limit: u32) -> Result<Vec<MovieRatingWithMovie>> {
        // ---
        let ratings: Vec<MovieRatingWithMovie> = self
            .client
            .get_query(
                "/ratings/",
                &[("skip", skip.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        self.index.rebuild(ratings.iter().map(|r| {
            (
                r.rating.movie_id,
                IndexedRating {
                    rating_id: r.rating.id,
                    stars: r.rating.rating,
                },
            )
        }));

        Ok(ratings)
    }

    /// Aggregate statistics over the caller's ratings.
    pub async fn stats(&self) -> Result<RatingStats> {
        // ---
        self.client.get("/ratings/stats").await
    }

    /// Change the star value of an existing rating.
    pub async fn update_rating(&self, rating_id: i64, rating: u8) -> Result<MovieRating> {
        // ---
        let saved: MovieRating = self
            .client
            .put(
                &format!("/ratings/{rating_id}"),
                &MovieRatingUpdate { rating },
            )
            .await?;

        self.index.record(saved.movie_id, saved.id, saved.rating);
        Ok(saved)
    }

    /// Remove a rating.
    pub async fn delete_rating(&self, rating_id: i64) -> Result<()> {
        // ---
        self.client.delete(&format!("/ratings/{rating_id}")).await?;
        self.index.forget_rating(rating_id);

        Ok(())
    }

    /// The caller's rating of one movie, `None` when the movie is unrated.
    pub async fn rating_for_movie(&self, movie_id: i64) -> Result<Option<MovieRating>> {
        // ---
        match self
            .client
            .get::<MovieRating>(&format!("/ratings/movie/{movie_id}"))
            .await
        {
            Ok(rating) => Ok(Some(rating)),
            Err(err) if err.is_status(404) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// The locally known rating for a movie, without a network call.
    pub fn local_rating(&self, movie_id: i64) -> Option<IndexedRating> {
        // ---
        self.index.get(movie_id)
    }
}
