//! Book catalog and book rating operations.
//!
//! Book ratings carry an optional free-text review and, like music
//! ratings, have no server-side upsert — create-vs-update is resolved from
//! the local [`RatingIndex`].

use super::rating_index::{IndexedRating, RatingIndex};
use crate::domain::{Book, BookPage, BookRating};
use crate::error::Result;
use crate::http::ApiClient;
use serde::Serialize;

#[derive(Serialize)]
struct BookRatingCreate<'a> {
    //
    book_id: i64,
    rating: u8,
    review: Option<&'a str>,
}

#[derive(Serialize)]
struct BookRatingUpdate<'a> {
    //
    rating: u8,
    review: Option<&'a str>,
}

#[derive(Clone)]
pub struct BookService {
    // ---
    client: ApiClient,
    index: RatingIndex,
}

impl BookService {
    // ---
    pub fn new(client: ApiClient) -> Self {
        // ---
        Self {
            client,
            index: RatingIndex::new(),
        }
    }

    /// Full-text search over the book catalog.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32, offset: u32) -> Result<BookPage> {
        // ---
        self.client
            .get_query(
                "/books/search",
                &[
                    ("query", query.to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await
    }

    /// Full record for one book, by its catalog (Google Books) id.
    pub async fn book_details(&self, volume_id: &str) -> Result<Book> {
        // ---
        self.client.get(&format!("/books/book/{volume_id}")).await
    }

    /// Backend-picked book recommendations for the caller.
    pub async fn recommendations(&self, limit: u32) -> Result<Vec<Book>> {
        // ---
        self.client
            .get_query("/books/recommendations", &[("limit", limit.to_string())])
            .await
    }

    /// Rate a book 1-5 with an optional review, creating or updating as
    /// the local index dictates.
    #[tracing::instrument(skip(self, review))]
    pub async fn rate_book(
        &self,
        book_id: i64,
        rating: u8,
        review: Option<&str>,
    ) -> Result<BookRating> {
        // ---
        let saved: BookRating = match self.index.get(book_id) {
            Some(existing) => {
                self.client
                    .put(
                        &format!("/books/ratings/{}", existing.rating_id),
                        &BookRatingUpdate { rating, review },
                    )
                    .await?
            }
            None => {
                self.client
                    .post(
                        "/books/ratings",
                        &BookRatingCreate {
                            book_id,
                            rating,
                            review,
                        },
                    )
                    .await?
            }
        };

        self.index.record(saved.book_id, saved.id, saved.rating);
        Ok(saved)
    }

    /// Remove a book rating.
    pub async fn delete_rating(&self, rating_id: i64) -> Result<()> {
        // ---
        self.client
            .delete(&format!("/books/ratings/{rating_id}"))
            .await?;
        self.index.forget_rating(rating_id);

        Ok(())
    }

    /// All of the caller's book ratings. Rebuilds the local index.
    pub async fn my_ratings(&self) -> Result<Vec<BookRating>> {
        // ---
        let ratings: Vec<BookRating> = self.client.get("/books/ratings/me").await?;

        self.index.rebuild(ratings.iter().map(|r| {
            (
                r.book_id,
                IndexedRating {
                    rating_id: r.id,
                    stars: r.rating,
                },
            )
        }));

        Ok(ratings)
    }

    /// The locally known rating for a book, without a network call.
    pub fn local_rating(&self, book_id: i64) -> Option<IndexedRating> {
        // ---
        self.index.get(book_id)
    }
}
