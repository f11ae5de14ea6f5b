//! Movie recommendation operations.
//!
//! Recommendations are computed entirely by the backend; the client only
//! triggers generation, reads the list, and forwards the view/dismiss/
//! clear state transitions verbatim.

use crate::domain::{GeneratedRecommendations, Recommendation, RecommendationExplanation};
use crate::error::Result;
use crate::http::ApiClient;

#[derive(Clone)]
pub struct RecommendationService {
    // ---
    client: ApiClient,
}

impl RecommendationService {
    // ---
    pub fn new(client: ApiClient) -> Self {
        // ---
        Self { client }
    }

    /// Ask the backend to recompute recommendations for the caller.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self) -> Result<GeneratedRecommendations> {
        // ---
        self.client.post_empty("/recommendations/generate").await
    }

    /// Current recommendations, best score first.
    pub async fn list(&self, limit: u32) -> Result<Vec<Recommendation>> {
        // ---
        self.client
            .get_query("/recommendations/", &[("limit", limit.to_string())])
            .await
    }

    /// Why a given movie was recommended.
    pub async fn explain(&self, movie_id: i64) -> Result<RecommendationExplanation> {
        // ---
        self.client
            .get(&format!("/recommendations/explain/{movie_id}"))
            .await
    }

    /// Mark one recommendation as seen.
    pub async fn mark_viewed(&self, recommendation_id: i64) -> Result<Recommendation> {
        // ---
        self.client
            .patch(&format!("/recommendations/{recommendation_id}/view"))
            .await
    }

    /// Dismiss one recommendation so it stops appearing.
    pub async fn dismiss(&self, recommendation_id: i64) -> Result<Recommendation> {
        // ---
        self.client
            .patch(&format!("/recommendations/{recommendation_id}/dismiss"))
            .await
    }

    /// Drop every current recommendation.
    pub async fn clear(&self) -> Result<()> {
        // ---
        self.client.delete("/recommendations/").await
    }
}
