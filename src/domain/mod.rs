mod metrics;
mod models;
mod token_store;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the token persistence abstraction
pub use token_store::{TokenStore, TokenStorePtr};

// Publicly expose the API data model
pub use models::{
    Book, BookPage, BookRating, GeneratedRecommendations, Genre, Movie, MovieDetail, MoviePage,
    MovieRating, MovieRatingWithMovie, RatingStats, Recommendation, RecommendationExplanation,
    SimilarRatedMovie, Token, Track, TrackPage, TrackRating, User,
};
