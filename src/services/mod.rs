mod books;
mod movies;
mod music;
mod rating_index;
mod ratings;
mod recommendations;

pub use books::BookService;
pub use movies::{poster_url, DiscoverFilters, MovieService};
pub use music::{MusicSeeds, MusicService};
pub use rating_index::IndexedRating;
pub use ratings::RatingService;
pub use recommendations::RecommendationService;
