pub mod metrics;
mod token_store;

// Re-export the factory functions for easy access
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use token_store::{create_file_token_store, create_memory_token_store};
