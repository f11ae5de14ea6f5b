pub mod file;
pub mod memory;

// Re-export the factory functions for easy access
pub use file::create as create_file_token_store;
pub use memory::create as create_memory_token_store;
