pub mod models;

// Re-export the core types to provide a clean public API.
pub use models::{Article, ArticleSummary, Comment, Topic, User};
