//! Experience Recs - tag-driven experience recommendations
//!
//! Derives a user's interest tags from their wishlist and swipe history,
//! widens them with an LLM, fetches matching experiences from Supabase and
//! lets the LLM rank the unseen ones.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Recommender, RecommenderOptions, Suggestions, Strategy, parse_index_list, parse_tag_list};
pub use models::{Experience, SuggestedQuery, SuggestionsResponse, ErrorResponse};
pub use services::{CatalogStore, Oracle, StoreError, OracleError};
