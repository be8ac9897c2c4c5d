mod repository;
mod schema;

pub use repository::{Repository, DEFAULT_RELEVANCE};
