//! Opinion aggregation and multi-perspective analysis.
//!
//! Opinion pieces are crawled from RSS/Atom feeds, bucketed into debate
//! topics by category, and analyzed by six fixed AI personas plus a balanced
//! pro/con summary. [`pipeline::Pipeline`] ties the stages together.

pub mod agents;
pub mod ai;
pub mod cluster;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod models;
pub mod pipeline;
