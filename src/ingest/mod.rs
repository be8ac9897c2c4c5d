mod categorize;
mod ingestor;

pub use categorize::categorize;
pub use ingestor::{canonical_url, IngestReport, Ingestor};
