//! Public API: the caching [`Pipeline`] and the [`PipelineError`] type.

mod error;
mod pipeline;

pub use error::PipelineError;
pub use pipeline::{CacheKey, Pipeline, PipelineStats};
