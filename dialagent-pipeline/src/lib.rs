//! Turn orchestration for dialagent
//!
//! Ties the session registry, backend registry, and response extractor
//! together for one conversational turn. This crate is the library entry
//! point a host application calls; there is no CLI or network surface.

pub mod error;
pub mod extract;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use extract::{extract, Extracted, Outcome, FALLBACK_REPLY};
pub use pipeline::Pipeline;
