#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Resilient structured-output extraction for local text-generation models.
//!
//! Small models wrap their JSON in code fences, preface it with chatter,
//! and get the syntax almost right. This crate turns that output into a
//! validated value anyway: one HTTP round trip to an Ollama-compatible
//! endpoint, then a strictly ordered cascade of cleanup, structure
//! location, tolerant repair, direct parse, and progressive truncation,
//! the whole thing wrapped in a bounded fixed-delay retry.
//!
//! ```no_run
//! use structout::{Extractor, ExtractorConfig};
//!
//! # async fn demo() -> Result<(), structout::ExtractError> {
//! let config = ExtractorConfig::load_or_default()?;
//! let extractor = Extractor::from_config(&config)?;
//! let value = extractor.generate_value("List three skills as a JSON array.").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod providers;
pub mod retry;

pub use config::{EndpointConfig, ExtractorConfig, RetryConfig};
pub use error::ExtractError;
pub use extract::Extractor;
pub use pipeline::{ExtractOutcome, Strategy, extract_outcome, extract_text, extract_value};
pub use providers::{OllamaProvider, Provider};
pub use retry::{RetryPolicy, with_retries};
