#![forbid(unsafe_code)]
//! Fills missing Android string-resource translations.
//!
//! Scans the base locale's `strings.xml`-style files, diffs every configured
//! target locale against them, translates exactly the missing entries through
//! an OpenAI-compatible chat-completion endpoint, and merges the results into
//! the matching `values-<locale>/` files without disturbing existing content.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use transfill::{OpenAiTranslator, RunConfig, run};
//! use transfill::translate::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
//!
//! # async fn example() -> Result<(), transfill::Error> {
//! let config = RunConfig::new("/path/to/project");
//! let translator = OpenAiTranslator::new("sk-...", DEFAULT_MODEL, DEFAULT_ENDPOINT)?;
//! let report = run(&config, Arc::new(translator)).await?;
//! assert!(!report.has_failures());
//! # Ok(())
//! # }
//! ```
//!
//! # Guarantees
//!
//! - Entries marked `translatable="false"` are never sent for translation.
//! - A fully translated locale produces zero network calls (re-runs converge).
//! - Each (file, locale) pair is its own concurrent task writing its own file;
//!   one failed task never affects its siblings or the run as a whole.

pub mod diff;
pub mod discover;
pub mod error;
pub mod extract;
pub mod merge;
pub mod run;
pub mod translate;
pub mod types;

// Re-export the types most callers need.
pub use crate::{
    error::Error,
    run::{RunConfig, RunReport, TaskOutcome, TaskStatus, run},
    translate::{OpenAiTranslator, TranslationProvider},
    types::{LocaleResourceMap, ResourceUnit, UnitKind},
};
