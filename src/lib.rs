//! Logging usage extraction: walks a compiled source model's syntax trees,
//! recognises the well-known logging call shapes (extension methods,
//! compile-time-attribute methods, delegate factories, scope-begin calls),
//! mines their facts, and summarises cross-call-site inconsistencies.
//!
//! Parsing and compiling source is out of scope — [`semantic`] defines the
//! seam a real compiler adapter implements; [`semantic::model`] ships an
//! in-memory reference implementation for tests.

pub mod analyzers;
pub mod caller_finder;
pub mod config;
pub mod model;
pub mod operation_utils;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod semantic;
pub mod summarizer;
pub mod template;

pub use config::{CancellationToken, ExtractionConfig, Parallelism};
pub use model::ExtractionResult;
pub use orchestrator::extract;
pub use progress::{ProgressEvent, ProgressReporter};
pub use registry::LoggingTypes;
