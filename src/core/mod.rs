//! Annotation engine.
//!
//! Leaf modules first: [`directive`] encodes and decodes directive comments,
//! [`merge`] folds a rule into an existing directive, [`locate`] picks the
//! node a diagnostic line belongs to, and [`segment`] splits markup text.
//! [`annotate`] ties them together over a [`tree::SyntaxTree`] built by
//! [`parsers`] and printed back by [`printer`]. [`pipeline`] runs all of it
//! over a batch of files found by [`files`].

pub mod annotate;
pub mod diagnostic;
pub mod directive;
pub mod files;
pub mod locate;
pub mod merge;
pub mod parsers;
pub mod pipeline;
pub mod printer;
pub mod segment;
pub mod tree;

pub use annotate::{AnnotateOptions, AnnotationSummary, Annotator, SkipReason, SkippedDiagnostic};
pub use diagnostic::Diagnostic;
pub use pipeline::{FileOutcome, PipelineResult, annotate_source, run_pipeline, write_changes};
