//! `campaign-fields` projects a user-selected subset of named fields out of a
//! tabular campaign dataset, validating the selection against a typed
//! [`types::Schema`] and coercing each value to its declared type.
//!
//! The crate is the engine behind the `campaign-fields` CLI, but every stage
//! is usable as a library:
//!
//! - [`schema`]: the built-in campaign schema, or one loaded from a JSON
//!   definition file
//! - [`select`]: parse and validate a `--fields` list into a
//!   [`select::SelectionPlan`]
//! - [`loader`]: read CSV or JSON input into raw [`types::Record`]s
//! - [`project`]: project one record against a plan, coercing values
//! - [`output`]: serialize projected records as JSON (`{"data": [...]}`) or
//!   CSV
//! - [`pipeline`]: the single-pass run loop; per-record failures are skipped
//!   and summarized, not fatal
//!
//! ## Quick example
//!
//! ```rust
//! use campaign_fields::pipeline;
//! use campaign_fields::output::JsonWriter;
//! use campaign_fields::schema::campaign_schema;
//! use campaign_fields::select::SelectionPlan;
//! use campaign_fields::loader::load_csv_from_reader;
//!
//! # fn main() -> Result<(), campaign_fields::ProjectError> {
//! let schema = campaign_schema();
//! let plan = SelectionPlan::parse("date,campaign,clicks", &schema)?;
//!
//! let input = "date,campaign,clicks\n2024-01-01,spring_sale,120\n";
//! let mut rdr = csv::ReaderBuilder::new()
//!     .has_headers(true)
//!     .from_reader(input.as_bytes());
//! let records = load_csv_from_reader(&mut rdr)?;
//!
//! let mut out = Vec::new();
//! let mut writer = JsonWriter::new(&mut out);
//! let summary = pipeline::run(records, &plan, &mut writer, None)?;
//! assert_eq!(summary.written, 1);
//! assert!(summary.is_clean());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error model
//!
//! A single [`ProjectError`] enum covers the whole pipeline. Selection- and
//! schema-time errors are fatal before any record is read; per-record errors
//! ([`ProjectError::MissingValue`], [`ProjectError::TypeCoercion`]) skip that
//! record and are collected into the run's [`pipeline::RunSummary`].

pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod schema;
pub mod select;
pub mod types;

pub use error::{ProjectError, ProjectResult};
pub use project::project;
pub use select::SelectionPlan;
