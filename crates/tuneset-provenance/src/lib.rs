//! tuneset Provenance Weights
//!
//! Attributes a section's narrative or recommendations to the survey fields
//! it draws on.
//!
//! # Core Concepts
//!
//! - [`weight_scheme`]: Descending linear ramp over list positions, summing to 1
//! - [`FieldWeightMap`]: Per-code base weight split across the rows (sites)
//!   carrying that code; publishes both the aggregate and per-instance view
//! - [`resolve_questionnaire_id`]: Dominant survey among a set of rows
//!
//! # Example
//!
//! ```rust,ignore
//! use tuneset_provenance::{field_weights, FieldWeightMap};
//!
//! let weights = FieldWeightMap::compute(&section.narrative_fields, &section.context_rows);
//! for (row, share) in section.context_rows.iter().zip(weights.row_shares(&section.context_rows)) {
//!     println!("{} {:.3}", row.code, share);
//! }
//! let exported = field_weights(&section.narrative_fields, &section.context_rows);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod mapper;
mod questionnaire;
mod scheme;

// Re-exports
pub use mapper::{field_weights, occurrence_counts, CodeWeight, FieldWeightMap};
pub use questionnaire::{resolve_questionnaire_id, survey_counts};
pub use scheme::{base_weights, weight_scheme};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
