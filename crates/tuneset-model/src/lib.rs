//! tuneset Data Model
//!
//! Typed review state consumed by the dataset pipeline.
//!
//! # Core Concepts
//!
//! - [`Section`]: One topical unit under review (AI draft, reviewer revision,
//!   ratings, recommendations and the context rows it draws on)
//! - [`ContextRow`]: One field observation from a survey deployment
//! - [`RatingsDims`]: Three 0..=5 scores; the overall rating is derived
//! - [`ChartKind`] / [`Role`]: Tagged presentation variants
//!
//! # Example
//!
//! ```rust,ignore
//! use tuneset_model::demo;
//!
//! let sections = demo::initial_sections();
//! let wash = sections.iter().find(|s| s.id == "wash").unwrap();
//! assert!(wash.narrative_fields.contains(&"w_source_main".to_string()));
//! ```

#![warn(unreachable_pub)]

// Core modules
mod error;
mod ratings;
mod role;
mod row;
mod section;

/// Static demo dataset the session is seeded from
pub mod demo;

// Re-exports
pub use error::ModelError;
pub use ratings::{RatingDim, RatingsDims, MAX_SCORE};
pub use role::Role;
pub use row::{ContextRow, ContextValue};
pub use section::{ChartKind, ChartPoint, Section};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
