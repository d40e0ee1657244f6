//! tuneset Dataset
//!
//! Turns reviewed sections into a line-delimited JSON fine-tuning dataset
//! and verifies the result.
//!
//! # Pipeline
//!
//! 1. **Build**: one narrative record per section, plus a recommendations
//!    record for sections that carry recommendations
//! 2. **Assemble**: serialize each record to one JSON line, in section order
//! 3. **Export** or **Verify**: package the body as a file, or re-parse it
//!    and check its invariants
//!
//! # Example
//!
//! ```rust,ignore
//! use tuneset_dataset::{export_jsonl, run_self_tests, DatasetConfig, VerifyConfig};
//!
//! let sections = tuneset_model::demo::initial_sections();
//! let report = run_self_tests(&sections, &DatasetConfig::default(), &VerifyConfig::default())?;
//! println!("{} ({})", report.message(), report.digest.short());
//!
//! let artifact = export_jsonl(&sections, &DatasetConfig::default())?;
//! artifact.write_to(".")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod assembler;
mod builders;
mod config;
mod digest;
mod error;
mod export;
mod record;
mod verify;

// Re-exports
pub use assembler::{build_jsonl_lines, build_records, serialize_records, Dataset};
pub use builders::{build_narrative_record, build_recommendations_record, bullet_completion};
pub use config::{
    AnchorField, DatasetConfig, PromptTemplates, VerifyConfig, CLUSTER_PLACEHOLDER, DEFAULT_FILENAME,
    DEFAULT_MIME,
};
pub use digest::DatasetDigest;
pub use error::{DatasetError, VerifyError};
pub use export::{export_jsonl, write_export, ExportArtifact};
pub use record::{DatasetRecord, NarrativeRecord, RecommendationsRecord};
pub use verify::{run_self_tests, verify_lines, Check, VerificationReport, PASS_MESSAGE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
