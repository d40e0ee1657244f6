//! tuneset Session
//!
//! The review session: sections under review, the active section and the
//! reviewer/user role, updated only through [`Action`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use tuneset_model::{RatingDim, Role};
//! use tuneset_session::{Action, SectionPatch, SessionStore};
//!
//! let mut store = SessionStore::from_demo().with_role(Role::Reviewer);
//! store.dispatch(Action::UpdateSection {
//!     id: "wash".into(),
//!     patch: SectionPatch::new().with_human_text("Revised.").with_accepted(true),
//! })?;
//! store.dispatch(Action::SetRatingDim { id: "wash".into(), dim: RatingDim::Honesty, value: 5 })?;
//! println!("{}% reviewed", store.reviewed_pct());
//! ```

#![warn(unreachable_pub)]

mod action;
mod error;
mod store;

// Re-exports
pub use action::{apply_patch, apply_rating, Action, SectionPatch};
pub use error::SessionError;
pub use store::SessionStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
