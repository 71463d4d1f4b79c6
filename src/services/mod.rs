//! The domain kernel: pure state transformations over [`crate::models`].
//!
//! Each service borrows the validated [`crate::config::Config`] roster and
//! threads the [`crate::models::AppState`] document through its operations by
//! parameter. No service holds persistent state of its own; loading and
//! persisting the document is the caller's job.

mod confirmation;
mod history;
mod rotation;

pub use confirmation::*;
pub use history::*;
pub use rotation::*;
