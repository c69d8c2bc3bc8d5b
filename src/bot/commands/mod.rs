//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Bill submission and listing commands
pub mod bill;

/// Admin dashboard commands
pub mod dashboard;

/// General utility commands
pub mod general;

// Export commands
pub use bill::*;
pub use dashboard::*;
pub use general::*;
