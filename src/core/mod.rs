//! Core business logic - framework-agnostic bill submission, listing and review.
//!
//! Nothing in here knows about Discord: the bot layer turns command arguments
//! into the plain structs these modules take and formats what they return.

/// Bills list view and formatting
pub mod bills;
/// Admin dashboard: status filters and bill review
pub mod dashboard;
/// Expense categories and bill statuses
pub mod expense;
/// New bill form controller
pub mod new_bill;
/// Receipt file validation and storage
pub mod receipt;
/// Route table and navigation
pub mod routes;
/// Logged-in user session
pub mod session;
/// Store collaborator trait and its database implementation
pub mod store;
