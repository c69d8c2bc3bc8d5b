//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for expense types, statuses and review decisions
pub mod autocomplete;
