//! `Billed` - Employee expense reports over Discord
//!
//! An employee files a bill with `/newbill`: the receipt attachment goes through
//! [`core::new_bill::NewBill::handle_change_file`], which only uploads png, jpg
//! and jpeg images, then the form fields are coerced and checked by
//! [`core::new_bill::NewBill::handle_submit`] before the bill reaches the
//! [`core::store::BillStore`]. `/bills` shows the employee's own bills and
//! `/dashboard` plus `/review` let an administrator accept or refuse pending ones.
//!
//! Everything under [`core`] is independent of Discord and is what the tests
//! exercise; [`bot`] only translates slash commands into those calls.

#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    // Stored amounts are f64, so comparisons must be deliberate
    clippy::float_cmp,
    // Receipt and store failures propagate as `Error`, never as panics
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::exit,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::clone_on_ref_ptr,
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

// `missing_docs` stays a warning: the slash commands generated by
// `poise::command` carry no docs of their own.

/// Discord slash commands, autocomplete and the bot runtime
pub mod bot;
/// Database connection and config.toml settings
pub mod config;
/// Bill submission, listing and review, independent of Discord
pub mod core;
/// `SeaORM` entities for the `bills` and `receipts` tables
pub mod entities;
/// The crate-wide error type
pub mod errors;

#[cfg(test)]
pub mod test_utils;
