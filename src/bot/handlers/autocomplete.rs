//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from fixed lists, so none of these touch the database.

use crate::{
    bot::Context,
    core::expense::{BillStatus, ExpenseType},
};

fn matching<'a>(options: impl Iterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    options
        .filter(|option| option.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .take(25) // Discord autocomplete limit
        .collect()
}

/// Suggests expense types containing the partial input (case-insensitive).
pub async fn autocomplete_expense_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(ExpenseType::ALL.iter().map(|kind| kind.as_str()), partial)
}

/// Suggests bill statuses.
pub async fn autocomplete_status(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(BillStatus::ALL.iter().map(|status| status.as_str()), partial)
}

/// Suggests review decisions.
pub async fn autocomplete_decision(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(["accept", "refuse"].into_iter(), partial)
}
