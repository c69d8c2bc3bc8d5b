//! Bills list view.
//!
//! Turns the result of a list fetch into a [`BillsView`]: the session's bills,
//! newest first, with dates and statuses formatted for display, or the fetch
//! error message shown as is.

use crate::{
    core::{expense::BillStatus, session::Session, store::BillStore},
    entities::bill,
    errors::Result,
};
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;
use tracing::error;

/// Most rows rendered on one page
pub const MAX_ROWS: usize = 20;

/// Longest message Discord accepts, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Longest free-text cell shown in a row
pub const MAX_CELL_CHARS: usize = 60;

// Room kept for the "... and N more" line
const TRAILER_CHARS: usize = 32;

const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// One displayed bill
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    /// Bill id
    pub id: i64,
    /// Expense category
    pub expense_type: String,
    /// Bill name
    pub name: String,
    /// Formatted date, e.g. `30 Avr. 24`
    pub date: String,
    /// Amount in currency units
    pub amount: f64,
    /// Formatted status, e.g. `En attente`
    pub status: String,
    /// Receipt location
    pub file_url: String,
}

impl From<&bill::Model> for BillRow {
    fn from(bill: &bill::Model) -> Self {
        Self {
            id: bill.id,
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            date: format_date(bill.date),
            amount: bill.amount,
            status: format_status(&bill.status),
            file_url: bill.file_url.clone(),
        }
    }
}

/// What the bills page shows
#[derive(Debug, Clone, PartialEq)]
pub enum BillsView {
    /// The list is being fetched
    Loading,
    /// The fetch failed with this message
    Error(String),
    /// The fetched bills
    List(Vec<BillRow>),
}

/// Formats a date as day, abbreviated French month and two-digit year:
/// `2024-04-30` becomes `30 Avr. 24`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {month}. {:02}", date.day(), date.year().rem_euclid(100))
}

/// Display label of a stored status; unknown values are shown unchanged.
#[must_use]
pub fn format_status(status: &str) -> String {
    status
        .parse::<BillStatus>()
        .map_or_else(|_| status.to_string(), |s| s.label().to_string())
}

/// Builds the list view: administrators see every bill, employees their own.
/// Bills are ordered newest first.
#[must_use]
pub fn bills_view(bills: &[bill::Model], session: &Session) -> BillsView {
    let mut visible: Vec<&bill::Model> = bills
        .iter()
        .filter(|b| session.is_admin() || b.email == session.email)
        .collect();
    visible.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    BillsView::List(visible.into_iter().map(BillRow::from).collect())
}

/// Fetches the bills from the store and builds the view, turning a failed
/// fetch into [`BillsView::Error`]. Employees only fetch their own bills.
pub async fn load_bills<S: BillStore>(store: &S, session: &Session) -> BillsView {
    let fetched = if session.is_admin() {
        store.list().await
    } else {
        store.list_for_email(&session.email).await
    };
    match fetched {
        Ok(bills) => bills_view(&bills, session),
        Err(e) => {
            error!("Failed to fetch bills: {}", e);
            BillsView::Error(e.to_string())
        }
    }
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Appends `lines` to `page` while both [`MAX_ROWS`] and [`MAX_MESSAGE_CHARS`]
/// allow, then says how many lines were left out.
pub fn push_rows(page: &mut String, lines: &[String]) -> std::fmt::Result {
    let mut used = page.chars().count();
    let mut shown = 0;
    for line in lines.iter().take(MAX_ROWS) {
        let len = line.chars().count() + 1;
        if used + len + TRAILER_CHARS > MAX_MESSAGE_CHARS {
            break;
        }
        writeln!(page, "{line}")?;
        used += len;
        shown += 1;
    }
    if shown < lines.len() {
        write!(page, "... and {} more", lines.len() - shown)?;
    }
    Ok(())
}

/// Renders the bills page as a chat message of at most [`MAX_MESSAGE_CHARS`].
pub fn render_bills_page(view: &BillsView) -> Result<String> {
    let mut page = String::new();
    match view {
        BillsView::Loading => page.push_str("Loading..."),
        BillsView::Error(message) => {
            writeln!(&mut page, "**Erreur**")?;
            write!(&mut page, "{}", clip(message, MAX_MESSAGE_CHARS - TRAILER_CHARS))?;
        }
        BillsView::List(rows) => {
            writeln!(&mut page, "**Mes notes de frais**")?;
            if rows.is_empty() {
                write!(&mut page, "No bills yet. Use `/newbill` to submit one.")?;
            }
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    format!(
                        "`#{}` {} | {} | {} | {} € | {}",
                        row.id,
                        row.expense_type,
                        clip(&row.name, MAX_CELL_CHARS),
                        row.date,
                        row.amount,
                        row.status
                    )
                })
                .collect();
            push_rows(&mut page, &lines)?;
        }
    }
    Ok(page)
}
