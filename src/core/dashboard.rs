//! Admin dashboard - status filters and bill review.
//!
//! Administrators see bills grouped by status and move pending bills to
//! accepted or refused, optionally leaving a note for the employee.

use crate::{
    core::{
        bills::{MAX_CELL_CHARS, clip, format_date, format_status, push_rows},
        expense::BillStatus,
        session::Session,
        store::{BillStore, BillUpdate},
    },
    entities::bill,
    errors::{Error, Result},
};
use std::fmt::Write;
use std::str::FromStr;
use tracing::info;

/// Decision taken on a pending bill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Approve the expense
    Accept,
    /// Reject the expense
    Refuse,
}

impl ReviewDecision {
    /// Status a bill gets for this decision
    #[must_use]
    pub const fn status(self) -> BillStatus {
        match self {
            Self::Accept => BillStatus::Accepted,
            Self::Refuse => BillStatus::Refused,
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "accept" | "accepted" => Ok(Self::Accept),
            "refuse" | "refused" => Ok(Self::Refuse),
            other => Err(Error::InvalidReview {
                message: format!("unknown decision '{other}', use accept or refuse"),
            }),
        }
    }
}

/// Number of bills in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Awaiting review
    pub pending: usize,
    /// Accepted
    pub accepted: usize,
    /// Refused
    pub refused: usize,
}

/// Bills whose stored status is `status`, in the given order.
#[must_use]
pub fn filter_bills(bills: &[bill::Model], status: BillStatus) -> Vec<&bill::Model> {
    bills
        .iter()
        .filter(|b| b.status == status.as_str())
        .collect()
}

/// Counts bills per status. Bills with an unknown status are not counted.
#[must_use]
pub fn dashboard_counts(bills: &[bill::Model]) -> StatusCounts {
    bills
        .iter()
        .fold(StatusCounts::default(), |mut counts, b| {
            match b.status.parse::<BillStatus>() {
                Ok(BillStatus::Pending) => counts.pending += 1,
                Ok(BillStatus::Accepted) => counts.accepted += 1,
                Ok(BillStatus::Refused) => counts.refused += 1,
                Err(_) => {}
            }
            counts
        })
}

/// Accepts or refuses a pending bill on behalf of an administrator.
///
/// # Errors
/// - [`Error::Unauthorized`] when the session is not an admin session
/// - [`Error::BillNotFound`] when no bill has this id
/// - [`Error::InvalidReview`] when the bill is no longer pending, including
///   when another review got there first
/// - any error reported by the store
pub async fn review_bill<S: BillStore>(
    store: &S,
    session: &Session,
    bill_id: i64,
    decision: ReviewDecision,
    commentary_admin: Option<String>,
) -> Result<bill::Model> {
    if !session.is_admin() {
        return Err(Error::Unauthorized {
            message: "only administrators can review bills".to_string(),
        });
    }

    let commentary_admin = commentary_admin
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let updated = store
        .update(
            bill_id,
            BillUpdate {
                status: decision.status(),
                commentary_admin,
            },
        )
        .await?;

    info!(
        "{} set bill {} to {}",
        session.email, updated.id, updated.status
    );
    Ok(updated)
}

/// Renders the dashboard for one status as a chat message that fits the
/// Discord length limit.
pub fn render_dashboard(bills: &[bill::Model], status: BillStatus) -> Result<String> {
    let counts = dashboard_counts(bills);
    let mut page = String::new();

    writeln!(
        &mut page,
        "**Validations** - En attente: {} | Accepté: {} | Refused: {}",
        counts.pending, counts.accepted, counts.refused
    )?;
    writeln!(&mut page, "__{}__", status.label())?;

    let selected = filter_bills(bills, status);
    if selected.is_empty() {
        write!(&mut page, "No bills.")?;
    }
    let lines: Vec<String> = selected
        .iter()
        .map(|b| {
            format!(
                "`#{}` {} | {} | {} | {} | {} € | {}",
                b.id,
                clip(&b.email, MAX_CELL_CHARS),
                b.expense_type,
                clip(&b.name, MAX_CELL_CHARS),
                format_date(b.date),
                b.amount,
                format_status(&b.status)
            )
        })
        .collect();
    push_rows(&mut page, &lines)?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn mixed_bills() -> Vec<bill::Model> {
        vec![
            bill_model(1, EMPLOYEE_EMAIL, "2024-01-10", "pending"),
            bill_model(2, EMPLOYEE_EMAIL, "2024-02-10", "accepted"),
            bill_model(3, "other@test.tld", "2024-03-10", "pending"),
            bill_model(4, "other@test.tld", "2024-03-11", "refused"),
        ]
    }

    #[test]
    fn test_filter_bills() {
        let bills = mixed_bills();

        let pending = filter_bills(&bills, BillStatus::Pending);

        assert_eq!(pending.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(filter_bills(&bills, BillStatus::Refused).len(), 1);
    }

    #[test]
    fn test_dashboard_counts() {
        let counts = dashboard_counts(&mixed_bills());
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                accepted: 1,
                refused: 1
            }
        );
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!("Accept".parse::<ReviewDecision>().unwrap(), ReviewDecision::Accept);
        assert_eq!("refused".parse::<ReviewDecision>().unwrap(), ReviewDecision::Refuse);
        assert!(matches!(
            "maybe".parse::<ReviewDecision>(),
            Err(Error::InvalidReview { .. })
        ));
    }

    #[tokio::test]
    async fn test_admin_accepts_pending_bill() -> Result<()> {
        let store = RecordingStore::with_bills(mixed_bills());

        let updated = review_bill(
            &store,
            &admin_session(),
            1,
            ReviewDecision::Accept,
            Some("  ok  ".to_string()),
        )
        .await?;

        assert_eq!(updated.status, "accepted");
        assert_eq!(updated.commentary_admin.as_deref(), Some("ok"));
        assert_eq!(
            store.updates(),
            vec![(
                1,
                BillUpdate {
                    status: BillStatus::Accepted,
                    commentary_admin: Some("ok".to_string())
                }
            )]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_employee_cannot_review() {
        let store = RecordingStore::with_bills(mixed_bills());

        let result = review_bill(&store, &employee_session(), 1, ReviewDecision::Accept, None).await;

        assert!(matches!(result, Err(Error::Unauthorized { .. })));
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn test_only_pending_bills_can_be_reviewed() {
        let store = RecordingStore::with_bills(mixed_bills());

        let result = review_bill(&store, &admin_session(), 2, ReviewDecision::Refuse, None).await;

        assert!(matches!(result, Err(Error::InvalidReview { .. })));
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn test_review_unknown_bill() {
        let store = RecordingStore::with_bills(mixed_bills());

        let result = review_bill(&store, &admin_session(), 99, ReviewDecision::Refuse, None).await;

        assert!(matches!(result, Err(Error::BillNotFound { id: 99 })));
    }

    #[tokio::test]
    async fn test_review_through_database_store() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let stored = store.create(jpg_upload("test.jpg"), EMPLOYEE_EMAIL).await?;
        let created = store
            .create_bill(sample_record(&stored, EMPLOYEE_EMAIL))
            .await?;

        review_bill(
            &store,
            &admin_session(),
            created.id,
            ReviewDecision::Refuse,
            Some("receipt unreadable".to_string()),
        )
        .await?;

        let stored_bill = store.get_bill(created.id).await?.unwrap();
        assert_eq!(stored_bill.status, "refused");
        assert_eq!(
            stored_bill.commentary_admin.as_deref(),
            Some("receipt unreadable")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_reviews_apply_once() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let stored = store.create(jpg_upload("test.jpg"), EMPLOYEE_EMAIL).await?;
        let created = store
            .create_bill(sample_record(&stored, EMPLOYEE_EMAIL))
            .await?;
        let admin = admin_session();

        let (accept, refuse) = tokio::join!(
            review_bill(&store, &admin, created.id, ReviewDecision::Accept, None),
            review_bill(&store, &admin, created.id, ReviewDecision::Refuse, None),
        );

        let outcomes = [&accept, &refuse];
        let winners: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(Error::InvalidReview { .. })))
                .count(),
            1
        );

        let final_bill = store.get_bill(created.id).await?.unwrap();
        assert_eq!(final_bill.status, winners[0].status);
        Ok(())
    }

    #[tokio::test]
    async fn test_reviewed_bill_cannot_be_reviewed_again() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let stored = store.create(jpg_upload("test.jpg"), EMPLOYEE_EMAIL).await?;
        let created = store
            .create_bill(sample_record(&stored, EMPLOYEE_EMAIL))
            .await?;
        review_bill(&store, &admin_session(), created.id, ReviewDecision::Accept, None).await?;

        let result = review_bill(
            &store,
            &admin_session(),
            created.id,
            ReviewDecision::Refuse,
            Some("too late".to_string()),
        )
        .await;

        assert!(matches!(result, Err(Error::InvalidReview { .. })));
        let current = store.get_bill(created.id).await?.unwrap();
        assert_eq!(current.status, "accepted");
        assert_eq!(current.commentary_admin, None);
        Ok(())
    }

    #[test]
    fn test_render_dashboard() -> Result<()> {
        let page = render_dashboard(&mixed_bills(), BillStatus::Pending)?;

        assert!(page.starts_with("**Validations** - En attente: 2 | Accepté: 1 | Refused: 1"));
        assert!(page.contains("`#1`"));
        assert!(page.contains("`#3` other@test.tld"));
        assert!(!page.contains("`#2`"));
        Ok(())
    }

    #[test]
    fn test_dashboard_page_fits_message_limit() -> Result<()> {
        let bills: Vec<_> = (1..=25)
            .map(|id| bill::Model {
                name: "n".repeat(200),
                email: format!("{}@test.tld", "e".repeat(200)),
                ..bill_model(id, EMPLOYEE_EMAIL, "2024-01-01", "pending")
            })
            .collect();

        let page = render_dashboard(&bills, BillStatus::Pending)?;

        assert!(page.chars().count() <= crate::core::bills::MAX_MESSAGE_CHARS);
        assert!(page.contains("more"));
        Ok(())
    }
}
