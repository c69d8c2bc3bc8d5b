//! Admin Discord commands - `dashboard` and `review`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, session_or_reply},
        core::{
            bills,
            dashboard::{self, ReviewDecision},
            expense::BillStatus,
            store::BillStore,
        },
        errors::{Error, Result},
    };

    /// Lists bills by status for administrators.
    #[poise::command(slash_command)]
    pub async fn dashboard(
        ctx: Context<'_>,
        #[description = "Status to show (pending if omitted)"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
    ) -> Result<()> {
        let Some(session) = session_or_reply(ctx).await? else {
            return Ok(());
        };
        if !session.is_admin() {
            ctx.say("❌ Only administrators can open the dashboard.")
                .await?;
            return Ok(());
        }

        let status = match status.as_deref().map(str::parse::<BillStatus>) {
            None => BillStatus::Pending,
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        match ctx.data().store().list().await {
            Ok(all) => {
                ctx.say(dashboard::render_dashboard(&all, status)?).await?;
            }
            Err(e) => {
                let page = bills::render_bills_page(&bills::BillsView::Error(e.to_string()))?;
                ctx.say(page).await?;
            }
        }
        Ok(())
    }

    /// Accepts or refuses a pending bill.
    #[poise::command(slash_command)]
    pub async fn review(
        ctx: Context<'_>,
        #[description = "Id of the bill to review"] bill_id: i64,
        #[description = "accept or refuse"]
        #[autocomplete = "autocomplete::autocomplete_decision"]
        decision: String,
        #[description = "Note for the employee"] comment: Option<String>,
    ) -> Result<()> {
        let Some(session) = session_or_reply(ctx).await? else {
            return Ok(());
        };

        let outcome = match decision.parse::<ReviewDecision>() {
            Ok(decision) => {
                dashboard::review_bill(&ctx.data().store(), &session, bill_id, decision, comment)
                    .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Bill #{} ({}) is now {}",
                    updated.id,
                    updated.email,
                    bills::format_status(&updated.status)
                ))
                .await?;
            }
            Err(
                e @ (Error::Unauthorized { .. }
                | Error::InvalidReview { .. }
                | Error::BillNotFound { .. }),
            ) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
