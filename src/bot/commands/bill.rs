//! Bill Discord commands - `newbill` and `bills`.
//!
//! `newbill` drives the new bill form controller: the attachment goes through
//! the file check and upload, then the remaining arguments are submitted as
//! form fields. A receipt left behind by a failed submit is discarded. `bills` renders the bills list for the command author.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, session_or_reply},
        core::{
            bills,
            new_bill::{self, FileSelection, NewBill, NewBillInput},
            receipt::{ReceiptUpload, is_accepted_receipt, validate_receipt_size},
            routes::{Route, Router},
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use tracing::{info, warn};

    /// Submits a new expense report with its receipt.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command)]
    pub async fn newbill(
        ctx: Context<'_>,
        #[description = "Type of expense"]
        #[autocomplete = "autocomplete::autocomplete_expense_type"]
        expense_type: String,
        #[description = "Date of the expense (YYYY-MM-DD)"] date: String,
        #[description = "Amount including VAT"] amount: f64,
        #[description = "Receipt image (png, jpg or jpeg, up to 8 MiB)"] receipt: serenity::Attachment,
        #[description = "Name of the expense"] name: Option<String>,
        #[description = "VAT amount"] vat: Option<f64>,
        #[description = "VAT percentage (20 if omitted)"] pct: Option<i64>,
        #[description = "Commentary"] commentary: Option<String>,
    ) -> Result<()> {
        let Some(session) = session_or_reply(ctx).await? else {
            return Ok(());
        };

        let input = NewBillInput {
            expense_type,
            name: name.unwrap_or_default(),
            date,
            amount: amount.to_string(),
            vat: vat.map(|v| v.to_string()).unwrap_or_default(),
            pct: pct.map(|p| p.to_string()).unwrap_or_default(),
            commentary: commentary.unwrap_or_default(),
        };

        // Check the fields before uploading so a bad form leaves no orphan receipt
        if let Err(e) = new_bill::parse_fields(&input) {
            ctx.say(format!("❌ {e}")).await?;
            return Ok(());
        }

        if let Err(e) = validate_receipt_size(u64::from(receipt.size)) {
            ctx.say(format!("❌ {e}")).await?;
            return Ok(());
        }

        ctx.defer().await?;

        let mut form = NewBill::new(ctx.data().store(), session);
        // A rejected file is never fetched; the form only needs its name to reject it
        let bytes = if is_accepted_receipt(&receipt.filename) {
            receipt.download().await?
        } else {
            Vec::new()
        };
        let upload = ReceiptUpload {
            file_name: receipt.filename.clone(),
            bytes,
        };

        if let FileSelection::Rejected { file_name } = form.handle_change_file(upload).await? {
            ctx.say(format!(
                "❌ `{file_name}` was not attached: receipts must be png, jpg or jpeg images."
            ))
            .await?;
            return Ok(());
        }

        let mut router = Router::default();
        let created = match form.handle_submit(&input, &mut router).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(cleanup) = form.abandon().await {
                    warn!("Could not discard receipt after failed submit: {}", cleanup);
                }
                if e.is_validation() {
                    ctx.say(format!("❌ {e}")).await?;
                    return Ok(());
                }
                return Err(e);
            }
        };

        info!(
            "{} submitted bill {} through Discord",
            ctx.author().name,
            created.id
        );
        ctx.say(format!(
            "✅ Bill #{} submitted: {} | {} € | {}",
            created.id,
            created.expense_type,
            created.amount,
            bills::format_status(&created.status)
        ))
        .await?;

        if router.active() == Route::Bills {
            let view = bills::load_bills(form.store(), form.session()).await;
            ctx.say(bills::render_bills_page(&view)?).await?;
        }

        Ok(())
    }

    /// Lists your bills, newest first.
    #[poise::command(slash_command)]
    pub async fn bills(ctx: Context<'_>) -> Result<()> {
        let Some(session) = session_or_reply(ctx).await? else {
            return Ok(());
        };

        let view = bills::load_bills(&ctx.data().store(), &session).await;
        ctx.say(bills::render_bills_page(&view)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
