//! New bill form controller.
//!
//! [`NewBill`] holds the state of one submission cycle: the receipt accepted by
//! [`NewBill::handle_change_file`] and the outcome of [`NewBill::handle_submit`].
//!
//! ```text
//! Idle -> FileSelected -> FileAccepted -> Submitting -> NavigatedAway
//!                      \-> FileRejected (back to Idle)
//! ```
//!
//! Field values arrive as strings, the way a form hands them over, and are
//! coerced here. Validation happens before any store call, so an incomplete
//! form never reaches the store.

use crate::{
    core::{
        expense::{BillStatus, ExpenseType},
        receipt::{self, ReceiptUpload, StoredReceipt},
        routes::{Navigate, Route},
        session::Session,
        store::{BillStore, NewBillRecord},
    },
    entities::bill,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use tracing::{info, warn};

/// VAT percentage used when the field is left empty
pub const DEFAULT_PCT: i32 = 20;

/// Raw values of the new bill form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillInput {
    /// `expense-type` select
    pub expense_type: String,
    /// `expense-name` input
    pub name: String,
    /// `datepicker` input, `YYYY-MM-DD`
    pub date: String,
    /// `amount` input
    pub amount: String,
    /// `vat` input
    pub vat: String,
    /// `pct` input
    pub pct: String,
    /// `commentary` textarea
    pub commentary: String,
}

/// Form field values after coercion, without the receipt
#[derive(Debug, Clone, PartialEq)]
pub struct BillFields {
    /// Expense category
    pub expense_type: ExpenseType,
    /// Trimmed name, possibly empty
    pub name: String,
    /// Expense date
    pub date: NaiveDate,
    /// Amount, strictly positive
    pub amount: f64,
    /// VAT amount, if entered
    pub vat: Option<f64>,
    /// VAT percentage, 0 to 100
    pub pct: i32,
    /// Commentary, if entered
    pub commentary: Option<String>,
}

/// Where the form is in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Nothing selected yet
    #[default]
    Idle,
    /// A file was picked and is being checked
    FileSelected,
    /// The file was uploaded and can be submitted
    FileAccepted,
    /// The file was discarded; a new one may be selected
    FileRejected,
    /// The bill is being created
    Submitting,
    /// The bill was created and the bills list is shown
    NavigatedAway,
}

/// Outcome of selecting a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    /// The file was uploaded
    Accepted(StoredReceipt),
    /// The file was discarded because of its extension
    Rejected {
        /// Name of the discarded file
        file_name: String,
    },
}

#[derive(Debug, Clone)]
struct AttachedReceipt {
    key: i64,
    file_url: String,
    file_name: String,
}

/// Controller behind the new bill form.
#[derive(Debug)]
pub struct NewBill<S> {
    store: S,
    session: Session,
    receipt: Option<AttachedReceipt>,
    state: FormState,
}

impl<S: BillStore> NewBill<S> {
    /// Creates a controller acting for `session`.
    #[must_use]
    pub const fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            receipt: None,
            state: FormState::Idle,
        }
    }

    /// Current state of the submission cycle
    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Store the controller submits to
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Session the controller acts for
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// URL of the accepted receipt, if any
    #[must_use]
    pub fn file_url(&self) -> Option<&str> {
        self.receipt.as_ref().map(|r| r.file_url.as_str())
    }

    /// Name of the accepted receipt, if any
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.receipt.as_ref().map(|r| r.file_name.as_str())
    }

    /// Handles a file selection.
    ///
    /// Any previous selection is discarded first. A file without a png, jpg or
    /// jpeg extension is not uploaded and yields [`FileSelection::Rejected`];
    /// otherwise it is uploaded through the store and remembered for submit.
    /// Nothing is uploaded for a session without an email, since no bill could
    /// be filed with the receipt.
    pub async fn handle_change_file(&mut self, file: ReceiptUpload) -> Result<FileSelection> {
        self.state = FormState::FileSelected;
        self.receipt = None;

        if !receipt::is_accepted_receipt(&file.file_name) {
            warn!("Discarding receipt with unsupported extension: {}", file.file_name);
            self.state = FormState::FileRejected;
            return Ok(FileSelection::Rejected {
                file_name: file.file_name,
            });
        }

        if let Err(e) = self.require_email() {
            self.state = FormState::Idle;
            return Err(e);
        }

        let file_name = receipt::base_name(&file.file_name).to_string();
        match self.store.create(file, &self.session.email).await {
            Ok(stored) => {
                self.receipt = Some(AttachedReceipt {
                    key: stored.key,
                    file_url: stored.file_url.clone(),
                    file_name,
                });
                self.state = FormState::FileAccepted;
                Ok(FileSelection::Accepted(stored))
            }
            Err(e) => {
                self.state = FormState::Idle;
                Err(e)
            }
        }
    }

    /// Builds the bill the form would submit, without submitting it.
    pub fn build_bill(&self, input: &NewBillInput) -> Result<NewBillRecord> {
        let fields = parse_fields(input)?;
        let attached = self.receipt.as_ref().ok_or(Error::MissingReceipt)?;
        self.require_email()?;

        Ok(NewBillRecord {
            expense_type: fields.expense_type,
            name: fields.name,
            date: fields.date,
            amount: fields.amount,
            vat: fields.vat,
            pct: fields.pct,
            commentary: fields.commentary,
            receipt_key: attached.key,
            file_url: attached.file_url.clone(),
            file_name: attached.file_name.clone(),
            status: BillStatus::Pending,
            email: self.session.email.clone(),
        })
    }

    /// Handles form submission.
    ///
    /// Validates the fields and the attached receipt, creates the bill through
    /// the store and, once it exists, navigates to the bills list. The receipt
    /// is consumed by a successful submission. A store failure is returned and
    /// leaves the receipt attached so the submission can be retried.
    pub async fn handle_submit<N: Navigate>(
        &mut self,
        input: &NewBillInput,
        navigator: &mut N,
    ) -> Result<bill::Model> {
        let record = self.build_bill(input)?;

        self.state = FormState::Submitting;
        match self.store.create_bill(record).await {
            Ok(created) => {
                info!("Bill {} submitted by {}", created.id, created.email);
                self.receipt = None;
                self.state = FormState::NavigatedAway;
                navigator.navigate(Route::Bills);
                Ok(created)
            }
            Err(e) => {
                self.state = FormState::FileAccepted;
                Err(e)
            }
        }
    }

    /// Gives up on the form: the uploaded receipt, if any, is deleted from the
    /// store and the form goes back to [`FormState::Idle`].
    pub async fn abandon(&mut self) -> Result<()> {
        self.state = FormState::Idle;
        if let Some(attached) = self.receipt.take() {
            self.store.discard_receipt(attached.key).await?;
            info!("Discarded unsubmitted receipt {}", attached.key);
        }
        Ok(())
    }

    fn require_email(&self) -> Result<()> {
        if self.session.email.trim().is_empty() {
            return Err(Error::Unauthorized {
                message: "the session has no email to file the bill under".to_string(),
            });
        }
        Ok(())
    }
}

/// Validates and coerces the form fields.
///
/// Expense type, date and amount are required. An empty `pct` means
/// [`DEFAULT_PCT`]; empty `vat` and `commentary` are left unset.
pub fn parse_fields(input: &NewBillInput) -> Result<BillFields> {
    let expense_type = required(&input.expense_type, "expense-type")?.parse::<ExpenseType>()?;

    let raw_date = required(&input.date, "datepicker")?;
    let date =
        NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
            value: raw_date.to_string(),
        })?;

    let amount = parse_amount(required(&input.amount, "amount")?, "amount")?;
    if amount == 0.0 {
        return Err(invalid_number("amount", &input.amount));
    }

    let vat = match input.vat.trim() {
        "" => None,
        raw => Some(parse_amount(raw, "vat")?),
    };

    let pct = match input.pct.trim() {
        "" => DEFAULT_PCT,
        raw => raw
            .parse::<i32>()
            .ok()
            .filter(|pct| (0..=100).contains(pct))
            .ok_or_else(|| invalid_number("pct", raw))?,
    };

    let commentary = Some(input.commentary.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(BillFields {
        expense_type,
        name: input.name.trim().to_string(),
        date,
        amount,
        vat,
        pct,
        commentary,
    })
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::MissingField { field })
    } else {
        Ok(trimmed)
    }
}

// Finite and non-negative
fn parse_amount(raw: &str, field: &'static str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| invalid_number(field, raw))
}

fn invalid_number(field: &'static str, raw: &str) -> Error {
    Error::InvalidNumber {
        field,
        value: raw.to_string(),
    }
}
