//! Store collaborator - persistence of receipts and bills.
//!
//! [`BillStore`] is the seam the form controller, bills list and dashboard talk
//! to. [`DbBillStore`] implements it on top of `SeaORM`, writing receipt bytes to
//! the configured receipts directory.

use crate::{
    config::settings::ReceiptsConfig,
    core::{
        expense::{BillStatus, ExpenseType},
        receipt::{self, ReceiptUpload, StoredReceipt},
    },
    entities::{Bill, Receipt, bill, receipt as receipt_entity},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// A validated bill, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillRecord {
    /// Expense category
    pub expense_type: ExpenseType,
    /// Free-text name, may be empty
    pub name: String,
    /// Date of the expense
    pub date: NaiveDate,
    /// Amount in currency units
    pub amount: f64,
    /// VAT amount
    pub vat: Option<f64>,
    /// VAT percentage
    pub pct: i32,
    /// Employee commentary
    pub commentary: Option<String>,
    /// Upload key returned by [`BillStore::create`]
    pub receipt_key: i64,
    /// Receipt location returned by [`BillStore::create`]
    pub file_url: String,
    /// Original receipt file name
    pub file_name: String,
    /// Initial status, always pending for new bills
    pub status: BillStatus,
    /// Owner of the bill
    pub email: String,
}

/// Fields an administrator changes when reviewing a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillUpdate {
    /// New status
    pub status: BillStatus,
    /// Review note
    pub commentary_admin: Option<String>,
}

/// Remote persistence of bills and their receipts.
///
/// Every failure is reported as an [`Error`]; a failing list fetch is expected
/// to carry a user-readable message such as `Erreur 404`.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Lists every stored bill.
    async fn list(&self) -> Result<Vec<bill::Model>>;

    /// Lists the bills owned by `email`.
    async fn list_for_email(&self, email: &str) -> Result<Vec<bill::Model>> {
        let bills = self.list().await?;
        Ok(bills.into_iter().filter(|b| b.email == email).collect())
    }

    /// Uploads a receipt for `email` and returns where it was stored.
    async fn create(&self, upload: ReceiptUpload, email: &str) -> Result<StoredReceipt>;

    /// Deletes an uploaded receipt that no bill refers to.
    async fn discard_receipt(&self, key: i64) -> Result<()>;

    /// Persists a new bill.
    async fn create_bill(&self, record: NewBillRecord) -> Result<bill::Model>;

    /// Applies a review to a bill that is still pending.
    ///
    /// The status check and the write are one step: of two reviews racing on
    /// the same bill, only the first succeeds and the other gets
    /// [`Error::InvalidReview`].
    async fn update(&self, bill_id: i64, update: BillUpdate) -> Result<bill::Model>;
}

/// [`BillStore`] backed by the application database.
#[derive(Debug, Clone)]
pub struct DbBillStore {
    db: DatabaseConnection,
    receipts: ReceiptsConfig,
}

impl DbBillStore {
    /// Creates a store over `db`, writing receipts as configured.
    #[must_use]
    pub const fn new(db: DatabaseConnection, receipts: ReceiptsConfig) -> Self {
        Self { db, receipts }
    }

    /// Finds a bill by id.
    #[cfg(test)]
    pub(crate) async fn get_bill(&self, bill_id: i64) -> Result<Option<bill::Model>> {
        Bill::find_by_id(bill_id)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl BillStore for DbBillStore {
    async fn list(&self) -> Result<Vec<bill::Model>> {
        Bill::find()
            .order_by_desc(bill::Column::Date)
            .order_by_desc(bill::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn list_for_email(&self, email: &str) -> Result<Vec<bill::Model>> {
        Bill::find()
            .filter(bill::Column::Email.eq(email))
            .order_by_desc(bill::Column::Date)
            .order_by_desc(bill::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    async fn create(&self, upload: ReceiptUpload, email: &str) -> Result<StoredReceipt> {
        receipt::validate_receipt_name(&upload.file_name)?;
        let size = u64::try_from(upload.bytes.len()).unwrap_or(u64::MAX);
        receipt::validate_receipt_size(size)?;

        // The row id names the file, so insert first and fill in the URL after writing
        let txn = self.db.begin().await?;

        let row = receipt_entity::ActiveModel {
            file_name: Set(receipt::base_name(&upload.file_name).to_string()),
            file_url: Set(String::new()),
            email: Set(email.to_string()),
            uploaded_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let stored_name = receipt::stored_file_name(row.id, &row.file_name);
        receipt::write_receipt(&self.receipts.directory, &stored_name, &upload.bytes).await?;
        let file_url = receipt::receipt_url(&self.receipts.public_url, &stored_name);

        let key = row.id;
        let mut active: receipt_entity::ActiveModel = row.into();
        active.file_url = Set(file_url.clone());
        active.update(&txn).await?;

        txn.commit().await?;

        info!("Stored receipt {} at {}", key, file_url);
        Ok(StoredReceipt { file_url, key })
    }

    #[instrument(skip(self))]
    async fn discard_receipt(&self, key: i64) -> Result<()> {
        let Some(row) = Receipt::find_by_id(key).one(&self.db).await? else {
            return Ok(());
        };

        let referenced = Bill::find()
            .filter(bill::Column::ReceiptId.eq(key))
            .count(&self.db)
            .await?;
        if referenced > 0 {
            return Err(Error::Store {
                message: format!("Receipt {key} is attached to a bill"),
            });
        }

        Receipt::delete_by_id(key).exec(&self.db).await?;
        let stored_name = receipt::stored_file_name(row.id, &row.file_name);
        receipt::remove_receipt(&self.receipts.directory, &stored_name).await?;

        info!("Discarded receipt {}", key);
        Ok(())
    }

    #[instrument(skip(self, record), fields(receipt_key = record.receipt_key, email = %record.email))]
    async fn create_bill(&self, record: NewBillRecord) -> Result<bill::Model> {
        let receipt = Receipt::find_by_id(record.receipt_key)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::Store {
                message: format!("Receipt {} not found", record.receipt_key),
            })?;

        if receipt.email != record.email {
            return Err(Error::Unauthorized {
                message: format!("receipt {} belongs to another employee", receipt.id),
            });
        }

        let model = bill::ActiveModel {
            expense_type: Set(record.expense_type.as_str().to_string()),
            name: Set(record.name),
            date: Set(record.date),
            amount: Set(record.amount),
            vat: Set(record.vat),
            pct: Set(record.pct),
            commentary: Set(record.commentary),
            receipt_id: Set(receipt.id),
            file_url: Set(record.file_url),
            file_name: Set(record.file_name),
            status: Set(record.status.as_str().to_string()),
            email: Set(record.email),
            commentary_admin: Set(None),
            ..Default::default()
        };

        let created = model.insert(&self.db).await?;
        info!("Created bill {} for {}", created.id, created.email);
        Ok(created)
    }

    #[instrument(skip(self, update), fields(status = %update.status))]
    async fn update(&self, bill_id: i64, update: BillUpdate) -> Result<bill::Model> {
        let result = Bill::update_many()
            .col_expr(bill::Column::Status, Expr::value(update.status.as_str()))
            .col_expr(
                bill::Column::CommentaryAdmin,
                Expr::value(update.commentary_admin),
            )
            .filter(bill::Column::Id.eq(bill_id))
            .filter(bill::Column::Status.eq(BillStatus::Pending.as_str()))
            .exec(&self.db)
            .await?;

        let current = Bill::find_by_id(bill_id)
            .one(&self.db)
            .await?
            .ok_or(Error::BillNotFound { id: bill_id })?;

        if result.rows_affected == 0 {
            return Err(Error::InvalidReview {
                message: format!("bill {bill_id} is already {}", current.status),
            });
        }

        info!("Bill {} is now {}", current.id, current.status);
        Ok(current)
    }
}
