//! Shared test utilities for Billed.
//!
//! Provides in-memory databases, a database-backed store writing receipts to a
//! temporary directory, sample form input, and [`RecordingStore`], a store
//! double that records every call it receives.

#![allow(clippy::unwrap_used)]

use crate::{
    config::settings::ReceiptsConfig,
    core::{
        expense::BillStatus,
        new_bill::NewBillInput,
        receipt::{ReceiptUpload, StoredReceipt},
        session::{Session, UserType},
        store::{BillStore, BillUpdate, DbBillStore, NewBillRecord},
    },
    entities::bill,
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::Mutex;
use tempfile::TempDir;

/// Email of the employee used throughout the tests
pub const EMPLOYEE_EMAIL: &str = "employee@test.tld";
/// Email of the administrator used throughout the tests
pub const ADMIN_EMAIL: &str = "admin@test.tld";
/// Base URL the test store serves receipts from
pub const TEST_PUBLIC_URL: &str = "http://localhost:5678/public";

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a database-backed store writing receipts into a fresh temporary
/// directory. Keep the returned directory alive for the duration of the test.
pub async fn setup_test_store() -> Result<(TempDir, DbBillStore)> {
    let dir = tempfile::tempdir()?;
    let db = setup_test_db().await?;
    let store = DbBillStore::new(
        db,
        ReceiptsConfig {
            directory: dir.path().to_path_buf(),
            public_url: TEST_PUBLIC_URL.to_string(),
        },
    );
    Ok((dir, store))
}

/// Session of a regular employee
pub fn employee_session() -> Session {
    Session::new(UserType::Employee, EMPLOYEE_EMAIL.to_string())
}

/// Session of an administrator
pub fn admin_session() -> Session {
    Session::new(UserType::Admin, ADMIN_EMAIL.to_string())
}

/// A receipt upload with placeholder bytes
pub fn jpg_upload(file_name: &str) -> ReceiptUpload {
    ReceiptUpload {
        file_name: file_name.to_string(),
        bytes: b"fake jpeg".to_vec(),
    }
}

/// A fully filled form: Transports / test / 2024-04-30 / 100 / 10 / 20 / test
pub fn sample_input() -> NewBillInput {
    NewBillInput {
        expense_type: "Transports".to_string(),
        name: "test".to_string(),
        date: "2024-04-30".to_string(),
        amount: "100".to_string(),
        vat: "10".to_string(),
        pct: "20".to_string(),
        commentary: "test".to_string(),
    }
}

/// The record [`sample_input`] produces once `stored` is attached.
pub fn sample_record(stored: &StoredReceipt, email: &str) -> NewBillRecord {
    NewBillRecord {
        expense_type: crate::core::expense::ExpenseType::Transports,
        name: "test".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        amount: 100.0,
        vat: Some(10.0),
        pct: 20,
        commentary: Some("test".to_string()),
        receipt_key: stored.key,
        file_url: stored.file_url.clone(),
        file_name: "test.jpg".to_string(),
        status: BillStatus::Pending,
        email: email.to_string(),
    }
}

/// Builds a stored bill model directly, for views that only read bills.
pub fn bill_model(id: i64, email: &str, date: &str, status: &str) -> bill::Model {
    bill::Model {
        id,
        expense_type: "Restaurants et bars".to_string(),
        name: format!("bill {id}"),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount: 42.5,
        vat: Some(7.08),
        pct: 20,
        commentary: None,
        receipt_id: id,
        file_url: format!("https://receipts.test/{id}-receipt.png"),
        file_name: "receipt.png".to_string(),
        status: status.to_string(),
        email: email.to_string(),
        commentary_admin: None,
    }
}

fn record_into_model(id: i64, record: NewBillRecord) -> bill::Model {
    bill::Model {
        id,
        expense_type: record.expense_type.as_str().to_string(),
        name: record.name,
        date: record.date,
        amount: record.amount,
        vat: record.vat,
        pct: record.pct,
        commentary: record.commentary,
        receipt_id: record.receipt_key,
        file_url: record.file_url,
        file_name: record.file_name,
        status: record.status.as_str().to_string(),
        email: record.email,
        commentary_admin: None,
    }
}

/// In-memory [`BillStore`] that records its calls.
///
/// `fail` makes every operation fail with `Error::Store { message }`;
/// `fail_create_bill` only affects bill creation. Like the database store,
/// `update` refuses bills that are no longer pending.
#[derive(Debug, Default)]
pub struct RecordingStore {
    /// Failure message for every operation
    pub fail: Option<String>,
    /// Failure message for `create_bill` only
    pub fail_create_bill: Option<String>,
    /// Bills returned by `list`
    pub bills: Mutex<Vec<bill::Model>>,
    uploads: Mutex<Vec<String>>,
    discarded: Mutex<Vec<i64>>,
    created: Mutex<Vec<NewBillRecord>>,
    updates: Mutex<Vec<(i64, BillUpdate)>>,
}

impl RecordingStore {
    /// A store whose every operation fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// A store that uploads receipts but fails bill creation with `message`
    pub fn failing_create_bill(message: &str) -> Self {
        Self {
            fail_create_bill: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// A store listing `bills`
    pub fn with_bills(bills: Vec<bill::Model>) -> Self {
        Self {
            bills: Mutex::new(bills),
            ..Default::default()
        }
    }

    /// File names passed to `create`
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Receipt keys passed to `discard_receipt`
    pub fn discarded(&self) -> Vec<i64> {
        self.discarded.lock().unwrap().clone()
    }

    /// Records passed to `create_bill`
    pub fn created(&self) -> Vec<NewBillRecord> {
        self.created.lock().unwrap().clone()
    }

    /// Arguments of the `update` calls that changed a bill
    pub fn updates(&self) -> Vec<(i64, BillUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    fn check(&self, specific: Option<&String>) -> Result<()> {
        match specific.or(self.fail.as_ref()) {
            Some(message) => Err(Error::Store {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BillStore for RecordingStore {
    async fn list(&self) -> Result<Vec<bill::Model>> {
        self.check(None)?;
        Ok(self.bills.lock().unwrap().clone())
    }

    async fn create(&self, upload: ReceiptUpload, _email: &str) -> Result<StoredReceipt> {
        self.check(None)?;
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(upload.file_name.clone());
        let key = i64::try_from(uploads.len()).unwrap();
        Ok(StoredReceipt {
            file_url: format!("https://receipts.test/{key}-{}", upload.file_name),
            key,
        })
    }

    async fn discard_receipt(&self, key: i64) -> Result<()> {
        self.check(None)?;
        self.discarded.lock().unwrap().push(key);
        Ok(())
    }

    async fn create_bill(&self, record: NewBillRecord) -> Result<bill::Model> {
        self.check(self.fail_create_bill.as_ref())?;
        self.created.lock().unwrap().push(record.clone());
        let mut bills = self.bills.lock().unwrap();
        let model = record_into_model(i64::try_from(bills.len()).unwrap() + 1, record);
        bills.push(model.clone());
        Ok(model)
    }

    async fn update(&self, bill_id: i64, update: BillUpdate) -> Result<bill::Model> {
        self.check(None)?;
        let mut bills = self.bills.lock().unwrap();
        let bill = bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or(Error::BillNotFound { id: bill_id })?;
        if bill.status != BillStatus::Pending.as_str() {
            return Err(Error::InvalidReview {
                message: format!("bill {bill_id} is already {}", bill.status),
            });
        }
        bill.status = update.status.as_str().to_string();
        bill.commentary_admin.clone_from(&update.commentary_admin);
        self.updates.lock().unwrap().push((bill_id, update));
        Ok(bill.clone())
    }
}
