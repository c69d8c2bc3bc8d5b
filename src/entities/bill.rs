//! Bill entity - An expense report submitted by an employee.
//!
//! Each bill carries the form values (`expense_type`, `name`, `date`, `amount`,
//! `vat`, `pct`, `commentary`), the receipt it was submitted with, the owning
//! employee's `email`, and a review `status` (pending/accepted/refused).
//! JSON serialisation keeps the camelCase field names used by the web client.
use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the bill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Expense category (e.g. "Transports", "Restaurants et bars")
    #[serde(rename = "type")]
    pub expense_type: String,
    /// Free-text name of the expense, may be empty
    pub name: String,
    /// Date the expense occurred
    pub date: NaiveDate,
    /// Amount including VAT, in currency units
    pub amount: f64,
    /// VAT amount, if provided
    pub vat: Option<f64>,
    /// VAT percentage
    pub pct: i32,
    /// Optional employee commentary
    pub commentary: Option<String>,
    /// Upload key of the receipt this bill was submitted with
    pub receipt_id: i64,
    /// Public location of the uploaded receipt
    pub file_url: String,
    /// Original receipt filename
    pub file_name: String,
    /// Review status: `"pending"`, `"accepted"` or `"refused"`
    pub status: String,
    /// Email of the employee who submitted the bill
    pub email: String,
    /// Administrator's review note
    #[serde(rename = "commentAdmin")]
    pub commentary_admin: Option<String>,
}

/// Defines relationships between Bill and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bill references the receipt uploaded for it
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id"
    )]
    Receipt,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
