//! Receipt entity - A proof-of-expense image uploaded before a bill is submitted.
//!
//! The row id is the upload key handed back to the form, the bytes live in the
//! configured receipts directory and `file_url` is where they are served from.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Upload key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Original filename as selected by the employee
    pub file_name: String,
    /// Public location of the stored file
    pub file_url: String,
    /// Email of the uploader
    pub email: String,
    /// When the file was uploaded
    pub uploaded_at: DateTimeUtc,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A receipt is attached to at most one bill
    #[sea_orm(has_many = "super::bill::Entity")]
    Bills,
}

impl Related<super::bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
