//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bill;
pub mod receipt;

// Re-export specific types to avoid conflicts
pub use bill::{Column as BillColumn, Entity as Bill, Model as BillModel};
pub use receipt::{Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel};
