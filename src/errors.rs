//! Unified error type for Billed.
//!
//! Every layer (store, form controller, dashboard, bot) returns this error so
//! failures propagate with `?` up to the command handler that reports them.

use thiserror::Error;

/// All errors that can occur while submitting, listing, or reviewing bills.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// config.toml is not valid TOML or does not match the expected layout
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A required form field was left empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Form field identifier (e.g. `amount`)
        field: &'static str,
    },

    /// A numeric form field did not hold a number
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber {
        /// Form field identifier
        field: &'static str,
        /// Raw value entered by the user
        value: String,
    },

    /// The date picker value is not a `YYYY-MM-DD` date
    #[error("Invalid date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Raw value entered by the user
        value: String,
    },

    /// The expense type is not one of the known categories
    #[error("Unknown expense type: '{value}'")]
    InvalidExpenseType {
        /// Raw value entered by the user
        value: String,
    },

    /// The status string is not pending/accepted/refused
    #[error("Unknown bill status: '{value}'")]
    InvalidStatus {
        /// Raw status value
        value: String,
    },

    /// The receipt does not have a png, jpg or jpeg extension
    #[error("Invalid receipt file '{file_name}': only png, jpg and jpeg are accepted")]
    InvalidFile {
        /// Name of the rejected file
        file_name: String,
    },

    /// The receipt is larger than the store accepts
    #[error("Receipt is too large: {size} bytes (at most {max})")]
    ReceiptTooLarge {
        /// Size of the attached file in bytes
        size: u64,
        /// Largest accepted size in bytes
        max: u64,
    },

    /// Submit was attempted without an accepted receipt
    #[error("A receipt (png, jpg or jpeg) must be attached before submitting")]
    MissingReceipt,

    /// The store collaborator failed; the message is shown verbatim
    #[error("{message}")]
    Store {
        /// Message reported by the store (e.g. `Erreur 404`)
        message: String,
    },

    /// No bill with this id exists
    #[error("Bill not found: {id}")]
    BillNotFound {
        /// Bill primary key
        id: i64,
    },

    /// The session is not allowed to perform the operation
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// What was refused
        message: String,
    },

    /// A review was attempted on a bill that cannot be reviewed
    #[error("Invalid review: {message}")]
    InvalidReview {
        /// Why the review was refused
        message: String,
    },

    /// The session payload could not be read
    #[error("Session error: {0}")]
    Session(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error while reading config or writing receipts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error while formatting a reply
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Returns true for errors caused by what the user typed or attached,
    /// as opposed to store or infrastructure failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidNumber { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidExpenseType { .. }
                | Self::InvalidFile { .. }
                | Self::ReceiptTooLarge { .. }
                | Self::MissingReceipt
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
