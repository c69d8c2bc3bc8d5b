//! Expense categories and bill review statuses.
//!
//! Both are stored as plain strings in the database; these enums are the only
//! place the accepted values are listed.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Category of an expense, as offered by the new bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseType {
    /// Travel: train, taxi, fuel...
    Transports,
    /// Meals
    RestaurantsEtBars,
    /// Accommodation
    HotelEtLogement,
    /// Online subscriptions and services
    ServicesEnLigne,
    /// Computers and electronics
    ItEtElectronique,
    /// Equipment
    EquipementEtMateriel,
    /// Office supplies
    FournituresDeBureau,
}

impl ExpenseType {
    /// Every category, in the order the form lists them
    pub const ALL: [Self; 7] = [
        Self::Transports,
        Self::RestaurantsEtBars,
        Self::HotelEtLogement,
        Self::ServicesEnLigne,
        Self::ItEtElectronique,
        Self::EquipementEtMateriel,
        Self::FournituresDeBureau,
    ];

    /// Stored and displayed label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transports => "Transports",
            Self::RestaurantsEtBars => "Restaurants et bars",
            Self::HotelEtLogement => "Hôtel et logement",
            Self::ServicesEnLigne => "Services en ligne",
            Self::ItEtElectronique => "IT et électronique",
            Self::EquipementEtMateriel => "Equipement et matériel",
            Self::FournituresDeBureau => "Fournitures de bureau",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = Error;

    /// Matches a label, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == wanted)
            .ok_or_else(|| Error::InvalidExpenseType {
                value: value.to_string(),
            })
    }
}

/// Review status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    /// Submitted, awaiting review
    Pending,
    /// Approved by an administrator
    Accepted,
    /// Rejected by an administrator
    Refused,
}

impl BillStatus {
    /// Every status
    pub const ALL: [Self; 3] = [Self::Pending, Self::Accepted, Self::Refused];

    /// Stored value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }

    /// Label shown in bill lists
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "refused" => Ok(Self::Refused),
            _ => Err(Error::InvalidStatus {
                value: value.to_string(),
            }),
        }
    }
}
