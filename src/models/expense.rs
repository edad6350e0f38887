//! Expense model
//!
//! An expense is an ETB amount spent on a given day in one of a fixed set of
//! categories. Expenses are created and deleted, never edited in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Spending category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Rent,
    Internet,
    Entertainment,
    Coffee,
    Item,
    Other,
}

impl Category {
    /// Categories in picker order
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Coffee,
        Self::Entertainment,
        Self::Item,
        Self::Transport,
        Self::Rent,
        Self::Internet,
        Self::Other,
    ];

    /// Short label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Rent => "Rent",
            Self::Internet => "Internet",
            Self::Entertainment => "Fun",
            Self::Coffee => "Coffee",
            Self::Item => "Item",
            Self::Other => "Other",
        }
    }

    /// Parse a category from its value or its label, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "rent" => Some(Self::Rent),
            "internet" => Some(Self::Internet),
            "entertainment" | "fun" => Some(Self::Entertainment),
            "coffee" => Some(Self::Coffee),
            "item" => Some(Self::Item),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Food
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How often a recurring expense repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    #[serde(rename = "amountETB")]
    pub amount_etb: Money,

    pub category: Category,

    pub date: NaiveDate,

    pub is_recurring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Expense {
    /// Materialize a draft under the given id
    pub fn from_draft(id: ExpenseId, draft: NewExpense) -> Self {
        Self {
            id,
            amount_etb: draft.amount_etb,
            category: draft.category,
            date: draft.date,
            is_recurring: draft.is_recurring,
            frequency: draft.frequency,
            note: draft.note,
        }
    }

    /// Note to show, falling back to a generic label
    pub fn note_or_default(&self) -> &str {
        self.note.as_deref().unwrap_or("General")
    }
}

/// An expense before it has an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount_etb: Money,
    pub category: Category,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub note: Option<String>,
}

impl NewExpense {
    /// A one-off expense with no note
    pub fn new(amount_etb: Money, category: Category, date: NaiveDate) -> Self {
        Self {
            amount_etb,
            category,
            date,
            is_recurring: false,
            frequency: None,
            note: None,
        }
    }

    /// Mark as recurring with the given frequency
    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.is_recurring = true;
        self.frequency = Some(frequency);
        self
    }

    /// Attach a note; blank notes are dropped
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = Some(note.trim().to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Clear the recurrence flag and frequency
    pub fn without_recurrence(mut self) -> Self {
        self.is_recurring = false;
        self.frequency = None;
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount_etb.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Sort newest date first; ties keep their relative order
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}
