//! Ledger entry model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::payment_method::PaymentMethod;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
/// Identifier of an entry, unique within one ledger and never reused.
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EntryId)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One financial transaction record. Edits replace the whole value.
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
}

impl LedgerEntry {
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            date: draft.date,
            category: draft.category,
            description: draft.description,
            amount: draft.amount,
            payment_method: draft.payment_method,
        }
    }

    /// Copy of the entry's content, keeping its id.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            id: Some(self.id),
            date: self.date,
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
            payment_method: self.payment_method.clone(),
        }
    }

    /// Canonical `YYYY-MM-DD` rendering of the entry date.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Validated entry content on its way into the store. `id` is `None` for new entries.
pub struct EntryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
}

impl EntryDraft {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: None,
            date,
            category: category.into(),
            description: description.into(),
            amount,
            payment_method,
        }
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}
