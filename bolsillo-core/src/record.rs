//! Confirmed transaction, as handed to the transaction sink.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{Currency, ParsedCommand, TransactionType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always positive; see [`TransactionRecord::signed_amount`].
    pub amount: f64,
    pub currency: Currency,
    pub category: Option<String>,
    pub account: Option<String>,
    pub description: String,
}

impl TransactionRecord {
    /// Positive = income, negative = expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl ParsedCommand {
    /// Convert a (possibly user-edited) command into a record.
    ///
    /// The description falls back to the raw text span.
    pub fn into_record(self, id: impl Into<String>, date: NaiveDate) -> TransactionRecord {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(self.raw_text);
        TransactionRecord {
            id: id.into(),
            date,
            kind: self.kind,
            amount: self.amount,
            currency: self.currency,
            category: self.category,
            account: self.account,
            description,
        }
    }
}
