//! Parser output: one structured transaction extracted from free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money flow. Never ambiguous: expense is the default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[default]
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "income")]
    Income,
}

impl TransactionType {
    /// Spanish label used in confirmation text.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Gasto",
            TransactionType::Income => "Ingreso",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            TransactionType::Expense => "💸",
            TransactionType::Income => "💰",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Expense => f.write_str("expense"),
            TransactionType::Income => f.write_str("income"),
        }
    }
}

/// Currencies the tracker books transactions in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "VES")]
    Ves,
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "USDC")]
    Usdc,
}

impl Currency {
    /// ISO-style code, as shown to the user.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ves => "VES",
            Currency::Usdt => "USDT",
            Currency::Usdc => "USDC",
        }
    }

    /// Dollar-pegged stablecoins convert 1:1 with USD.
    pub fn is_dollar_pegged(&self) -> bool {
        matches!(self, Currency::Usd | Currency::Usdt | Currency::Usdc)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A transaction extracted from one span of free text.
///
/// Only built when an amount was found; every other field degrades to a
/// default or `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always positive.
    pub amount: f64,
    pub currency: Currency,
    /// Id into the category registry.
    pub category: Option<String>,
    /// Account name key (bank or wallet).
    pub account: Option<String>,
    /// Left unset by the parser; filled by the caller.
    pub description: Option<String>,
    /// The exact span this command was read from.
    pub raw_text: String,
    /// In (0, 1].
    pub confidence: f64,
}

impl ParsedCommand {
    pub const BASE_CONFIDENCE: f64 = 0.5;
    pub const AMOUNT_WEIGHT: f64 = 0.2;
    pub const CATEGORY_WEIGHT: f64 = 0.15;
    pub const ACCOUNT_WEIGHT: f64 = 0.15;

    /// Additive confidence from which sub-detections succeeded, capped at 1.0.
    pub fn score(has_amount: bool, has_category: bool, has_account: bool) -> f64 {
        let mut c = Self::BASE_CONFIDENCE;
        if has_amount {
            c += Self::AMOUNT_WEIGHT;
        }
        if has_category {
            c += Self::CATEGORY_WEIGHT;
        }
        if has_account {
            c += Self::ACCOUNT_WEIGHT;
        }
        c.min(1.0)
    }

    /// Attach a caller-provided description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
