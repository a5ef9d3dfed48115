//! Entity detectors: transaction type, currency, category and account.
//!
//! All scans are case-insensitive and return the first hit in table order,
//! not the longest or most specific one.

use bolsillo_core::{CategoryRecord, Currency, TransactionType};

use crate::lexicon::{
    AccountTable, CATEGORY_RULES, EXPENSE_TRIGGERS, INCOME_TRIGGERS, Lexicon,
};

/// Which dimension a segment may state explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Type,
    Currency,
}

/// `Income` if any income trigger appears; otherwise `Expense`.
pub fn detect_type(text: &str) -> TransactionType {
    let lowered = text.to_lowercase();
    match INCOME_TRIGGERS.iter().find(|t| lowered.contains(*t)) {
        Some(trigger) => {
            tracing::trace!(trigger, "income trigger");
            TransactionType::Income
        }
        None => TransactionType::Expense,
    }
}

/// First matching currency pattern, defaulting to USD.
pub fn detect_currency(text: &str, lexicon: &Lexicon) -> Currency {
    match_currency(&text.to_lowercase(), lexicon).unwrap_or_default()
}

fn match_currency(lowered: &str, lexicon: &Lexicon) -> Option<Currency> {
    lexicon
        .currency_patterns()
        .iter()
        .find(|(re, _)| re.is_match(lowered))
        .map(|(_, currency)| *currency)
}

/// Static keyword table first, then the display names of `custom`.
pub fn detect_category(text: &str, custom: &[CategoryRecord]) -> Option<String> {
    let lowered = text.to_lowercase();

    let by_keyword = CATEGORY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)));
    if let Some(rule) = by_keyword {
        tracing::trace!(category = rule.id, "category keyword");
        return Some(rule.id.to_string());
    }

    custom
        .iter()
        .find(|c| lowered.contains(&c.name().to_lowercase()))
        .map(|c| c.id().to_string())
}

/// Name of the first account whose keyword appears in `text`.
pub fn detect_account(text: &str, accounts: &AccountTable) -> Option<String> {
    let found = accounts.find(&text.to_lowercase()).map(str::to_string);
    if let Some(name) = &found {
        tracing::trace!(account = %name, "account keyword");
    }
    found
}

/// Whether `text` literally carries a trigger for `dimension`.
pub fn detect_explicit(text: &str, dimension: Dimension, lexicon: &Lexicon) -> bool {
    let lowered = text.to_lowercase();
    match dimension {
        Dimension::Type => INCOME_TRIGGERS
            .iter()
            .chain(EXPENSE_TRIGGERS)
            .any(|t| lowered.contains(t)),
        Dimension::Currency => match_currency(&lowered, lexicon).is_some(),
    }
}
