//! Seams to the collaborators around the parser: the category registry,
//! the exchange-rate supplier and the transaction sink.
//!
//! Real adapters (BCV rate fetching, app storage) live outside this
//! workspace; the in-memory implementations here back the CLI and tests.

use crate::category::CategoryRecord;
use crate::command::Currency;
use crate::error::CoreError;
use crate::record::TransactionRecord;

/// Read-only source of user-defined categories.
pub trait CategoryRegistry {
    fn categories(&self) -> Vec<CategoryRecord>;
}

/// Supplies conversion rates, expressed as units of `currency` per 1 USD.
pub trait RateSupplier {
    fn usd_rate(&self, currency: Currency) -> Option<f64>;
}

/// Receives confirmed transactions.
pub trait TransactionSink {
    fn submit(&mut self, record: TransactionRecord) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCategories(pub Vec<CategoryRecord>);

impl CategoryRegistry for StaticCategories {
    fn categories(&self) -> Vec<CategoryRecord> {
        self.0.clone()
    }
}

/// Fixed rates: dollar-pegged currencies at 1.0, VES at a configured rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedRates {
    pub ves_per_usd: Option<f64>,
}

impl FixedRates {
    pub fn new(ves_per_usd: f64) -> Self {
        Self {
            ves_per_usd: Some(ves_per_usd),
        }
    }
}

impl RateSupplier for FixedRates {
    fn usd_rate(&self, currency: Currency) -> Option<f64> {
        if currency.is_dollar_pegged() {
            return Some(1.0);
        }
        self.ves_per_usd.filter(|r| *r > 0.0)
    }
}

/// Convert an amount to USD; `None` when no usable rate is known.
pub fn to_usd(amount: f64, currency: Currency, rates: &impl RateSupplier) -> Option<f64> {
    let rate = rates.usd_rate(currency)?;
    if rate <= 0.0 {
        return None;
    }
    Some(amount / rate)
}

/// Collects records in memory; rejects duplicate ids and non-positive amounts.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub records: Vec<TransactionRecord>,
}

impl TransactionSink for MemorySink {
    fn submit(&mut self, record: TransactionRecord) -> Result<(), CoreError> {
        if record.amount.is_nan() || record.amount <= 0.0 {
            return Err(CoreError::Rejected {
                id: record.id,
                reason: "amount must be positive".to_string(),
            });
        }
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(CoreError::Rejected {
                id: record.id,
                reason: "duplicate id".to_string(),
            });
        }
        tracing::debug!(id = %record.id, amount = record.amount, "transaction accepted");
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TransactionType;
    use chrono::NaiveDate;

    fn record(id: &str, amount: f64) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            kind: TransactionType::Expense,
            amount,
            currency: Currency::Usd,
            category: None,
            account: None,
            description: "café".to_string(),
        }
    }

    #[test]
    fn test_to_usd() {
        let rates = FixedRates::new(40.0);
        assert_eq!(to_usd(400.0, Currency::Ves, &rates), Some(10.0));
        assert_eq!(to_usd(7.5, Currency::Usdt, &rates), Some(7.5));
        assert_eq!(to_usd(10.0, Currency::Ves, &FixedRates::default()), None);
    }

    #[test]
    fn test_memory_sink_rejects_duplicates() {
        let mut sink = MemorySink::default();
        sink.submit(record("a", 3.0)).unwrap();
        let err = sink.submit(record("a", 4.0)).unwrap_err();
        assert!(matches!(err, CoreError::Rejected { .. }));
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn test_memory_sink_rejects_non_positive() {
        let mut sink = MemorySink::default();
        assert!(sink.submit(record("z", 0.0)).is_err());
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_static_categories() {
        let reg = StaticCategories(vec![CategoryRecord::new("pets", "Mascotas").unwrap()]);
        assert_eq!(reg.categories()[0].id(), "pets");
    }
}
