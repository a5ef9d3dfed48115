//! Amount extraction from a span of free text.
//!
//! Strategies run in priority order and the first one that yields a
//! positive value wins:
//! 1) digits grouped in threes by `,` `.` or a space (`10.000`, `10,000`)
//! 2) a bare run of 4+ digits (`10000`)
//! 3) magnitude words, either scaled by a numeral (`5 mil`) or spelled out
//!    (`diez mil`, `un millón`)
//! 4) a simple decimal with at most two fraction digits (`20.50`, `20,50`)
//!
//! Because (1) runs before (4), `1.234` reads as 1234. That follows the
//! Venezuelan convention of `.` for thousands and is kept on purpose.

use regex::Regex;
use std::sync::LazyLock;

use crate::lexicon::{MAGNITUDE_WORDS, literal};

static DEFAULT_EXTRACTOR: LazyLock<AmountExtractor> = LazyLock::new(AmountExtractor::new);

/// Extract the amount from `text` with the default tables.
pub fn extract_amount(text: &str) -> Option<f64> {
    DEFAULT_EXTRACTOR.extract(text)
}

#[derive(Debug, Clone)]
pub struct AmountExtractor {
    grouped: Regex,
    long_run: Regex,
    scaled: Regex,
    magnitudes: Vec<(Regex, f64)>,
    decimal: Regex,
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AmountExtractor {
    pub fn new() -> Self {
        let magnitudes = MAGNITUDE_WORDS
            .iter()
            .map(|(word, value)| (literal(&format!(r"\b{}\b", regex::escape(word))), *value))
            .collect();

        Self {
            // thousands groups, then an optional comma decimal tail (`10.000,50`)
            grouped: literal(r"\b(\d{1,3}(?:[,. ]\d{3})+)(?:,(\d{1,2}))?(?:[^0-9]|$)"),
            // a run with no separator in front, so fraction digits never qualify
            long_run: literal(r"(?:^|[^\d.,])(\d{4,})"),
            scaled: literal(r"\b(\d+(?:[.,]\d{1,2})?)\s*(millones|millón|millon|mil)\b"),
            magnitudes,
            decimal: literal(r"(\d+(?:[.,]\d{1,2})?)"),
        }
    }

    pub fn extract(&self, text: &str) -> Option<f64> {
        let lowered = text.to_lowercase();

        self.grouped_amount(&lowered)
            .or_else(|| self.long_run_amount(&lowered))
            .or_else(|| self.scaled_amount(&lowered))
            .or_else(|| self.spelled_amount(&lowered))
            .or_else(|| self.decimal_amount(&lowered))
    }

    fn grouped_amount(&self, text: &str) -> Option<f64> {
        let caps = self.grouped.captures(text)?;
        let mut digits: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
        if let Some(fraction) = caps.get(2) {
            digits.push('.');
            digits.push_str(fraction.as_str());
        }
        positive(digits.parse().ok()?)
    }

    fn long_run_amount(&self, text: &str) -> Option<f64> {
        let caps = self.long_run.captures(text)?;
        positive(caps[1].parse().ok()?)
    }

    fn scaled_amount(&self, text: &str) -> Option<f64> {
        let caps = self.scaled.captures(text)?;
        let base: f64 = caps[1].replace(',', ".").parse().ok()?;
        let factor = if &caps[2] == "mil" { 1_000.0 } else { 1_000_000.0 };
        positive(base * factor)
    }

    fn spelled_amount(&self, text: &str) -> Option<f64> {
        self.magnitudes
            .iter()
            .find(|(re, _)| re.is_match(text))
            .and_then(|(_, value)| positive(*value))
    }

    fn decimal_amount(&self, text: &str) -> Option<f64> {
        let caps = self.decimal.captures(text)?;
        positive(caps[1].replace(',', ".").parse().ok()?)
    }
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
