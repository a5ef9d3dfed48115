//! Compound utterances: "desayuno 5, taxi 3, y café 2".
//!
//! Only the first clause usually states type and currency; later clauses are
//! elliptical and inherit them. Account and category are always re-detected
//! per clause, since one utterance may span several of each.

use std::sync::LazyLock;

use bolsillo_core::{Currency, ParsedCommand, TransactionType};
use regex::Regex;

use crate::amount::extract_amount;
use crate::detect::{Dimension, detect_account, detect_category, detect_explicit};
use crate::lexicon::{Lexicon, literal};
use crate::parser::{ParseContext, parse_command};

/// Confidence given to a clause rebuilt from its amount alone.
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

// whitespace-bounded "y", ", y ", or a comma, in that priority
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| literal(r"(?i)\s+y\s+|,\s*y\s+|,"));

/// What became of one clause.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    Parsed(ParsedCommand),
    /// No amount could be read from this clause.
    Unparsed { raw_text: String },
}

impl SegmentOutcome {
    pub fn command(&self) -> Option<&ParsedCommand> {
        match self {
            SegmentOutcome::Parsed(cmd) => Some(cmd),
            SegmentOutcome::Unparsed { .. } => None,
        }
    }

    pub fn into_command(self) -> Option<ParsedCommand> {
        match self {
            SegmentOutcome::Parsed(cmd) => Some(cmd),
            SegmentOutcome::Unparsed { .. } => None,
        }
    }
}

/// Split on conjunctions and commas. A comma between two digits is a number
/// separator (`10,50`, `10,000`) and does not split.
pub fn split_segments(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut segments = Vec::new();
    let mut start = 0;
    for m in SEPARATOR.find_iter(text) {
        if m.as_str() == "," && is_numeric_comma(text, m.start()) {
            continue;
        }
        segments.push(&text[start..m.start()]);
        start = m.end();
    }
    segments.push(&text[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_numeric_comma(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back();
    let after = text[at + 1..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

/// Parse every clause and report what happened to each.
pub fn parse_segments(text: &str, lexicon: &Lexicon, ctx: &ParseContext<'_>) -> Vec<SegmentOutcome> {
    let segments = split_segments(text);
    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };

    let mut kind = TransactionType::default();
    let mut currency = Currency::default();
    let mut out = Vec::with_capacity(segments.len());

    match parse_command(first, lexicon, ctx) {
        Some(cmd) => {
            kind = cmd.kind;
            currency = cmd.currency;
            out.push(SegmentOutcome::Parsed(cmd));
        }
        None => {
            tracing::debug!(segment = %first, "leading segment has no amount");
            out.push(SegmentOutcome::Unparsed {
                raw_text: first.to_string(),
            });
        }
    }

    for segment in rest {
        let outcome = match parse_command(segment, lexicon, ctx) {
            Some(mut cmd) => {
                if !detect_explicit(segment, Dimension::Type, lexicon) {
                    cmd.kind = kind;
                }
                if !detect_explicit(segment, Dimension::Currency, lexicon) {
                    cmd.currency = currency;
                }
                SegmentOutcome::Parsed(cmd)
            }
            None => fallback(segment, kind, currency, lexicon, ctx),
        };
        out.push(outcome);
    }

    out
}

/// Amount-only rebuild of a clause the full parser rejected.
fn fallback(
    segment: &str,
    kind: TransactionType,
    currency: Currency,
    lexicon: &Lexicon,
    ctx: &ParseContext<'_>,
) -> SegmentOutcome {
    let Some(amount) = extract_amount(segment) else {
        tracing::debug!(segment = %segment, "dropping segment without amount");
        return SegmentOutcome::Unparsed {
            raw_text: segment.to_string(),
        };
    };

    tracing::debug!(segment = %segment, amount, "segment rebuilt from amount only");
    SegmentOutcome::Parsed(ParsedCommand {
        kind,
        amount,
        currency,
        category: detect_category(segment, ctx.categories),
        account: detect_account(segment, ctx.account_table(lexicon)),
        description: None,
        raw_text: segment.to_string(),
        confidence: FALLBACK_CONFIDENCE,
    })
}

/// The commands from [`parse_segments`], dropping clauses with no amount.
pub fn parse_multiple(text: &str, lexicon: &Lexicon, ctx: &ParseContext<'_>) -> Vec<ParsedCommand> {
    parse_segments(text, lexicon, ctx)
        .into_iter()
        .filter_map(SegmentOutcome::into_command)
        .collect()
}
