//! Single-command parsing and the `Parser` handle that owns the lexicon.

use std::sync::{Arc, RwLock};

use bolsillo_core::{CategoryRecord, ParsedCommand};

use crate::amount::extract_amount;
use crate::detect::{detect_account, detect_category, detect_currency, detect_type};
use crate::lexicon::{AccountTable, Lexicon};
use crate::segment::{self, SegmentOutcome};

/// Shortest input (after trimming) worth parsing.
pub const MIN_INPUT_CHARS: usize = 3;

/// Per-call inputs from the surrounding app.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseContext<'a> {
    /// User-defined categories, matched by display name after the static
    /// keyword table.
    pub categories: &'a [CategoryRecord],
    /// Overrides the lexicon's account table for this call only.
    pub accounts: Option<&'a AccountTable>,
}

impl<'a> ParseContext<'a> {
    pub fn with_categories(mut self, categories: &'a [CategoryRecord]) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_accounts(mut self, accounts: &'a AccountTable) -> Self {
        self.accounts = Some(accounts);
        self
    }

    pub(crate) fn account_table<'b>(&'b self, lexicon: &'b Lexicon) -> &'b AccountTable {
        self.accounts.unwrap_or_else(|| lexicon.accounts())
    }
}

/// Parse one self-contained utterance. `None` when the text is too short or
/// carries no amount.
pub fn parse_command(text: &str, lexicon: &Lexicon, ctx: &ParseContext<'_>) -> Option<ParsedCommand> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_INPUT_CHARS {
        return None;
    }

    let amount = extract_amount(trimmed)?;
    let category = detect_category(trimmed, ctx.categories);
    let account = detect_account(trimmed, ctx.account_table(lexicon));
    let confidence = ParsedCommand::score(true, category.is_some(), account.is_some());

    Some(ParsedCommand {
        kind: detect_type(trimmed),
        amount,
        currency: detect_currency(trimmed, lexicon),
        category,
        account,
        description: None,
        raw_text: trimmed.to_string(),
        confidence,
    })
}

/// Thread-safe parser handle.
///
/// Each call reads one snapshot of the lexicon; `reconfigure*` swaps in a
/// whole new one, so a parse never sees a half-updated account table.
#[derive(Debug)]
pub struct Parser {
    lexicon: RwLock<Arc<Lexicon>>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl Parser {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: RwLock::new(Arc::new(lexicon)),
        }
    }

    /// Current lexicon snapshot.
    pub fn lexicon(&self) -> Arc<Lexicon> {
        let guard = self.lexicon.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn reconfigure(&self, lexicon: Lexicon) {
        let mut guard = self.lexicon.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(lexicon);
    }

    /// Replace the account keyword table for all later parses.
    pub fn reconfigure_accounts(&self, accounts: AccountTable) {
        tracing::debug!(accounts = accounts.entries().len(), "account table replaced");
        let next = self.lexicon().with_accounts(accounts);
        self.reconfigure(next);
    }

    pub fn parse(&self, text: &str, ctx: &ParseContext<'_>) -> Option<ParsedCommand> {
        parse_command(text, &self.lexicon(), ctx)
    }

    pub fn parse_multiple(&self, text: &str, ctx: &ParseContext<'_>) -> Vec<ParsedCommand> {
        segment::parse_multiple(text, &self.lexicon(), ctx)
    }

    pub fn parse_segments(&self, text: &str, ctx: &ParseContext<'_>) -> Vec<SegmentOutcome> {
        segment::parse_segments(text, &self.lexicon(), ctx)
    }
}
