//! One-line confirmation text for a parsed command.

use bolsillo_core::ParsedCommand;

use crate::lexicon::category_label;

/// e.g. "💰 Ingreso de 50 USD en Salario desde Banesco". Clauses for a
/// missing category or account are left out.
pub fn format_command(cmd: &ParsedCommand) -> String {
    let mut out = format!(
        "{} {} de {} {}",
        cmd.kind.emoji(),
        cmd.kind.label(),
        cmd.amount,
        cmd.currency.code()
    );

    if let Some(category) = &cmd.category {
        out.push_str(" en ");
        out.push_str(category_label(category).unwrap_or(category.as_str()));
    }

    if let Some(account) = &cmd.account {
        out.push_str(" desde ");
        out.push_str(&capitalize(account));
    }

    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
