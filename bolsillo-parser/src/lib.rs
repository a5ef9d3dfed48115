//! bolsillo-parser: turns Spanish voice/text commands ("gasté 20 en café",
//! "10 en comida y 5 en taxi") into structured transactions.

pub mod amount;
pub mod detect;
pub mod format;
pub mod lexicon;
pub mod parser;
pub mod segment;

pub use amount::{AmountExtractor, extract_amount};
pub use detect::{Dimension, detect_account, detect_category, detect_currency, detect_explicit, detect_type};
pub use format::format_command;
pub use lexicon::{AccountEntry, AccountTable, CategoryRule, Lexicon};
pub use parser::{ParseContext, Parser, parse_command};
pub use segment::{SegmentOutcome, parse_multiple, parse_segments, split_segments};
