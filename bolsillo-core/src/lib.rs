//! bolsillo-core: data model and collaborator seams for the Spanish
//! voice/text transaction parser.

pub mod category;
pub mod command;
pub mod error;
pub mod record;
pub mod services;

pub use category::{CategoryRecord, load_categories_json};
pub use command::{Currency, ParsedCommand, TransactionType};
pub use error::CoreError;
pub use record::TransactionRecord;
pub use services::{
    CategoryRegistry, FixedRates, MemorySink, RateSupplier, StaticCategories, TransactionSink,
    to_usd,
};
