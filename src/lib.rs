//! Parse bank transaction history from the text of PNC account statements.
//!
//! ```rust,ignore
//! use pnc_statement_rs::ParserBuilder;
//!
//! let transactions = ParserBuilder::new()
//!     .content(&statement_text)
//!     .parse()?;
//! ```

mod builder;
mod types;

pub mod errors;
pub mod export;
pub mod parsers;

pub use builder::{FileFormat, ParsedTransaction, ParserBuilder};
pub use parsers::prelude::*;
pub use types::{Category, Transaction};
