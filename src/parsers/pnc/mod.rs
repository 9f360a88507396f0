pub mod dto;
pub mod parser;
mod patterns;
pub mod sections;
pub mod types;

pub mod prelude {
    pub use super::dto::PncTransaction;
    pub use super::parser::PncParser;
    pub use super::sections::SectionMarkers;
    pub use super::types::{
        Diagnostic, PncStatement, Severity, StatementDate, StatementPeriod, StatementTotals,
    };
}
