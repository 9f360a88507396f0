use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::StatementDate;
use crate::types::Category;

/// One transaction row as recognized in the statement text, before
/// conversion into the canonical [`crate::Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PncTransaction {
    pub date: StatementDate,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

impl PncTransaction {
    /// Check rows synthesize their description from the check number and
    /// reference code; the statement prints no free text for them.
    pub(super) fn check(
        date: StatementDate,
        amount: Decimal,
        check_number: &str,
        reference: &str,
    ) -> Self {
        PncTransaction {
            date,
            category: Category::Check,
            amount,
            description: format!("Check number: {check_number} [ref:{reference}]"),
        }
    }

    /// Merge a trailing continuation line into the description.
    pub(super) fn push_continuation(&mut self, text: &str) {
        self.description.push(' ');
        self.description.push_str(text);
    }
}
