use crate::{builder::ParsedTransaction, errors::StatementParseError, parsers::prelude::*};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction category, matching the statement's section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Deposit,
    Deduction,
    Check,
}

impl Category {
    /// Uppercase tag used in tabular exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Deposit => "DEPOSIT",
            Category::Deduction => "DEDUCTION",
            Category::Check => "CHECK",
        }
    }
}

/// A single statement entry. Equality and hashing are structural over all
/// four fields.
///
/// `date` is the `MM/DD` string printed on the statement; entries carry no
/// year of their own (see [`StatementDate::resolve_year`] for resolution
/// against the statement period).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

impl Transaction {
    /// Amounts are fixed at two fraction digits on construction, never at
    /// aggregation time.
    pub fn new(
        date: impl Into<String>,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        let mut amount = amount.round_dp(2);
        amount.rescale(2);
        Transaction {
            date: date.into(),
            category,
            amount,
            description: description.into(),
        }
    }
}

impl TryFrom<ParsedTransaction> for Transaction {
    type Error = StatementParseError;

    fn try_from(parsed: ParsedTransaction) -> Result<Self, Self::Error> {
        match parsed {
            ParsedTransaction::Pnc(pnc) => pnc.try_into(),
        }
    }
}

impl TryFrom<PncTransaction> for Transaction {
    type Error = StatementParseError;

    fn try_from(stmt: PncTransaction) -> Result<Self, Self::Error> {
        stmt.date.month_day()?;
        Ok(Transaction::new(
            stmt.date,
            stmt.category,
            stmt.amount,
            stmt.description,
        ))
    }
}
