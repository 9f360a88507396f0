use std::fmt;

use crate::errors::StatementParseError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dto::PncTransaction;
use super::patterns;

/// A transaction date as printed on the statement: `MM/DD`, no year.
///
/// The year only appears in the period header, so resolving an entry to a
/// calendar date is a separate step ([`StatementDate::resolve_year`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatementDate(String);

impl StatementDate {
    /// Valida o formato `MM/DD` e devolve o par (mês, dia)
    pub fn month_day(&self) -> Result<(u32, u32), StatementParseError> {
        let s = self.0.trim();

        let (month, day) = s
            .split_once('/')
            .ok_or(StatementParseError::PncDateInvalidFormat)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(StatementParseError::PncDateInvalidFormat);
        }

        let month: u32 = month
            .parse()
            .map_err(|_| StatementParseError::PncDateInvalidFormat)?;
        let day: u32 = day
            .parse()
            .map_err(|_| StatementParseError::PncDateInvalidFormat)?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(StatementParseError::PncDateInvalidFormat);
        }

        Ok((month, day))
    }

    /// Resolve against a statement year. Fails on dates that do not exist
    /// in that year (e.g. `02/29` outside leap years).
    pub fn resolve_year(&self, year: i32) -> Result<NaiveDate, StatementParseError> {
        let (month, day) = self.month_day()?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or(StatementParseError::PncDateInvalidFormat)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<StatementDate> for String {
    fn from(date: StatementDate) -> Self {
        date.0
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Statement coverage period from the `For the period ...` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl StatementPeriod {
    /// Extract the period from a header line, if this is one.
    pub(super) fn from_header_line(line: &str) -> Option<Self> {
        let caps = patterns::period_re().captures(line)?;
        let from = NaiveDate::parse_from_str(&caps[1], "%m/%d/%Y").ok()?;
        let to = NaiveDate::parse_from_str(&caps[2], "%m/%d/%Y").ok()?;
        Some(StatementPeriod { from, to })
    }
}

/// The four figures of the balance summary line, in print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    pub opening_balance: Decimal,
    pub deposits: Decimal,
    pub deductions: Decimal,
    pub closing_balance: Decimal,
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// Scan diagnostic returned to the caller as a value; presentation is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub(crate) fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Everything one scan produces: the entry list in document order plus the
/// side-channel validation results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PncStatement {
    pub period: Option<StatementPeriod>,
    pub totals: Option<StatementTotals>,
    pub transactions: Vec<PncTransaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PncStatement {
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
