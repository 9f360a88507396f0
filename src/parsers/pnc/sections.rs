//! Section tracking for the statement's flat text stream.
//!
//! The extracted text has no structural markup; the only way to know which
//! category a row belongs to is the literal marker phrases the bank prints
//! between sections, plus the column header repeated after a page break.

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns;
use super::types::StatementTotals;
use crate::types::Category;

/// Marker phrases delimiting statement sections.
///
/// The bank's template wording drifts across months, so the literal set is
/// swappable rather than hard-coded. [`SectionMarkers::default`] carries the
/// Virtual Wallet wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMarkers {
    /// Exact line preceding the balance summary figures.
    pub totals_anchor: String,
    pub deposits: String,
    pub checks: String,
    pub check_gap: String,
    pub deductions: String,
    pub online_deductions: String,
    pub other_deductions: String,
    pub end_of_transactions: String,
    pub page_continued: String,
    pub column_header: String,
    /// Phrases that can never be part of a transaction description.
    pub reserved: Vec<String>,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        SectionMarkers {
            totals_anchor: "balance".into(),
            deposits: "Deposits and Other Additions There were".into(),
            checks: "Checks and Substitute Checks".into(),
            check_gap: "Gap in check sequence".into(),
            deductions: "Banking/Debit Card Withdrawals and Purchases There were".into(),
            online_deductions: "Banking Deductions totaling".into(),
            other_deductions: "Other Deductions There were".into(),
            end_of_transactions: "Daily Balance Detail".into(),
            page_continued: "continued on next page".into(),
            column_header: "Date Amount Description".into(),
            reserved: vec![
                "Deposits and Other Additions".into(),
                "Checks and Substitute Checks".into(),
                "Banking/Debit Card Withdrawals and Purchases".into(),
                "Online and Electronic Banking Deductions".into(),
                "Other Deductions".into(),
                "Daily Balance Detail".into(),
                "continued on next page".into(),
                "Date Amount Description".into(),
            ],
        }
    }
}

impl SectionMarkers {
    /// True when the line can never be a continuation of a description.
    pub(super) fn is_reserved(&self, line: &str) -> bool {
        self.reserved.iter().any(|phrase| line.contains(phrase))
    }
}

/// Sections whose rows can spill over a page break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Section {
    Deposits,
    Deductions,
    OnlineDeductions,
}

impl Section {
    fn resume(self) -> ParseState {
        match self {
            Section::Deposits => ParseState::ReadingDeposits,
            Section::Deductions => ParseState::ReadingDeductions,
            Section::OnlineDeductions => ParseState::ReadingOnlineDeductions,
        }
    }
}

/// Scanner position in the statement's section sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParseState {
    NotStarted,
    LocatingTotals,
    LocatingDeposits,
    ReadingDeposits,
    ReadingChecks,
    LocatingDeductions,
    ReadingDeductions,
    ReadingOnlineDeductions,
    ReadingOtherDeductions,
    PageBreak(Section),
    Done,
}

/// Walks the line stream and answers, per line, which category the line
/// should be offered under. Marker and header lines are consumed here and
/// never reach the row recognizer.
#[derive(Debug)]
pub(super) struct SectionTracker {
    state: ParseState,
    markers: SectionMarkers,
    totals: Option<StatementTotals>,
}

impl SectionTracker {
    pub(super) fn new(markers: SectionMarkers) -> Self {
        SectionTracker {
            state: ParseState::NotStarted,
            markers,
            totals: None,
        }
    }

    pub(super) fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    pub(super) fn totals(&self) -> Option<&StatementTotals> {
        self.totals.as_ref()
    }

    pub(super) fn markers(&self) -> &SectionMarkers {
        &self.markers
    }

    /// Advance past `line`, returning the category it should be offered
    /// under, or `None` when the tracker consumed it.
    ///
    /// The end-of-transactions marker wins over everything, including
    /// page-break sub-states.
    pub(super) fn offer(&mut self, line: &str) -> Result<Option<Category>, String> {
        if line.contains(&self.markers.end_of_transactions) {
            info!("Processing complete!");
            self.state = ParseState::Done;
            return Ok(None);
        }

        match self.state {
            ParseState::NotStarted => {
                if line == self.markers.totals_anchor {
                    self.state = ParseState::LocatingTotals;
                }
                Ok(None)
            }
            ParseState::LocatingTotals => {
                // the only place totals are ever set
                if patterns::totals_re().is_match(line) {
                    self.totals = Some(Self::parse_totals(line)?);
                    self.state = ParseState::LocatingDeposits;
                }
                Ok(None)
            }
            ParseState::LocatingDeposits => {
                if line.contains(&self.markers.deposits) {
                    info!("Begin deposit lookup...");
                    self.state = ParseState::ReadingDeposits;
                }
                Ok(None)
            }
            ParseState::ReadingDeposits => {
                if line.contains(&self.markers.page_continued) {
                    self.state = ParseState::PageBreak(Section::Deposits);
                    Ok(None)
                } else if line.contains(&self.markers.checks) {
                    info!("End deposit section, begin check lookup...");
                    self.state = ParseState::ReadingChecks;
                    Ok(None)
                } else {
                    Ok(Some(Category::Deposit))
                }
            }
            ParseState::ReadingChecks => {
                if line.contains(&self.markers.check_gap) {
                    info!("End check section, begin deduction lookup...");
                    self.state = ParseState::LocatingDeductions;
                    Ok(None)
                } else {
                    Ok(Some(Category::Check))
                }
            }
            ParseState::LocatingDeductions => {
                if line.contains(&self.markers.deductions) {
                    self.state = ParseState::ReadingDeductions;
                }
                Ok(None)
            }
            ParseState::ReadingDeductions => {
                if line.contains(&self.markers.page_continued) {
                    self.state = ParseState::PageBreak(Section::Deductions);
                    Ok(None)
                } else if line.contains(&self.markers.online_deductions) {
                    info!("Begin online deduction lookup...");
                    self.state = ParseState::ReadingOnlineDeductions;
                    Ok(None)
                } else {
                    Ok(Some(Category::Deduction))
                }
            }
            ParseState::ReadingOnlineDeductions => {
                if line.contains(&self.markers.page_continued) {
                    self.state = ParseState::PageBreak(Section::OnlineDeductions);
                    Ok(None)
                } else if line.contains(&self.markers.other_deductions) {
                    info!("Begin other deduction lookup...");
                    self.state = ParseState::ReadingOtherDeductions;
                    Ok(None)
                } else {
                    Ok(Some(Category::Deduction))
                }
            }
            ParseState::ReadingOtherDeductions => Ok(Some(Category::Deduction)),
            ParseState::PageBreak(section) => {
                if line.contains(&self.markers.column_header) {
                    self.state = section.resume();
                }
                Ok(None)
            }
            ParseState::Done => Ok(None),
        }
    }

    fn parse_totals(line: &str) -> Result<StatementTotals, String> {
        let figures: Vec<Decimal> = line
            .split_whitespace()
            .map(patterns::parse_money)
            .collect::<Result<_, _>>()?;

        match figures.as_slice() {
            [opening_balance, deposits, deductions, closing_balance] => Ok(StatementTotals {
                opening_balance: *opening_balance,
                deposits: *deposits,
                deductions: *deductions,
                closing_balance: *closing_balance,
            }),
            _ => Err(format!("Totals line does not carry four figures: '{line}'")),
        }
    }
}
