use log::{info, warn};
use num_traits::Zero;
use rust_decimal::Decimal;

use super::dto::PncTransaction;
use super::patterns;
use super::sections::{SectionMarkers, SectionTracker};
use super::types::{Diagnostic, PncStatement, StatementPeriod};
use crate::parsers::traits::Parser;
use crate::types::Category;

pub struct PncParser;

impl Parser for PncParser {
    type Output = PncTransaction;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        if let Some(name) = filename {
            if patterns::statement_filename_re().is_match(name) {
                return true;
            }
        }

        content.contains("PNC Bank") || content.contains("Virtual Wallet")
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        Ok(Self::parse_statement(content)?.transactions)
    }
}

impl PncParser {
    /// Full scan: transactions plus the period header, the totals line and
    /// the validation diagnostics.
    pub fn parse_statement(content: &str) -> Result<PncStatement, String> {
        Self::parse_statement_with(content, SectionMarkers::default())
    }

    /// Scan with a caller-supplied marker set, for statement template
    /// revisions whose wording has drifted.
    pub fn parse_statement_with(
        content: &str,
        markers: SectionMarkers,
    ) -> Result<PncStatement, String> {
        let lines: Vec<&str> = content.lines().map(str::trim_end).collect();
        if lines.is_empty() {
            warn!("No data provided to parse!");
            return Ok(PncStatement::default());
        }

        let mut tracker = SectionTracker::new(markers);
        let mut transactions: Vec<PncTransaction> = Vec::new();
        let mut period: Option<StatementPeriod> = None;

        info!("Begin processing data...");
        let mut iter = lines.iter().copied().peekable();
        while let Some(line) = iter.next() {
            if period.is_none() {
                period = StatementPeriod::from_header_line(line);
            }

            let Some(category) = tracker.offer(line)? else {
                if tracker.is_done() {
                    break;
                }
                continue;
            };

            let lookahead = iter.peek().copied();
            match category {
                Category::Check => Self::recognize_checks(line, &mut transactions)?,
                Category::Deposit | Category::Deduction => Self::recognize_dated(
                    category,
                    line,
                    lookahead,
                    tracker.markers(),
                    &mut transactions,
                )?,
            }
        }

        let diagnostics = Self::validate_totals(&transactions, &tracker);
        Ok(PncStatement {
            period,
            totals: tracker.totals().copied(),
            transactions,
            diagnostics,
        })
    }

    /// A single physical line may pack several checks; each group of four
    /// tokens is `checkNumber amount MM/DD reference`. Lines whose token
    /// count is not a multiple of four, or with a malformed group, are
    /// skipped whole; no partial group is emitted.
    fn recognize_checks(line: &str, out: &mut Vec<PncTransaction>) -> Result<(), String> {
        if !patterns::check_re().is_match(line) {
            return Ok(());
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() % 4 != 0 {
            return Ok(());
        }
        if !tokens.chunks_exact(4).all(Self::check_group_shape) {
            return Ok(());
        }

        info!("Processing checks...");
        for group in tokens.chunks_exact(4) {
            let amount = patterns::parse_money(group[1])?;
            out.push(PncTransaction::check(group[2].into(), amount, group[0], group[3]));
        }
        Ok(())
    }

    fn check_group_shape(group: &[&str]) -> bool {
        let number_ok = !group[0].is_empty() && group[0].bytes().all(|b| b.is_ascii_digit());
        number_ok
            && patterns::amount_token_re().is_match(group[1])
            && patterns::date_token_re().is_match(group[2])
    }

    /// Deposit/deduction rows: `MM/DD amount description...`, with the
    /// following line merged into the description when it is neither a
    /// transaction row itself nor a reserved marker phrase. The merged line
    /// is still scanned on the next iteration.
    fn recognize_dated(
        category: Category,
        line: &str,
        lookahead: Option<&str>,
        markers: &SectionMarkers,
        out: &mut Vec<PncTransaction>,
    ) -> Result<(), String> {
        if !patterns::transaction_re().is_match(line) {
            return Ok(());
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut txn = PncTransaction {
            date: tokens[0].into(),
            category,
            amount: patterns::parse_money(tokens[1])?,
            description: tokens[2..].join(" "),
        };

        if let Some(next_line) = lookahead {
            let continues = !next_line.is_empty()
                && !patterns::transaction_re().is_match(next_line)
                && !markers.is_reserved(next_line);
            if continues {
                txn.push_continuation(next_line);
            }
        }

        out.push(txn);
        Ok(())
    }

    /// Cross-check the recognized amounts against the statement's own
    /// totals line. A mismatch is a diagnostic, never a scan failure.
    fn validate_totals(transactions: &[PncTransaction], tracker: &SectionTracker) -> Vec<Diagnostic> {
        let Some(totals) = tracker.totals() else {
            warn!("Could not parse total deduction/deposit amount. Possibly corrupted statement!");
            return vec![Diagnostic::warning(
                "No totals line found; amount validation skipped",
            )];
        };

        let sum_deductions = transactions
            .iter()
            .filter(|t| matches!(t.category, Category::Check | Category::Deduction))
            .fold(Decimal::zero(), |acc, t| acc + t.amount)
            .round_dp(2);
        let sum_deposits = transactions
            .iter()
            .filter(|t| t.category == Category::Deposit)
            .fold(Decimal::zero(), |acc, t| acc + t.amount)
            .round_dp(2);

        let mut diagnostics = Vec::new();
        if sum_deductions != totals.deductions {
            warn!(
                "Deduction totals differ; expected {}, got {}",
                totals.deductions, sum_deductions
            );
            diagnostics.push(Diagnostic::warning(format!(
                "Deductions total expected {}, got {}",
                totals.deductions, sum_deductions
            )));
        } else {
            diagnostics.push(Diagnostic::info(format!(
                "Deduction totals match: {sum_deductions}"
            )));
        }
        if sum_deposits != totals.deposits {
            warn!(
                "Deposit totals differ; expected {}, got {}",
                totals.deposits, sum_deposits
            );
            diagnostics.push(Diagnostic::warning(format!(
                "Deposits total expected {}, got {}",
                totals.deposits, sum_deposits
            )));
        } else {
            diagnostics.push(Diagnostic::info(format!(
                "Deposit totals match: {sum_deposits}"
            )));
        }
        diagnostics
    }
}
