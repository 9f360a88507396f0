//! Line patterns for the PNC statement text.
//!
//! The extracted statement is a flat token stream; these shapes are the only
//! structure available to tell transaction rows apart from surrounding prose.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// `MM/DD amount description...`: the shape of deposit and deduction rows.
///
/// The trailing space is part of the row shape: a dated amount with nothing
/// after it is a summary figure, not a transaction.
pub(super) fn transaction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{2}/\d{2} (\d{1,3}(,\d{3})*|\d*)\.\d{2} ").expect("transaction regex")
    })
}

/// Leading `checkNumber amount MM/DD` of a packed check row.
pub(super) fn check_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+ \d+\.\d{2} \d{2}/\d{2}").expect("check regex"))
}

/// The balance summary line: four monetary figures, each optionally
/// suffixed with `-` for negative.
pub(super) fn totals_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,3}(?:,\d{3})*\.\d{2}-?)(?: (\d{1,3}(?:,\d{3})*\.\d{2}-?)){3}$")
            .expect("totals regex")
    })
}

/// `For the period MM/DD/YYYY to MM/DD/YYYY`. Text extraction sometimes
/// drops the space after "to".
pub(super) fn period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"For the period (\d{2}/\d{2}/\d{4}) ?to ?(\d{2}/\d{2}/\d{4})")
            .expect("period regex")
    })
}

/// A whole monetary token, thousands separators allowed.
pub(super) fn amount_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,3}(,\d{3})*|\d+)\.\d{2}$").expect("amount regex"))
}

/// A whole `MM/DD` token.
pub(super) fn date_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}$").expect("date regex"))
}

/// Statement text files named the way the bank's download names them.
pub(super) fn statement_filename_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Statement_[A-Za-z]{3}_\d{1,2}_\d{4}\.txt$").expect("filename regex")
    })
}

/// Normalize a monetary token and parse it to a two-place [`Decimal`].
///
/// Thousands separators are stripped; a trailing `-` (the statement's
/// convention for negative figures) becomes a leading minus.
pub(super) fn parse_money(token: &str) -> Result<Decimal, String> {
    let mut cleaned = token.replace(',', "");
    if let Some(body) = cleaned.strip_suffix('-') {
        cleaned = format!("-{body}");
    }
    // sub-dollar figures print with no leading zero
    if let Some(body) = cleaned.strip_prefix('.') {
        cleaned = format!("0.{body}");
    }
    cleaned
        .parse::<Decimal>()
        .map(|amount| amount.round_dp(2))
        .map_err(|e| format!("Invalid amount '{token}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("200.00", "200.00")]
    #[case("1,805.55", "1805.55")]
    #[case("5.50-", "-5.50")]
    #[case("1,234,567.89", "1234567.89")]
    #[case(".00", "0.00")]
    fn test_parse_money(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(
            parse_money(token).unwrap(),
            Decimal::from_str(expected).unwrap()
        );
    }

    #[test]
    fn test_parse_money_rejects_garbage() {
        assert!(parse_money("not-a-number").is_err());
        // larger than any Decimal can hold
        assert!(parse_money("99999999999999999999999999999999.00").is_err());
    }

    #[rstest]
    #[case("07/25 200.00 ATM Deposit 123 Street Rd Town", true)]
    #[case("07/29 1,100.55 1234 Debit Card Purchase", true)]
    #[case("07/25 200.00", false)] // no trailing space, summary figure
    #[case("7/25 200.00 missing zero-pad", false)]
    #[case("ST", false)]
    #[case("Total Overdraft Fees .00 72.00", false)]
    fn test_transaction_re(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(transaction_re().is_match(line), expected);
    }

    #[rstest]
    #[case("146.84 205.00 1,805.55 5.50-", true)]
    #[case("146.84 205.00 1,805.55 5.50", true)]
    #[case("146.84 205.00 1,805.55", false)] // only three figures
    #[case("146.84 205.00 1,805.55 5.50- extra", false)]
    #[case("Total for this Period Total Year to Date", false)]
    fn test_totals_re(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(totals_re().is_match(line), expected);
    }

    #[rstest]
    #[case("156 200.00 07/24 012345678", true)]
    #[case("156 200.00 07/24 012345678 157 500.00 08/05 9876543210", true)]
    #[case("07/29 5.00 1234 Debit Card Purchase", false)]
    #[case("Checks and Substitute Checks", false)]
    fn test_check_re(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(check_re().is_match(line), expected);
    }

    #[rstest]
    #[case("For the period 07/24/2024 to08/22/2024 Number of enclosures: 0", true)]
    #[case("For the period 07/24/2024 to 08/22/2024", true)]
    #[case("For the period 07/24/2024", false)]
    fn test_period_re(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(period_re().is_match(line), expected);
    }

    #[rstest]
    #[case("Statement_Jan_24_2024.txt", true)]
    #[case("Statement_Aug_5_2024.txt", true)]
    #[case("Statement_Jan_24_2024.pdf", false)] // needs text extraction first
    #[case("statement.txt", false)]
    fn test_statement_filename_re(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(statement_filename_re().is_match(name), expected);
    }
}
