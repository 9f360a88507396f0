use std::fs;

use crate::{errors::StatementParseError, parsers::prelude::*, types::Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParsedTransaction {
    Pnc(PncTransaction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "pnc")]
    Pnc,
}

impl FileFormat {
    fn parse_raw(
        &self,
        content: &str,
        markers: SectionMarkers,
    ) -> Result<Vec<ParsedTransaction>, StatementParseError> {
        match self {
            FileFormat::Pnc => {
                let statement = PncParser::parse_statement_with(content, markers)
                    .map_err(StatementParseError::ParseFailed)?;
                Ok(statement
                    .transactions
                    .into_iter()
                    .map(ParsedTransaction::Pnc)
                    .collect())
            }
        }
    }

    fn parse<T>(
        &self,
        content: &str,
        markers: SectionMarkers,
    ) -> Result<Vec<T>, StatementParseError>
    where
        T: TryFrom<ParsedTransaction, Error = StatementParseError>,
    {
        self.parse_raw(content, markers)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    fn detect(filename: Option<&str>, content: Option<&str>) -> Result<Self, StatementParseError> {
        if let Some(content) = content {
            if PncParser::is_supported(filename, content) {
                return Ok(FileFormat::Pnc);
            }
        }

        if let Some(filename) = filename {
            if PncParser::is_supported(Some(filename), "") {
                return Ok(FileFormat::Pnc);
            }
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    markers: Option<SectionMarkers>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Override the section marker set, for statement template revisions
    /// whose wording has drifted.
    pub fn markers(mut self, markers: SectionMarkers) -> Self {
        self.markers = Some(markers);
        self
    }

    pub fn parse(self) -> Result<Vec<Transaction>, StatementParseError> {
        self.parse_into::<Transaction>()
    }

    pub fn parse_into<T>(self) -> Result<Vec<T>, StatementParseError>
    where
        T: TryFrom<ParsedTransaction, Error = StatementParseError>,
    {
        let format = self.format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(
                self.filepath.as_deref(),
                self.content.as_deref(),
            ))?;

        let markers = self.markers.unwrap_or_default();

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .ok_or(StatementParseError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        format.parse(&content, markers)
    }

    /// Full scan result: transactions plus period, totals and diagnostics.
    pub fn parse_statement(self) -> Result<PncStatement, StatementParseError> {
        let FileFormat::Pnc = self.format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(
                self.filepath.as_deref(),
                self.content.as_deref(),
            ))?;

        let markers = self.markers.unwrap_or_default();

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .ok_or(StatementParseError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        PncParser::parse_statement_with(&content, markers)
            .map_err(StatementParseError::ParseFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_PNC: &str = "\
Virtual Wallet With Performance Spend
StatementPNC Bank
For the period 07/24/2024 to08/22/2024 Number of enclosures: 0
balance
146.84 205.00 1,805.55 5.50-
Deposits and Other Additions There were 2 Deposits and Other
07/25 200.00 ATM Deposit 123 Street Rd Town
ST
08/22 5.00 Other Fin Inst ATM Surcharge Reimb
Checks and Substitute Checks
156 200.00 07/24 012345678 157 500.00 08/05 9876543210
* Gap in check sequence There were 2 checks listed totaling
Banking/Debit Card Withdrawals and Purchases There were 2
07/29 5.00 1234 Debit Card Purchase Wendell 155
Town ST
07/29 1,100.55 1234 Debit Card Purchase Wm Supercenter
#1234
Daily Balance Detail
Member FDIC
";

    #[test]
    fn test_builder_missing_content() {
        let result: Result<Vec<Transaction>, _> = ParserBuilder::new().parse();
        assert!(matches!(result, Err(StatementParseError::UnsupportedFormat)));
    }

    #[test]
    fn test_builder_new() {
        let builder = ParserBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.format.is_none());
        assert!(builder.markers.is_none());
    }

    #[test]
    fn test_builder_content() {
        let builder = ParserBuilder::new().content("test content");
        assert_eq!(builder.content.unwrap(), "test content");
    }

    #[test]
    fn test_builder_filename() {
        let builder = ParserBuilder::new().filename("Statement_Jan_24_2024.txt");
        assert_eq!(builder.filepath.unwrap(), "Statement_Jan_24_2024.txt");
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ParserBuilder::new()
            .content("content")
            .filename("Statement_Jan_24_2024.txt")
            .format(FileFormat::Pnc)
            .markers(SectionMarkers::default());

        assert!(builder.content.is_some());
        assert!(builder.filepath.is_some());
        assert!(builder.format.is_some());
        assert!(builder.markers.is_some());
    }

    #[rstest]
    #[case(Some(FileFormat::Pnc), None, "Explicit format")]
    #[case(None, None, "Auto-detect by content")]
    #[case(None, Some("Statement_Aug_22_2024.txt"), "Auto-detect by filename")]
    fn test_parse_with_different_detection_methods(
        #[case] format: Option<FileFormat>,
        #[case] filename: Option<&str>,
        #[case] _description: &str,
    ) {
        let mut builder = ParserBuilder::new().content(SAMPLE_PNC);

        if let Some(fmt) = format {
            builder = builder.format(fmt);
        }
        if let Some(fname) = filename {
            builder = builder.filename(fname);
        }

        let result = builder.parse();
        assert!(result.is_ok());

        let transactions = result.unwrap();
        assert_eq!(transactions.len(), 6);
        assert_eq!(transactions[0].amount, Decimal::from_str("200.00").unwrap());
    }

    #[test]
    fn test_parse_unsupported_format() {
        let result = ParserBuilder::new()
            .content("random content that's not a statement")
            .parse();

        assert!(matches!(result, Err(StatementParseError::UnsupportedFormat)));
    }

    #[test]
    fn test_parse_no_content_no_filepath() {
        let result = ParserBuilder::new()
            .format(FileFormat::Pnc)
            .parse();

        assert!(matches!(
            result,
            Err(StatementParseError::MissingContentAndFilepath)
        ));
    }

    #[test]
    fn test_parse_statement_carries_diagnostics() {
        let statement = ParserBuilder::new()
            .content(SAMPLE_PNC)
            .parse_statement()
            .unwrap();

        assert_eq!(statement.transactions.len(), 6);
        assert!(!statement.has_warnings());
        assert!(statement.period.is_some());
        assert_eq!(
            statement.totals.unwrap().deposits,
            Decimal::from_str("205.00").unwrap()
        );
    }

    #[test]
    fn test_parse_raw_to_pnc_transaction() {
        let result = FileFormat::Pnc.parse_raw(SAMPLE_PNC, SectionMarkers::default());

        assert!(result.is_ok());
        let parsed = result.unwrap();
        assert_eq!(parsed.len(), 6);

        match &parsed[0] {
            ParsedTransaction::Pnc(txn) => {
                assert_eq!(txn.category, crate::types::Category::Deposit);
                assert_eq!(txn.amount, Decimal::from_str("200.00").unwrap());
            }
        }
    }

    #[test]
    fn test_parse_into_transaction() {
        let result = ParserBuilder::new()
            .content(SAMPLE_PNC)
            .format(FileFormat::Pnc)
            .parse_into::<Transaction>();

        assert!(result.is_ok());
        let transactions = result.unwrap();
        assert_eq!(transactions.len(), 6);
        assert_eq!(transactions[5].description, "1234 Debit Card Purchase Wm Supercenter #1234");
    }

    #[rstest]
    #[case(None, Some(SAMPLE_PNC), true)] // detect by content
    #[case(Some("Statement_Jan_24_2024.txt"), None, true)] // detect by filename
    #[case(Some("Statement_Jan_24_2024.txt"), Some(SAMPLE_PNC), true)]
    #[case(Some("statement.qfx"), Some("<OFX>"), false)] // other formats unsupported
    #[case(None, None, false)]
    #[case(Some("statement.txt"), Some("not a bank statement"), false)]
    fn test_file_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: Option<&str>,
        #[case] should_succeed: bool,
    ) {
        let result = FileFormat::detect(filename, content);
        if should_succeed {
            assert_eq!(result.unwrap(), FileFormat::Pnc);
        } else {
            assert!(matches!(result, Err(StatementParseError::UnsupportedFormat)));
        }
    }

    #[test]
    fn test_file_format_serialization() {
        let format = FileFormat::Pnc;
        let json = serde_json::to_string(&format).unwrap();
        assert!(json.contains("pnc"));

        let deserialized: FileFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, FileFormat::Pnc);
    }

    #[test]
    fn test_parsed_transaction_serialization() {
        let parsed = FileFormat::Pnc
            .parse_raw(SAMPLE_PNC, SectionMarkers::default())
            .unwrap()
            .remove(0);

        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("ATM Deposit"));

        let deserialized: ParsedTransaction = serde_json::from_str(&json).unwrap();
        match deserialized {
            ParsedTransaction::Pnc(txn) => {
                assert_eq!(txn.description, "ATM Deposit 123 Street Rd Town ST");
            }
        }
    }
}
