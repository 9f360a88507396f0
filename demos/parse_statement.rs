use pnc_statement_rs::ParserBuilder;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Usage: parse_statement <Statement_Mmm_DD_YYYY.txt>");
        println!("Convert the PDF statement to text first (e.g. pdftotext).");
        return Ok(());
    };

    let content = std::fs::read_to_string(file_path)?;

    let statement = ParserBuilder::new()
        .content(&content)
        .filename(file_path)
        .parse_statement()?;

    if let Some(period) = statement.period {
        println!("Statement period: {} to {}\n", period.from, period.to);
    }

    println!("Found {} transactions\n", statement.transactions.len());

    for (i, tx) in statement.transactions.iter().take(10).enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", tx.date);
        println!("  Amount: {}", tx.amount);
        println!("  Category: {:?}", tx.category);
        println!("  Description: {}", tx.description);
        println!();
    }

    if statement.transactions.len() > 10 {
        println!("... and {} more transactions", statement.transactions.len() - 10);
    }

    for diagnostic in &statement.diagnostics {
        println!("[{:?}] {}", diagnostic.severity, diagnostic.message);
    }

    Ok(())
}
