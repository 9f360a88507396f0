use pnc_statement_rs::export;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parses every Statement_Mmm_DD_YYYY.txt in the current directory
    let exported = export::export_directory(".", "parsed_transactions.csv")?;
    println!("Exported {exported} transactions to parsed_transactions.csv");
    Ok(())
}
