use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use finance_tracker::{
    Transaction, connect_db, count_transactions, create_transaction, get_summary, initialize_db,
};

/// A utility for creating a test database for the finance tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = connect_db(&args.output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let transactions = [
        Transaction::build(4200.0, "Salary", "income").description(Some("Monthly salary")),
        Transaction::build(150.0, "Freelance", "income"),
        Transaction::build(1450.0, "Rent", "expense").description(Some("Apartment")),
        Transaction::build(212.35, "Groceries", "expense"),
        Transaction::build(48.9, "Transport", "expense").description(Some("Bus pass")),
        Transaction::build(19.99, "Subscriptions", "expense"),
    ];

    for transaction in transactions {
        create_transaction(transaction, &conn)?;
    }

    let summary = get_summary(&conn)?;
    println!(
        "Created {} transactions: income {:.2}, expenses {:.2}, net {:.2}",
        count_transactions(&conn)?,
        summary.total_income,
        summary.total_expenses,
        summary.net_balance
    );

    println!("Success!");

    Ok(())
}
