use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use solobooks::{Transaction, TransactionKind, create_transaction, initialize_db};

/// A utility for creating a database populated with demo data.
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

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Seeding a year of demo transactions...");

    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for months_ago in (0..12).rev() {
        // Roughly one month per step. Exact month boundaries do not matter
        // for demo data.
        let month_start = today - Duration::days(months_ago * 30 + 27);

        create_transaction(
            Transaction::build(3200.0, month_start, TransactionKind::Income)
                .description("Client retainer"),
            &conn,
        )?;
        create_transaction(
            Transaction::build(850.0, month_start + Duration::days(9), TransactionKind::Income)
                .description("One-off project"),
            &conn,
        )?;

        create_transaction(
            Transaction::build(120.0, month_start + Duration::days(2), TransactionKind::Expense)
                .category(Some("Software".to_owned()))
                .description("SaaS subscriptions"),
            &conn,
        )?;
        create_transaction(
            Transaction::build(450.0, month_start + Duration::days(5), TransactionKind::Expense)
                .category(Some("Office".to_owned()))
                .description("Co-working space"),
            &conn,
        )?;
        create_transaction(
            Transaction::build(65.5, month_start + Duration::days(14), TransactionKind::Expense)
                .category(Some("Travel".to_owned()))
                .description("Client visit"),
            &conn,
        )?;

        count += 5;
    }

    println!("Success! Created {count} transactions.");

    Ok(())
}
