use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;

use household_ledger::{
    Amount, CategoryDescription, NewCategory, NewPerson, NewTransaction, PersonName, Purpose,
    TransactionKind, create_category, create_person, create_transaction, initialize_db,
};

/// A utility for creating a test database for the REST API server of household_ledger.
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
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating people...");
    let mut people = Vec::new();
    for (name, age) in [("Ana", 41), ("Bruno", 43), ("Duda", 15)] {
        let person = create_person(
            NewPerson {
                name: PersonName::new(name)?,
                age,
            },
            &conn,
        )?;
        people.push(person);
    }

    println!("Creating categories...");
    let mut categories = Vec::new();
    for (description, purpose) in [
        ("Salary", Purpose::IncomeOnly),
        ("Groceries", Purpose::ExpenseOnly),
        ("Gifts", Purpose::Both),
    ] {
        let category = create_category(
            NewCategory {
                description: CategoryDescription::new(description)?,
                purpose,
            },
            &conn,
        )?;
        categories.push(category);
    }

    println!("Creating transactions...");
    let transactions = [
        ("Monthly pay", "5200.00", TransactionKind::Income, 0, 0),
        ("Monthly pay", "4800.00", TransactionKind::Income, 1, 0),
        ("Supermarket", "612.35", TransactionKind::Expense, 0, 1),
        ("Bakery", "23.90", TransactionKind::Expense, 1, 1),
        ("Birthday present", "80.00", TransactionKind::Expense, 2, 2),
        ("Birthday money", "150.00", TransactionKind::Income, 1, 2),
    ];
    for (description, amount, kind, person, category) in transactions {
        create_transaction(
            NewTransaction {
                description: description.to_owned(),
                amount: Amount::new(Decimal::from_str(amount)?)?,
                kind,
                person_id: people[person].id,
                category_id: categories[category].id,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
