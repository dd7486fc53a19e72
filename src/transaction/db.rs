//! Database operations for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::{CategoryId, PersonId, TransactionId},
    transaction::{NewTransaction, Transaction},
};

/// Create a transaction and return it with its generated ID.
///
/// This function does not check the transaction's business rules, callers
/// must validate the transaction first.
///
/// # Errors
/// Returns [Error::InvalidReference] if the person or category does not exist.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (description, amount, kind, person_id, category_id)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            &new_transaction.description,
            new_transaction.amount,
            new_transaction.kind,
            new_transaction.person_id,
            new_transaction.category_id,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(new_transaction.with_id(id))
}

/// Retrieve a single transaction by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no transaction with `transaction_id`.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, person_id, category_id
            FROM \"transaction\" WHERE id = :id;",
        )?
        .query_row(&[(":id", &transaction_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all transactions in the order they were created.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, person_id, category_id
            FROM \"transaction\" ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the transactions registered by a person.
pub fn get_transactions_by_person(
    person_id: PersonId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, person_id, category_id
            FROM \"transaction\" WHERE person_id = :person_id ORDER BY id ASC;",
        )?
        .query_map(&[(":person_id", &person_id)], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the transactions classified under a category.
pub fn get_transactions_by_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, person_id, category_id
            FROM \"transaction\" WHERE category_id = :category_id ORDER BY id ASC;",
        )?
        .query_map(&[(":category_id", &category_id)], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Replace every field of a transaction. Returns an error if the transaction
/// doesn't exist.
///
/// As with [create_transaction], the new values must be validated first.
pub fn update_transaction(
    transaction_id: TransactionId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
        SET description = ?1, amount = ?2, kind = ?3, person_id = ?4, category_id = ?5
        WHERE id = ?6",
        (
            &transaction.description,
            transaction.amount,
            transaction.kind,
            transaction.person_id,
            transaction.category_id,
            transaction_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(transaction.with_id(transaction_id))
}

/// Delete a transaction by ID. Returns an error if the transaction doesn't exist.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1",
        [transaction_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Delete the given transactions, returning how many were removed.
pub fn delete_transactions(
    transaction_ids: &[TransactionId],
    connection: &Connection,
) -> Result<usize, Error> {
    let mut statement = connection.prepare("DELETE FROM \"transaction\" WHERE id = ?1")?;
    let mut rows_affected = 0;

    for transaction_id in transaction_ids {
        rows_affected += statement.execute([transaction_id])?;
    }

    Ok(rows_affected)
}

/// Initialize the transaction table and indexes.
///
/// The person and category tables must exist first. People and categories
/// cannot be deleted at the database level while they are still referenced.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            kind INTEGER NOT NULL CHECK (kind IN (0, 1)),
            person_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            FOREIGN KEY(person_id) REFERENCES person(id) ON UPDATE CASCADE ON DELETE RESTRICT,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_person_id ON \"transaction\"(person_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_category_id ON \"transaction\"(category_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        kind: row.get(3)?,
        person_id: row.get(4)?,
        category_id: row.get(5)?,
    })
}
