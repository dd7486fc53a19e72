//! Shared helpers for tests.

use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    AppState, build_router,
    category::{Category, CategoryDescription, NewCategory, Purpose, create_category},
    deletion::DeletionPolicy,
    person::{NewPerson, Person, PersonName, create_person},
    transaction::{Amount, NewTransaction, Transaction, TransactionKind, create_transaction},
};

/// An app state backed by a fresh in-memory database that refuses to delete
/// people with transactions.
pub(crate) fn get_test_state() -> AppState {
    get_test_state_with_policy(DeletionPolicy::Refuse)
}

pub(crate) fn get_test_state_with_policy(policy: DeletionPolicy) -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, policy).expect("Could not initialize database")
}

/// A test server for the full router.
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

pub(crate) fn insert_person(state: &AppState, name: &str, age: u32) -> Person {
    create_person(
        NewPerson {
            name: PersonName::new_unchecked(name),
            age,
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test person")
}

pub(crate) fn insert_category(state: &AppState, description: &str, purpose: Purpose) -> Category {
    create_category(
        NewCategory {
            description: CategoryDescription::new_unchecked(description),
            purpose,
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test category")
}

pub(crate) fn insert_transaction(
    state: &AppState,
    person: &Person,
    category: &Category,
    kind: TransactionKind,
    amount: i64,
) -> Transaction {
    create_transaction(
        NewTransaction {
            description: String::new(),
            amount: Amount::new(Decimal::from(amount)).unwrap(),
            kind,
            person_id: person.id,
            category_id: category.id,
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test transaction")
}
