//! Expenses and income registered by the household.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its amount and kind
//! - Database functions for storing and querying transactions
//! - The endpoints for creating, reading, updating and deleting transactions

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, delete_transactions,
    get_all_transactions, get_transaction, get_transactions_by_category,
    get_transactions_by_person, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{Amount, NewTransaction, Transaction, TransactionDto, TransactionKind};
pub use edit::update_transaction_endpoint;
pub use list::{get_transaction_endpoint, list_transactions_endpoint};

#[cfg(test)]
pub use domain::InvalidKindCode;
