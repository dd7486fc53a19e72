//! Endpoints for reading transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    database_id::TransactionId,
    transaction::{TransactionDto, get_all_transactions, get_transaction},
};

/// The state needed for reading transactions.
#[derive(Debug, Clone)]
pub struct TransactionsQueryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every transaction in the order they were created.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionsQueryState>,
) -> Result<Json<Vec<TransactionDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(
        transactions.into_iter().map(TransactionDto::from).collect(),
    ))
}

/// Get a single transaction.
pub async fn get_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionsQueryState>,
) -> Result<Json<TransactionDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let transaction = get_transaction(transaction_id, &connection)?;

    Ok(Json(transaction.into()))
}
