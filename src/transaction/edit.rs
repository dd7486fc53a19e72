//! Transaction update endpoint.

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
    transaction::{
        TransactionDto,
        create::{check_transaction, read_request},
        get_transaction, update_transaction,
    },
};

/// The state needed for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace every field of a transaction.
///
/// The new values are validated exactly like a new transaction, once the
/// transaction is known to exist.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<UpdateTransactionEndpointState>,
    Json(transaction): Json<TransactionDto>,
) -> Result<Json<TransactionDto>, Error> {
    let new_values = read_request(transaction)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    get_transaction(transaction_id, &sql_transaction).map_err(|error| match error {
        Error::NotFound => Error::UpdateMissingTransaction,
        error => error,
    })?;
    check_transaction(&new_values, &sql_transaction)?;
    let transaction = update_transaction(transaction_id, new_values, &sql_transaction)?;
    sql_transaction.commit()?;

    Ok(Json(transaction.into()))
}
