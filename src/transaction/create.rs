//! Transaction creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::find_category,
    person::find_person,
    transaction::{NewTransaction, TransactionDto, create_transaction},
    validation::validate_transaction,
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Validate and store a new transaction.
///
/// Responds with 400 and the rejection reason if the person or category does
/// not exist, or if the transaction breaks one of the household's rules.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionEndpointState>,
    Json(transaction): Json<TransactionDto>,
) -> Result<(StatusCode, Json<TransactionDto>), Error> {
    let new_transaction = read_request(transaction)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    check_transaction(&new_transaction, &sql_transaction)?;
    let transaction = create_transaction(new_transaction, &sql_transaction)?;
    sql_transaction.commit()?;

    tracing::debug!("created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// Convert a request body into the values to store, trimming the description.
pub(super) fn read_request(transaction: TransactionDto) -> Result<NewTransaction, Error> {
    let mut new_values = NewTransaction::try_from(transaction)?;
    new_values.description = new_values.description.trim().to_owned();

    Ok(new_values)
}

/// Run [validate_transaction] against the people and categories in the
/// database, turning a rejection into [Error::TransactionRejected].
pub(super) fn check_transaction(
    candidate: &NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let result = validate_transaction(
        candidate,
        |person_id| find_person(person_id, connection),
        |category_id| find_category(category_id, connection),
    )?;

    result.into_result().map_err(|rejection| {
        tracing::debug!("rejected transaction: {rejection}");
        rejection.into()
    })
}
