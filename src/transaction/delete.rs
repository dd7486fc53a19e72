//! Transaction deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, app_state::lock_connection, database_id::TransactionId,
    transaction::delete_transaction,
};

/// The state needed for deleting a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a transaction. Transactions can always be deleted.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<DeleteTransactionEndpointState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;

    match delete_transaction(transaction_id, &connection) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(Error::DeleteMissingTransaction) => Err(Error::DeleteMissingTransaction),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting transaction {transaction_id}: {error}"
            );
            Err(error)
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Error,
        category::Purpose,
        endpoints::{self, format_endpoint},
        test_utils::{
            get_test_server, get_test_state, insert_category, insert_person, insert_transaction,
        },
        transaction::{TransactionKind, get_all_transactions},
    };

    use super::{DeleteTransactionEndpointState, delete_transaction_endpoint};

    #[tokio::test]
    async fn delete_transaction_succeeds() {
        let state = get_test_state();
        let ana = insert_person(&state, "Ana", 30);
        let misc = insert_category(&state, "Misc", Purpose::Both);
        let transaction = insert_transaction(&state, &ana, &misc, TransactionKind::Income, 7);
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(
            get_all_transactions(&state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
    }

    #[tokio::test]
    async fn delete_missing_transaction_returns_error() {
        let state = DeleteTransactionEndpointState {
            db_connection: get_test_state().db_connection,
        };

        let result = delete_transaction_endpoint(Path(999), State(state)).await;

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }
}
