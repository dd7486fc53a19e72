//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::delete_category,
    database_id::CategoryId,
    deletion::can_delete_category,
    transaction::get_transactions_by_category,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a category that no transaction refers to.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryEndpointState>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    let transactions = get_transactions_by_category(category_id, &sql_transaction)?;

    if !can_delete_category(category_id, &transactions) {
        return Err(Error::CategoryInUse(transactions.len()));
    }

    delete_category(category_id, &sql_transaction)?;
    sql_transaction.commit()?;

    Ok(StatusCode::NO_CONTENT)
}
