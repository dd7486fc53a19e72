//! Category update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{CategoryDto, NewCategory, update_category},
    database_id::CategoryId,
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace a category's description and purpose.
///
/// Transactions already filed under the category are not checked against the
/// new purpose.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryEndpointState>,
    Json(category): Json<CategoryDto>,
) -> Result<Json<CategoryDto>, Error> {
    let new_category = NewCategory::try_from(category)?;

    let connection = lock_connection(&state.db_connection)?;
    let category = update_category(category_id, new_category, &connection)?;

    Ok(Json(category.into()))
}
