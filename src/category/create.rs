//! Category creation endpoint.

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
    category::{CategoryDto, NewCategory, create_category},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category. Responds with the stored category and its new ID.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Json(category): Json<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), Error> {
    let new_category = NewCategory::try_from(category)?;

    let connection = lock_connection(&state.db_connection)?;
    let category = create_category(new_category, &connection)?;
    tracing::debug!("created category {}", category.id);

    Ok((StatusCode::CREATED, Json(category.into())))
}
