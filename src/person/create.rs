//! Person creation endpoint.

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
    person::{NewPerson, PersonDto, create_person},
};

/// The state needed for creating a person.
#[derive(Debug, Clone)]
pub struct CreatePersonEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreatePersonEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Register a new person. Responds with the stored person and its new ID.
pub async fn create_person_endpoint(
    State(state): State<CreatePersonEndpointState>,
    Json(person): Json<PersonDto>,
) -> Result<(StatusCode, Json<PersonDto>), Error> {
    let new_person = NewPerson::try_from(person)?;

    let connection = lock_connection(&state.db_connection)?;
    let person = create_person(new_person, &connection)?;
    tracing::debug!("created person {}", person.id);

    Ok((StatusCode::CREATED, Json(person.into())))
}
