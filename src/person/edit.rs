//! Person update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    database_id::PersonId,
    person::{NewPerson, PersonDto, update_person},
};

/// The state needed for updating a person.
#[derive(Debug, Clone)]
pub struct UpdatePersonEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdatePersonEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace a person's name and age.
///
/// Existing transactions are left as they are, even if the new age would not
/// allow them to be registered today.
pub async fn update_person_endpoint(
    Path(person_id): Path<PersonId>,
    State(state): State<UpdatePersonEndpointState>,
    Json(person): Json<PersonDto>,
) -> Result<Json<PersonDto>, Error> {
    let new_person = NewPerson::try_from(person)?;

    let connection = lock_connection(&state.db_connection)?;
    let person = update_person(person_id, new_person, &connection)?;

    Ok(Json(person.into()))
}
