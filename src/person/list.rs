//! Endpoints for reading people and their transactions.

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
    person::{PersonDto, get_all_people, get_person},
    transaction::{TransactionDto, get_transactions_by_person},
};

/// The state needed for reading people.
#[derive(Debug, Clone)]
pub struct PeopleQueryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PeopleQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every person.
pub async fn list_people_endpoint(
    State(state): State<PeopleQueryState>,
) -> Result<Json<Vec<PersonDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let people = get_all_people(&connection)?;

    Ok(Json(people.into_iter().map(PersonDto::from).collect()))
}

/// Get a single person.
pub async fn get_person_endpoint(
    Path(person_id): Path<PersonId>,
    State(state): State<PeopleQueryState>,
) -> Result<Json<PersonDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let person = get_person(person_id, &connection)?;

    Ok(Json(person.into()))
}

/// List the transactions registered by a person.
///
/// Responds with 404 if the person does not exist, rather than an empty list.
pub async fn list_person_transactions_endpoint(
    Path(person_id): Path<PersonId>,
    State(state): State<PeopleQueryState>,
) -> Result<Json<Vec<TransactionDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    get_person(person_id, &connection)?;
    let transactions = get_transactions_by_person(person_id, &connection)?;

    Ok(Json(
        transactions.into_iter().map(TransactionDto::from).collect(),
    ))
}
