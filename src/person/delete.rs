//! Person deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    database_id::PersonId,
    deletion::{DeletionDecision, DeletionPolicy, can_delete_person},
    person::delete_person,
    transaction::{delete_transactions, get_transactions_by_person},
};

/// The state needed for deleting a person.
#[derive(Debug, Clone)]
pub struct DeletePersonEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub deletion_policy: DeletionPolicy,
}

impl FromRef<AppState> for DeletePersonEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            deletion_policy: state.person_deletion_policy,
        }
    }
}

/// Delete a person.
///
/// A person with transactions is either kept (409) or deleted together with
/// their transactions, depending on the configured [DeletionPolicy].
pub async fn delete_person_endpoint(
    Path(person_id): Path<PersonId>,
    State(state): State<DeletePersonEndpointState>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    let transactions = get_transactions_by_person(person_id, &sql_transaction)?;

    match can_delete_person(person_id, &transactions, state.deletion_policy) {
        DeletionDecision::Allowed => {}
        DeletionDecision::Refused { dependents } => {
            return Err(Error::PersonHasTransactions(dependents));
        }
        DeletionDecision::Cascade { transactions } => {
            let deleted = delete_transactions(&transactions, &sql_transaction)?;
            tracing::info!("deleted {deleted} transaction(s) of person {person_id}");
        }
    }

    delete_person(person_id, &sql_transaction)?;
    sql_transaction.commit()?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod delete_person_endpoint_tests {
    use axum::http::StatusCode;

    use crate::{
        category::Purpose,
        deletion::DeletionPolicy,
        endpoints::{self, format_endpoint},
        error::ErrorBody,
        person::find_person,
        test_utils::{
            get_test_server, get_test_state, get_test_state_with_policy, insert_category,
            insert_person, insert_transaction,
        },
        transaction::{TransactionKind, get_all_transactions},
    };

    #[tokio::test]
    async fn delete_person_without_transactions_succeeds() {
        let state = get_test_state();
        let person = insert_person(&state, "Ana", 30);
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::PERSON, person.id))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(
            find_person(person.id, &state.db_connection.lock().unwrap()),
            Ok(None)
        );
    }

    #[tokio::test]
    async fn delete_missing_person_is_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.delete(&format_endpoint(endpoints::PERSON, 5)).await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn refuse_policy_keeps_person_with_transactions() {
        let state = get_test_state_with_policy(DeletionPolicy::Refuse);
        let person = insert_person(&state, "Ana", 30);
        let misc = insert_category(&state, "Misc", Purpose::Both);
        insert_transaction(&state, &person, &misc, TransactionKind::Expense, 3);
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::PERSON, person.id))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<ErrorBody>().error,
            "cannot delete person: they have 1 transaction(s)"
        );
        let connection = state.db_connection.lock().unwrap();
        assert!(find_person(person.id, &connection).unwrap().is_some());
        assert_eq!(get_all_transactions(&connection).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cascade_policy_deletes_person_and_their_transactions() {
        let state = get_test_state_with_policy(DeletionPolicy::Cascade);
        let ana = insert_person(&state, "Ana", 30);
        let bia = insert_person(&state, "Bia", 30);
        let misc = insert_category(&state, "Misc", Purpose::Both);
        insert_transaction(&state, &ana, &misc, TransactionKind::Expense, 3);
        insert_transaction(&state, &ana, &misc, TransactionKind::Income, 8);
        let kept = insert_transaction(&state, &bia, &misc, TransactionKind::Income, 1);
        let server = get_test_server(state.clone());

        let response = server
            .delete(&format_endpoint(endpoints::PERSON, ana.id))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(find_person(ana.id, &connection), Ok(None));
        assert_eq!(get_all_transactions(&connection), Ok(vec![kept]));
    }
}
