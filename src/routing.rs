//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, list_category_transactions_endpoint, update_category_endpoint,
    },
    endpoints,
    error::ErrorBody,
    person::{
        create_person_endpoint, delete_person_endpoint, get_person_endpoint, list_people_endpoint,
        list_person_transactions_endpoint, update_person_endpoint,
    },
    totals::get_totals_report,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(
            endpoints::PEOPLE,
            get(list_people_endpoint).post(create_person_endpoint),
        )
        .route(
            endpoints::PERSON,
            get(get_person_endpoint)
                .put(update_person_endpoint)
                .delete(delete_person_endpoint),
        )
        .route(
            endpoints::PERSON_TRANSACTIONS,
            get(list_person_transactions_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::CATEGORY_TRANSACTIONS,
            get(list_category_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::TOTALS, get(get_totals_report))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "no such endpoint".to_owned(),
        }),
    )
        .into_response()
}
