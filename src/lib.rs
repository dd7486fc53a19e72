//! Household Ledger is a web API for tracking a household's expenses and income.
//!
//! People in the household register transactions under categories. A
//! transaction is only stored if the person and category exist, if the
//! category's purpose allows the transaction's kind and if the person is old
//! enough to register income. The API reports income, expense and balance
//! totals for every person, every category and the whole household.
//!
//! This library provides a JSON REST API backed by SQLite.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod database_id;
mod db;
mod deletion;
mod endpoints;
mod error;
mod logging;
mod person;
mod routing;
mod totals;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryDescription, NewCategory, Purpose, create_category};
pub use db::initialize as initialize_db;
pub use deletion::{DeletionDecision, DeletionPolicy, can_delete_category, can_delete_person};
pub use error::{Error, ErrorBody};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use person::{NewPerson, Person, PersonName, create_person};
pub use routing::build_router;
pub use totals::{
    CategoryTotals, PersonTotals, Totals, TotalsReport, aggregate, aggregate_by_category,
    aggregate_by_person,
};
pub use transaction::{Amount, NewTransaction, Transaction, TransactionKind, create_transaction};
pub use validation::{
    Rejection, RejectionKind, ValidationResult, validate_against_snapshot, validate_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
