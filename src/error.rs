//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::Rejection;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a person's name.
    #[error("person name cannot be empty")]
    EmptyPersonName,

    /// A negative or out of range number was used as a person's age.
    #[error("age must be a non-negative whole number, got {0}")]
    InvalidAge(i64),

    /// An empty string was used as a category description.
    #[error("category description cannot be empty")]
    EmptyCategoryDescription,

    /// A negative number was used as a transaction amount.
    ///
    /// Whether money flows in or out is recorded by the transaction kind, so
    /// amounts are always zero or positive.
    #[error("amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),

    /// A transaction failed validation against the current people and
    /// categories.
    #[error("{0}")]
    TransactionRejected(Rejection),

    /// Tried to delete a category that is still used by transactions.
    #[error("cannot delete category: it is used by {0} transaction(s)")]
    CategoryInUse(usize),

    /// Tried to delete a person that still owns transactions while the
    /// refuse policy is active.
    #[error("cannot delete person: they have {0} transaction(s)")]
    PersonHasTransactions(usize),

    /// A write referenced a person or category that is not in the database.
    ///
    /// This is raised by the database foreign key checks, validation should
    /// catch these cases before the write is attempted.
    #[error("a referenced person or category does not exist")]
    InvalidReference,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a person that does not exist
    #[error("tried to update a person that is not in the database")]
    UpdateMissingPerson,

    /// Tried to delete a person that does not exist
    #[error("tried to delete a person that is not in the database")]
    DeleteMissingPerson,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// A sum of transaction amounts does not fit in a decimal number.
    #[error("the totals are too large to be represented")]
    TotalsOverflow,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::InvalidReference
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Error::TransactionRejected(rejection)
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A description of what went wrong that is safe to show to the client.
    pub error: String,
}

impl Error {
    /// The HTTP status code that the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyPersonName
            | Error::InvalidAge(_)
            | Error::EmptyCategoryDescription
            | Error::NegativeAmount(_)
            | Error::TransactionRejected(_)
            | Error::InvalidReference => StatusCode::BAD_REQUEST,
            Error::CategoryInUse(_) | Error::PersonHasTransactions(_) => StatusCode::CONFLICT,
            Error::NotFound
            | Error::UpdateMissingPerson
            | Error::DeleteMissingPerson
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::TotalsOverflow | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let error = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Faults are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(ErrorBody { error })).into_response()
    }
}
