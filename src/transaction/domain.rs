//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{CategoryId, PersonId, TransactionId},
};

/// Whether money left or entered the household.
///
/// The integer codes are stored in the database and sent over the wire, so
/// they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionKind {
    /// Money spent by the household.
    Expense,
    /// Money earned by the household.
    Income,
}

/// An integer that does not map to a [TransactionKind].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid transaction kind code, expected 0 (expense) or 1 (income)")]
pub struct InvalidKindCode(pub u8);

impl TransactionKind {
    /// The stable integer code for the kind.
    pub const fn code(self) -> u8 {
        match self {
            TransactionKind::Expense => 0,
            TransactionKind::Income => 1,
        }
    }
}

impl TryFrom<u8> for TransactionKind {
    type Error = InvalidKindCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TransactionKind::Expense),
            1 => Ok(TransactionKind::Income),
            other => Err(InvalidKindCode(other)),
        }
    }
}

impl From<TransactionKind> for u8 {
    fn from(kind: TransactionKind) -> Self {
        kind.code()
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Integer(i64::from(self.code()))))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = u8::column_result(value)?;

        TransactionKind::try_from(code).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A non-negative, exact amount of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::NegativeAmount] if `value` is less than zero.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(Error::NegativeAmount(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The amount as a decimal number.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Amounts are stored as text so that SQLite never rounds them through a float.
impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Text(self.0.to_string())))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        let decimal =
            Decimal::from_str(text).map_err(|error| FromSqlError::Other(Box::new(error)))?;

        Amount::new(decimal).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income registered by a person under a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Free text, may be empty.
    pub description: String,
    /// How much money changed hands.
    pub amount: Amount,
    /// Whether the money was spent or earned.
    pub kind: TransactionKind,
    /// The person who registered the transaction.
    pub person_id: PersonId,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
}

/// A transaction that has not been written to the database yet.
///
/// Both new transactions and replacement values for existing transactions are
/// expressed as a `NewTransaction` and must pass
/// [validate_transaction](crate::validation::validate_transaction) before
/// they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Free text, may be empty.
    pub description: String,
    /// How much money changed hands.
    pub amount: Amount,
    /// Whether the money was spent or earned.
    pub kind: TransactionKind,
    /// The person who registered the transaction.
    pub person_id: PersonId,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
}

impl NewTransaction {
    /// Attach a database ID to the transaction.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            person_id: self.person_id,
            category_id: self.category_id,
        }
    }
}

/// The JSON representation of a transaction.
///
/// `amount` is serialized as a decimal string, e.g. `"12.50"`, and may be
/// sent either as a string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDto {
    #[serde(default)]
    pub id: TransactionId,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub person_id: PersonId,
    pub category_id: CategoryId,
}

impl From<Transaction> for TransactionDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            description: transaction.description,
            amount: transaction.amount.value(),
            kind: transaction.kind,
            person_id: transaction.person_id,
            category_id: transaction.category_id,
        }
    }
}

impl TryFrom<TransactionDto> for NewTransaction {
    type Error = Error;

    fn try_from(dto: TransactionDto) -> Result<Self, Self::Error> {
        Ok(Self {
            description: dto.description,
            amount: Amount::new(dto.amount)?,
            kind: dto.kind,
            person_id: dto.person_id,
            category_id: dto.category_id,
        })
    }
}

impl TryFrom<TransactionDto> for Transaction {
    type Error = Error;

    fn try_from(dto: TransactionDto) -> Result<Self, Self::Error> {
        let id = dto.id;

        NewTransaction::try_from(dto).map(|transaction| transaction.with_id(id))
    }
}
