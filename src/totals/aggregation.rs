//! Sums transaction amounts into income, expense and balance totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::Category,
    database_id::{CategoryId, PersonId},
    person::Person,
    transaction::{Transaction, TransactionKind},
};

/// Income, expense and their difference over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// The sum of all income.
    pub income: Decimal,
    /// The sum of all expenses.
    pub expense: Decimal,
    /// Income minus expenses, negative when the household spent more than it earned.
    pub balance: Decimal,
}

impl Totals {
    /// Totals with every field set to zero.
    pub const ZERO: Totals = Totals {
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
        balance: Decimal::ZERO,
    };

    fn new(income: Decimal, expense: Decimal) -> Result<Self, Error> {
        Ok(Totals {
            income,
            expense,
            balance: income.checked_sub(expense).ok_or(Error::TotalsOverflow)?,
        })
    }

    fn record(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let amount = transaction.amount.value();

        let (income, expense) = match transaction.kind {
            TransactionKind::Income => (checked_sum(self.income, amount)?, self.expense),
            TransactionKind::Expense => (self.income, checked_sum(self.expense, amount)?),
        };

        *self = Totals::new(income, expense)?;

        Ok(())
    }

    /// Combine two sets of totals.
    ///
    /// # Errors
    ///
    /// Returns [Error::TotalsOverflow] if a sum does not fit in a [Decimal].
    pub fn checked_add(self, other: Totals) -> Result<Totals, Error> {
        Totals::new(
            checked_sum(self.income, other.income)?,
            checked_sum(self.expense, other.expense)?,
        )
    }
}

fn checked_sum(left: Decimal, right: Decimal) -> Result<Decimal, Error> {
    left.checked_add(right).ok_or(Error::TotalsOverflow)
}

/// Sum all of `transactions`.
///
/// # Errors
///
/// Returns [Error::TotalsOverflow] if a sum does not fit in a [Decimal].
pub fn aggregate(transactions: &[Transaction]) -> Result<Totals, Error> {
    let mut totals = Totals::ZERO;

    for transaction in transactions {
        totals.record(transaction)?;
    }

    Ok(totals)
}

/// Sum `transactions` for each of `people`.
///
/// Every person gets an entry, people without transactions get [Totals::ZERO].
/// Transactions of people that are not in `people` are skipped.
///
/// # Errors
///
/// Returns [Error::TotalsOverflow] if a sum does not fit in a [Decimal].
pub fn aggregate_by_person(
    transactions: &[Transaction],
    people: &[Person],
) -> Result<BTreeMap<PersonId, Totals>, Error> {
    group_by(transactions, people.iter().map(|person| person.id), |transaction| {
        transaction.person_id
    })
}

/// Sum `transactions` for each of `categories`.
///
/// Every category gets an entry, unused categories get [Totals::ZERO].
/// Transactions of categories that are not in `categories` are skipped.
///
/// # Errors
///
/// Returns [Error::TotalsOverflow] if a sum does not fit in a [Decimal].
pub fn aggregate_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<BTreeMap<CategoryId, Totals>, Error> {
    group_by(
        transactions,
        categories.iter().map(|category| category.id),
        |transaction| transaction.category_id,
    )
}

fn group_by(
    transactions: &[Transaction],
    keys: impl Iterator<Item = i64>,
    key_of: impl Fn(&Transaction) -> i64,
) -> Result<BTreeMap<i64, Totals>, Error> {
    let mut totals: BTreeMap<i64, Totals> = keys.map(|key| (key, Totals::ZERO)).collect();

    for transaction in transactions {
        if let Some(group) = totals.get_mut(&key_of(transaction)) {
            group.record(transaction)?;
        }
    }

    Ok(totals)
}
