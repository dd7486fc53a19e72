//! Decides whether a transaction may be written given the current people and
//! categories.
//!
//! The checks run in a fixed order and the first failing check decides the
//! reason reported to the client:
//!
//! 1. the person must exist,
//! 2. minors may only register expenses,
//! 3. the category must exist,
//! 4. the transaction kind must be allowed by the category's purpose.
//!
//! The same rules govern creating a transaction and replacing the values of an
//! existing one.

use std::convert::Infallible;

use crate::{
    category::{Category, Purpose},
    database_id::{CategoryId, PersonId},
    person::Person,
    transaction::{NewTransaction, TransactionKind},
};

/// Why a transaction was not accepted.
///
/// The display text is the reason shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The transaction refers to a person that does not exist.
    #[error("person not found")]
    PersonNotFound,

    /// A person under 18 tried to register income.
    #[error("minors may only register expenses")]
    MinorIncome,

    /// The transaction refers to a category that does not exist.
    #[error("category not found")]
    CategoryNotFound,

    /// An expense was registered against an income only category.
    #[error("income category cannot be used for an expense")]
    IncomeCategoryForExpense,

    /// Income was registered against an expense only category.
    #[error("expense category cannot be used for income")]
    ExpenseCategoryForIncome,
}

/// The broad class of a [Rejection].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// A referenced person or category does not exist.
    NotFound,
    /// The references exist but the combination breaks a business rule.
    RuleViolation,
}

impl Rejection {
    /// The broad class of the rejection.
    pub fn kind(self) -> RejectionKind {
        match self {
            Rejection::PersonNotFound | Rejection::CategoryNotFound => RejectionKind::NotFound,
            Rejection::MinorIncome
            | Rejection::IncomeCategoryForExpense
            | Rejection::ExpenseCategoryForIncome => RejectionKind::RuleViolation,
        }
    }
}

/// The outcome of validating a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// The transaction may be written.
    Accept,
    /// The transaction must not be written.
    Reject(Rejection),
}

impl ValidationResult {
    /// Convert into a `Result` so that a rejection can be propagated with `?`.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            ValidationResult::Accept => Ok(()),
            ValidationResult::Reject(rejection) => Err(rejection),
        }
    }
}

/// Check `candidate` against the current people and categories.
///
/// `person_lookup` and `category_lookup` are only called when their check is
/// reached, e.g. the category is never looked up for a rejected minor. A
/// lookup returns `Ok(None)` when the entity does not exist and `Err` when the
/// lookup itself failed, which is passed straight back to the caller. Use
/// [validate_against_snapshot] when the people and categories are already in
/// memory.
///
/// This function does not modify anything, callers that write the transaction
/// afterwards must make sure nothing else changes the referenced person or
/// category in between.
pub fn validate_transaction<E>(
    candidate: &NewTransaction,
    person_lookup: impl FnOnce(PersonId) -> Result<Option<Person>, E>,
    category_lookup: impl FnOnce(CategoryId) -> Result<Option<Category>, E>,
) -> Result<ValidationResult, E> {
    let Some(person) = person_lookup(candidate.person_id)? else {
        return Ok(ValidationResult::Reject(Rejection::PersonNotFound));
    };

    if person.is_minor() && candidate.kind == TransactionKind::Income {
        return Ok(ValidationResult::Reject(Rejection::MinorIncome));
    }

    let Some(category) = category_lookup(candidate.category_id)? else {
        return Ok(ValidationResult::Reject(Rejection::CategoryNotFound));
    };

    let result = match (candidate.kind, category.purpose) {
        (TransactionKind::Expense, Purpose::IncomeOnly) => {
            ValidationResult::Reject(Rejection::IncomeCategoryForExpense)
        }
        (TransactionKind::Income, Purpose::ExpenseOnly) => {
            ValidationResult::Reject(Rejection::ExpenseCategoryForIncome)
        }
        _ => ValidationResult::Accept,
    };

    Ok(result)
}

/// Check `candidate` against in-memory lists of people and categories.
pub fn validate_against_snapshot(
    candidate: &NewTransaction,
    people: &[Person],
    categories: &[Category],
) -> ValidationResult {
    let result = validate_transaction::<Infallible>(
        candidate,
        |person_id| Ok(people.iter().find(|person| person.id == person_id).cloned()),
        |category_id| {
            Ok(categories
                .iter()
                .find(|category| category.id == category_id)
                .cloned())
        },
    );

    match result {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod validate_transaction_tests {
    use std::cell::Cell;

    use rust_decimal::Decimal;

    use crate::{
        category::{Category, CategoryDescription, Purpose},
        person::{Person, PersonName},
        transaction::{Amount, NewTransaction, TransactionKind},
        validation::{
            Rejection, RejectionKind, ValidationResult, validate_against_snapshot,
            validate_transaction,
        },
    };

    fn person(id: i64, age: u32) -> Person {
        Person {
            id,
            name: PersonName::new_unchecked("Test"),
            age,
        }
    }

    fn category(id: i64, purpose: Purpose) -> Category {
        Category {
            id,
            description: CategoryDescription::new_unchecked("Test"),
            purpose,
        }
    }

    fn candidate(kind: TransactionKind, units: i64) -> NewTransaction {
        NewTransaction {
            description: String::new(),
            amount: Amount::new(Decimal::new(units, 0)).unwrap(),
            kind,
            person_id: 1,
            category_id: 1,
        }
    }

    #[test]
    fn adult_income_is_accepted_by_income_and_both_categories() {
        for purpose in [Purpose::IncomeOnly, Purpose::Both] {
            let result = validate_against_snapshot(
                &candidate(TransactionKind::Income, 10),
                &[person(1, 30)],
                &[category(1, purpose)],
            );

            assert_eq!(result, ValidationResult::Accept, "purpose {purpose:?}");
        }
    }

    #[test]
    fn adult_income_is_rejected_by_expense_category() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Income, 20),
            &[person(1, 30)],
            &[category(1, Purpose::ExpenseOnly)],
        );

        assert_eq!(
            result,
            ValidationResult::Reject(Rejection::ExpenseCategoryForIncome)
        );
        assert_eq!(
            Rejection::ExpenseCategoryForIncome.to_string(),
            "expense category cannot be used for income"
        );
    }

    #[test]
    fn expense_is_rejected_by_income_category() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Expense, 20),
            &[person(1, 30)],
            &[category(1, Purpose::IncomeOnly)],
        );

        assert_eq!(
            result,
            ValidationResult::Reject(Rejection::IncomeCategoryForExpense)
        );
        assert_eq!(
            Rejection::IncomeCategoryForExpense.to_string(),
            "income category cannot be used for an expense"
        );
    }

    #[test]
    fn adult_expense_with_both_category_is_accepted() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Expense, 100),
            &[person(1, 30)],
            &[category(1, Purpose::Both)],
        );

        assert_eq!(result, ValidationResult::Accept);
    }

    #[test]
    fn minor_income_is_rejected_for_every_purpose() {
        for purpose in [Purpose::IncomeOnly, Purpose::ExpenseOnly, Purpose::Both] {
            let result = validate_against_snapshot(
                &candidate(TransactionKind::Income, 50),
                &[person(1, 16)],
                &[category(1, purpose)],
            );

            assert_eq!(
                result,
                ValidationResult::Reject(Rejection::MinorIncome),
                "purpose {purpose:?}"
            );
        }
        assert_eq!(
            Rejection::MinorIncome.to_string(),
            "minors may only register expenses"
        );
    }

    #[test]
    fn minor_income_is_rejected_before_missing_category() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Income, 50),
            &[person(1, 16)],
            &[],
        );

        assert_eq!(result, ValidationResult::Reject(Rejection::MinorIncome));
    }

    #[test]
    fn minor_expense_is_accepted() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Expense, 5),
            &[person(1, 17)],
            &[category(1, Purpose::ExpenseOnly)],
        );

        assert_eq!(result, ValidationResult::Accept);
    }

    #[test]
    fn eighteen_year_old_may_register_income() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Income, 5),
            &[person(1, 18)],
            &[category(1, Purpose::IncomeOnly)],
        );

        assert_eq!(result, ValidationResult::Accept);
    }

    #[test]
    fn missing_person_is_rejected_first() {
        let result = validate_against_snapshot(&candidate(TransactionKind::Income, 5), &[], &[]);

        assert_eq!(result, ValidationResult::Reject(Rejection::PersonNotFound));
        assert_eq!(Rejection::PersonNotFound.to_string(), "person not found");
    }

    #[test]
    fn missing_category_is_rejected() {
        let result = validate_against_snapshot(
            &candidate(TransactionKind::Expense, 5),
            &[person(1, 40)],
            &[category(2, Purpose::Both)],
        );

        assert_eq!(result, ValidationResult::Reject(Rejection::CategoryNotFound));
        assert_eq!(Rejection::CategoryNotFound.to_string(), "category not found");
    }

    #[test]
    fn category_is_not_looked_up_after_person_rejection() {
        let category_lookups = Cell::new(0);

        let result = validate_transaction::<()>(
            &candidate(TransactionKind::Income, 5),
            |_| Ok(Some(person(1, 10))),
            |_| {
                category_lookups.set(category_lookups.get() + 1);
                Ok(Some(category(1, Purpose::Both)))
            },
        );

        assert_eq!(result, Ok(ValidationResult::Reject(Rejection::MinorIncome)));
        assert_eq!(category_lookups.get(), 0);
    }

    #[test]
    fn lookup_failure_is_returned_to_caller() {
        let result = validate_transaction(
            &candidate(TransactionKind::Expense, 5),
            |_| Ok(Some(person(1, 40))),
            |_| Err("storage unavailable"),
        );

        assert_eq!(result, Err("storage unavailable"));
    }

    #[test]
    fn rejections_are_classified() {
        assert_eq!(Rejection::PersonNotFound.kind(), RejectionKind::NotFound);
        assert_eq!(Rejection::CategoryNotFound.kind(), RejectionKind::NotFound);
        assert_eq!(Rejection::MinorIncome.kind(), RejectionKind::RuleViolation);
        assert_eq!(
            Rejection::ExpenseCategoryForIncome.kind(),
            RejectionKind::RuleViolation
        );
        assert_eq!(
            ValidationResult::Reject(Rejection::MinorIncome).into_result(),
            Err(Rejection::MinorIncome)
        );
        assert_eq!(ValidationResult::Accept.into_result(), Ok(()));
    }
}
