//! Decides whether a person or category may be deleted while transactions
//! still refer to it.

use clap::ValueEnum;

use crate::{
    database_id::{CategoryId, PersonId, TransactionId},
    transaction::Transaction,
};

/// What to do with a person's transactions when the person is deleted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeletionPolicy {
    /// Keep the person until all of their transactions have been deleted.
    #[default]
    Refuse,
    /// Delete the person's transactions together with the person.
    Cascade,
}

/// The outcome of asking whether a person may be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionDecision {
    /// Nothing refers to the person.
    Allowed,
    /// The person still owns transactions and the policy is to refuse.
    Refused {
        /// How many transactions the person owns.
        dependents: usize,
    },
    /// The policy is to cascade.
    Cascade {
        /// The transactions to delete before the person.
        transactions: Vec<TransactionId>,
    },
}

/// Whether the category with `category_id` can be deleted.
///
/// Returns `false` if any of `transactions` refers to the category. Categories
/// are never deleted together with their transactions.
pub fn can_delete_category(category_id: CategoryId, transactions: &[Transaction]) -> bool {
    !transactions
        .iter()
        .any(|transaction| transaction.category_id == category_id)
}

/// Decide how to delete the person with `person_id` under `policy`.
pub fn can_delete_person(
    person_id: PersonId,
    transactions: &[Transaction],
    policy: DeletionPolicy,
) -> DeletionDecision {
    let dependents: Vec<TransactionId> = transactions
        .iter()
        .filter(|transaction| transaction.person_id == person_id)
        .map(|transaction| transaction.id)
        .collect();

    if dependents.is_empty() {
        return DeletionDecision::Allowed;
    }

    match policy {
        DeletionPolicy::Refuse => DeletionDecision::Refused {
            dependents: dependents.len(),
        },
        DeletionPolicy::Cascade => DeletionDecision::Cascade {
            transactions: dependents,
        },
    }
}
