//! The totals report endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::get_all_categories,
    database_id::{CategoryId, PersonId},
    person::get_all_people,
    totals::{Totals, aggregate, aggregate_by_category, aggregate_by_person},
    transaction::get_all_transactions,
};

/// The state needed for the totals report.
#[derive(Debug, Clone)]
pub struct TotalsReportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TotalsReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A person's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonTotals {
    /// The ID of the person.
    pub person_id: PersonId,
    /// The person's name.
    pub name: String,
    /// The sums of the person's transactions.
    #[serde(flatten)]
    pub totals: Totals,
}

/// A category's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// The ID of the category.
    pub category_id: CategoryId,
    /// The category's description.
    pub description: String,
    /// The sums of the transactions registered under the category.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Totals for every person, every category and the whole household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsReport {
    /// One entry per person, in the order people are listed.
    pub people: Vec<PersonTotals>,
    /// One entry per category, in the order categories are listed.
    pub categories: Vec<CategoryTotals>,
    /// The sums of every transaction.
    pub overall: Totals,
}

/// Compute the totals report from the current database contents.
pub async fn get_totals_report(
    State(state): State<TotalsReportState>,
) -> Result<Json<TotalsReport>, Error> {
    let (people, categories, transactions) = {
        let connection = lock_connection(&state.db_connection)?;

        (
            get_all_people(&connection)?,
            get_all_categories(&connection)?,
            get_all_transactions(&connection)?,
        )
    };

    let mut by_person = aggregate_by_person(&transactions, &people)?;
    let mut by_category = aggregate_by_category(&transactions, &categories)?;
    let overall = aggregate(&transactions)?;

    let people = people
        .into_iter()
        .map(|person| PersonTotals {
            person_id: person.id,
            totals: by_person.remove(&person.id).unwrap_or_default(),
            name: person.name.to_string(),
        })
        .collect();

    let categories = categories
        .into_iter()
        .map(|category| CategoryTotals {
            category_id: category.id,
            totals: by_category.remove(&category.id).unwrap_or_default(),
            description: category.description.to_string(),
        })
        .collect();

    Ok(Json(TotalsReport {
        people,
        categories,
        overall,
    }))
}

#[cfg(test)]
mod totals_report_tests {
    use std::str::FromStr;

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rust_decimal::Decimal;

    use crate::{
        ErrorBody,
        category::{CategoryDescription, NewCategory, Purpose, create_category},
        person::{NewPerson, PersonName, create_person},
        test_utils::get_test_state,
        totals::{Totals, TotalsReport, get_totals_report},
        transaction::{Amount, NewTransaction, TransactionKind, create_transaction},
    };

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[tokio::test]
    async fn reports_people_categories_and_overall() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let ana = create_person(
                NewPerson {
                    name: PersonName::new_unchecked("Ana"),
                    age: 35,
                },
                &connection,
            )
            .unwrap();
            let bia = create_person(
                NewPerson {
                    name: PersonName::new_unchecked("Bia"),
                    age: 12,
                },
                &connection,
            )
            .unwrap();
            let misc = create_category(
                NewCategory {
                    description: CategoryDescription::new_unchecked("Misc"),
                    purpose: Purpose::Both,
                },
                &connection,
            )
            .unwrap();

            for (person_id, kind, amount) in [
                (ana.id, TransactionKind::Income, "100.00"),
                (ana.id, TransactionKind::Expense, "40.50"),
                (bia.id, TransactionKind::Expense, "9.50"),
            ] {
                create_transaction(
                    NewTransaction {
                        description: String::new(),
                        amount: Amount::new(dec(amount)).unwrap(),
                        kind,
                        person_id,
                        category_id: misc.id,
                    },
                    &connection,
                )
                .unwrap();
            }
        }
        let app = Router::new()
            .route("/totals", get(get_totals_report))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/totals").await;

        response.assert_status_ok();
        let report = response.json::<TotalsReport>();
        assert_eq!(report.people.len(), 2);
        assert_eq!(report.people[0].name, "Ana");
        assert_eq!(report.people[0].totals.balance, dec("59.50"));
        assert_eq!(report.people[1].totals.income, Decimal::ZERO);
        assert_eq!(report.people[1].totals.expense, dec("9.50"));
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].totals, report.overall);
        assert_eq!(
            report.overall,
            Totals {
                income: dec("100.00"),
                expense: dec("50.00"),
                balance: dec("50.00"),
            }
        );
    }

    #[tokio::test]
    async fn empty_database_reports_zero() {
        let app = Router::new()
            .route("/totals", get(get_totals_report))
            .with_state(get_test_state());
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let report = server.get("/totals").await.json::<TotalsReport>();

        assert!(report.people.is_empty());
        assert!(report.categories.is_empty());
        assert_eq!(report.overall, Totals::ZERO);
    }

    #[tokio::test]
    async fn totals_too_large_to_sum_are_a_server_error() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let ana = create_person(
                NewPerson {
                    name: PersonName::new_unchecked("Ana"),
                    age: 35,
                },
                &connection,
            )
            .unwrap();
            let misc = create_category(
                NewCategory {
                    description: CategoryDescription::new_unchecked("Misc"),
                    purpose: Purpose::Both,
                },
                &connection,
            )
            .unwrap();

            for _ in 0..2 {
                create_transaction(
                    NewTransaction {
                        description: String::new(),
                        amount: Amount::new(Decimal::MAX).unwrap(),
                        kind: TransactionKind::Income,
                        person_id: ana.id,
                        category_id: misc.id,
                    },
                    &connection,
                )
                .unwrap();
            }
        }
        let app = Router::new()
            .route("/totals", get(get_totals_report))
            .with_state(state.clone());
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/totals").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.json::<ErrorBody>().error.is_empty());
        assert!(!state.db_connection.is_poisoned());
        server
            .get("/totals")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
