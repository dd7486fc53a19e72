//! Endpoints for reading categories and their transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{CategoryDto, get_all_categories, get_category},
    database_id::CategoryId,
    transaction::{TransactionDto, get_transactions_by_category},
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct CategoriesQueryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category, sorted by description.
pub async fn list_categories_endpoint(
    State(state): State<CategoriesQueryState>,
) -> Result<Json<Vec<CategoryDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let categories = get_all_categories(&connection)?;

    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// Get a single category.
pub async fn get_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesQueryState>,
) -> Result<Json<CategoryDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let category = get_category(category_id, &connection)?;

    Ok(Json(category.into()))
}

/// List the transactions classified under a category.
pub async fn list_category_transactions_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesQueryState>,
) -> Result<Json<Vec<TransactionDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    get_category(category_id, &connection)?;
    let transactions = get_transactions_by_category(category_id, &connection)?;

    Ok(Json(
        transactions.into_iter().map(TransactionDto::from).collect(),
    ))
}

#[cfg(test)]
mod category_query_endpoint_tests {
    use crate::{
        category::{CategoryDto, Purpose},
        endpoints::{self, format_endpoint},
        test_utils::{
            get_test_server, get_test_state, insert_category, insert_person, insert_transaction,
        },
        transaction::{TransactionDto, TransactionKind},
    };

    #[tokio::test]
    async fn lists_categories_by_description() {
        let state = get_test_state();
        let salary = insert_category(&state, "Salary", Purpose::IncomeOnly);
        let food = insert_category(&state, "Food", Purpose::ExpenseOnly);
        let server = get_test_server(state);

        let response = server.get(endpoints::CATEGORIES).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<CategoryDto>>(),
            vec![CategoryDto::from(food), CategoryDto::from(salary)]
        );
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.get(&format_endpoint(endpoints::CATEGORY, 1)).await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn lists_only_the_categorys_transactions() {
        let state = get_test_state();
        let ana = insert_person(&state, "Ana", 30);
        let food = insert_category(&state, "Food", Purpose::ExpenseOnly);
        let salary = insert_category(&state, "Salary", Purpose::IncomeOnly);
        let wanted = insert_transaction(&state, &ana, &food, TransactionKind::Expense, 12);
        insert_transaction(&state, &ana, &salary, TransactionKind::Income, 900);
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY_TRANSACTIONS, food.id))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<TransactionDto>>(),
            vec![TransactionDto::from(wanted)]
        );
    }
}
