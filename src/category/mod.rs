//! Transaction categories and the endpoints for managing them.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, find_category, get_all_categories,
    get_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryDescription, CategoryDto, NewCategory, Purpose};
pub use edit::update_category_endpoint;
pub use list::{
    get_category_endpoint, list_categories_endpoint, list_category_transactions_endpoint,
};

#[cfg(test)]
pub use domain::InvalidPurposeCode;
