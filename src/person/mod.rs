//! People in the household and the endpoints for managing them.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_person_endpoint;
pub use db::{
    create_person, create_person_table, delete_person, find_person, get_all_people, get_person,
    update_person,
};
pub use delete::delete_person_endpoint;
pub use domain::{NewPerson, Person, PersonDto, PersonName};
pub use edit::update_person_endpoint;
pub use list::{get_person_endpoint, list_people_endpoint, list_person_transactions_endpoint};
