//! Database operations for people.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    database_id::PersonId,
    person::{NewPerson, Person, PersonName},
};

/// Create a person and return it with its generated ID.
pub fn create_person(new_person: NewPerson, connection: &Connection) -> Result<Person, Error> {
    connection.execute(
        "INSERT INTO person (name, age) VALUES (?1, ?2);",
        (new_person.name.as_ref(), new_person.age),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Person {
        id,
        name: new_person.name,
        age: new_person.age,
    })
}

/// Retrieve a single person by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no person with `person_id`.
pub fn get_person(person_id: PersonId, connection: &Connection) -> Result<Person, Error> {
    connection
        .prepare("SELECT id, name, age FROM person WHERE id = :id;")?
        .query_row(&[(":id", &person_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single person by ID, or `None` if the person does not exist.
pub fn find_person(person_id: PersonId, connection: &Connection) -> Result<Option<Person>, Error> {
    connection
        .prepare("SELECT id, name, age FROM person WHERE id = :id;")?
        .query_row(&[(":id", &person_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all people in the order they were registered.
pub fn get_all_people(connection: &Connection) -> Result<Vec<Person>, Error> {
    connection
        .prepare("SELECT id, name, age FROM person ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_person| maybe_person.map_err(|error| error.into()))
        .collect()
}

/// Replace a person's name and age. Returns an error if the person doesn't exist.
pub fn update_person(
    person_id: PersonId,
    person: NewPerson,
    connection: &Connection,
) -> Result<Person, Error> {
    let rows_affected = connection.execute(
        "UPDATE person SET name = ?1, age = ?2 WHERE id = ?3",
        (person.name.as_ref(), person.age, person_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingPerson);
    }

    Ok(Person {
        id: person_id,
        name: person.name,
        age: person.age,
    })
}

/// Delete a person by ID. Returns an error if the person doesn't exist.
///
/// The person's transactions must be deleted first, otherwise the foreign key
/// check fails with [Error::InvalidReference].
pub fn delete_person(person_id: PersonId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM person WHERE id = ?1", [person_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingPerson);
    }

    Ok(())
}

/// Initialize the person table.
pub fn create_person_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL CHECK (age >= 0)
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Person, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let age = row.get(2)?;

    Ok(Person {
        id,
        name: PersonName::new_unchecked(&raw_name),
        age,
    })
}
