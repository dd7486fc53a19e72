//! Core person domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::PersonId};

/// People younger than this may only register expenses.
pub const ADULT_AGE: u32 = 18;

/// A validated, non-empty person name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Create a person name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyPersonName] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyPersonName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a person name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resident of the household.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    /// The ID of the person.
    pub id: PersonId,
    /// The person's name.
    pub name: PersonName,
    /// The person's age in whole years.
    pub age: u32,
}

impl Person {
    /// Whether the person is too young to register income.
    pub fn is_minor(&self) -> bool {
        self.age < ADULT_AGE
    }
}

/// The data for creating a person or replacing an existing person's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    /// The person's name.
    pub name: PersonName,
    /// Age in whole years.
    pub age: u32,
}

/// The JSON representation of a person.
///
/// `id` is ignored when the DTO is used to create or update a person, the ID
/// from the database or the request path is used instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDto {
    #[serde(default)]
    pub id: PersonId,
    pub name: String,
    pub age: i64,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name.to_string(),
            age: i64::from(person.age),
        }
    }
}

impl TryFrom<PersonDto> for Person {
    type Error = Error;

    fn try_from(dto: PersonDto) -> Result<Self, Self::Error> {
        let NewPerson { name, age } = NewPerson::try_from(dto.clone())?;

        Ok(Self {
            id: dto.id,
            name,
            age,
        })
    }
}

impl TryFrom<PersonDto> for NewPerson {
    type Error = Error;

    fn try_from(dto: PersonDto) -> Result<Self, Self::Error> {
        let name = PersonName::new(&dto.name)?;
        let age = u32::try_from(dto.age).map_err(|_| Error::InvalidAge(dto.age))?;

        Ok(Self { name, age })
    }
}
