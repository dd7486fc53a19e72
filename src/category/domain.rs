//! Core category domain types.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryId};

/// A validated, non-empty category description, e.g. 'Groceries' or 'Salary'.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryDescription(String);

impl CategoryDescription {
    /// Create a category description.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryDescription] if
    /// `description` is empty or only whitespace.
    pub fn new(description: &str) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            Err(Error::EmptyCategoryDescription)
        } else {
            Ok(Self(description.to_string()))
        }
    }

    /// Create a category description without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(description: &str) -> Self {
        Self(description.to_string())
    }
}

impl AsRef<str> for CategoryDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which kinds of transaction a category may be used for.
///
/// The integer codes are stored in the database and sent over the wire, so
/// they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Purpose {
    /// Only income may be registered against the category.
    IncomeOnly,
    /// Only expenses may be registered against the category.
    ExpenseOnly,
    /// Both income and expenses may be registered against the category.
    Both,
}

/// An integer that does not map to a [Purpose].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid category purpose code, expected 0 (income), 1 (expense) or 2 (both)")]
pub struct InvalidPurposeCode(pub u8);

impl Purpose {
    /// The stable integer code for the purpose.
    pub const fn code(self) -> u8 {
        match self {
            Purpose::IncomeOnly => 0,
            Purpose::ExpenseOnly => 1,
            Purpose::Both => 2,
        }
    }
}

impl TryFrom<u8> for Purpose {
    type Error = InvalidPurposeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Purpose::IncomeOnly),
            1 => Ok(Purpose::ExpenseOnly),
            2 => Ok(Purpose::Both),
            other => Err(InvalidPurposeCode(other)),
        }
    }
}

impl From<Purpose> for u8 {
    fn from(purpose: Purpose) -> Self {
        purpose.code()
    }
}

impl ToSql for Purpose {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Integer(i64::from(self.code()))))
    }
}

impl FromSql for Purpose {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = u8::column_result(value)?;

        Purpose::try_from(code).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A reusable classification for transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// What the category is for, e.g. 'Groceries'.
    pub description: CategoryDescription,
    /// Which kinds of transaction may use the category.
    pub purpose: Purpose,
}

/// The data for creating a category or replacing an existing category's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// What the category is for, e.g. 'Groceries'.
    pub description: CategoryDescription,
    /// Which kinds of transaction may use the category.
    pub purpose: Purpose,
}

/// The JSON representation of a category.
///
/// `id` is ignored when the DTO is used to create or update a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: CategoryId,
    pub description: String,
    pub purpose: Purpose,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            description: category.description.to_string(),
            purpose: category.purpose,
        }
    }
}

impl TryFrom<CategoryDto> for NewCategory {
    type Error = Error;

    fn try_from(dto: CategoryDto) -> Result<Self, Self::Error> {
        Ok(Self {
            description: CategoryDescription::new(&dto.description)?,
            purpose: dto.purpose,
        })
    }
}

impl TryFrom<CategoryDto> for Category {
    type Error = Error;

    fn try_from(dto: CategoryDto) -> Result<Self, Self::Error> {
        let id = dto.id;
        let NewCategory {
            description,
            purpose,
        } = NewCategory::try_from(dto)?;

        Ok(Self {
            id,
            description,
            purpose,
        })
    }
}


#[cfg(test)]
mod category_dto_tests {
    use crate::{
        Error,
        category::{Category, CategoryDescription, CategoryDto, NewCategory, Purpose},
    };

    #[test]
    fn entity_to_dto_to_entity_is_identity() {
        let category = Category {
            id: 3,
            description: CategoryDescription::new_unchecked("Groceries"),
            purpose: Purpose::ExpenseOnly,
        };

        let round_tripped = Category::try_from(CategoryDto::from(category.clone()));

        assert_eq!(round_tripped, Ok(category));
    }

    #[test]
    fn empty_description_is_rejected() {
        let dto = CategoryDto {
            id: 0,
            description: "\t".to_owned(),
            purpose: Purpose::Both,
        };

        assert_eq!(
            NewCategory::try_from(dto),
            Err(Error::EmptyCategoryDescription)
        );
    }
}
