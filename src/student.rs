//! Student record types and input validation

use serde::Serialize;
use std::fmt;

use crate::{Result, StoreError};

/// Highest accepted age, inclusive
pub const MAX_AGE: i64 = 150;

/// Store-assigned row identifier (the `Id` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted student row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub id: RecordId,
    pub name: String,
    pub age: i64,
}

impl StudentRecord {
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Self {
        Self {
            id: RecordId(id),
            name: name.into(),
            age,
        }
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {} | Name: {} | Age: {}", self.id, self.name, self.age)
    }
}

/// A validated student that has not been saved yet.
///
/// Construct through [`NewStudent::new`]; the store only accepts values that
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    name: String,
    age: i64,
}

impl NewStudent {
    /// Validate a name/age pair.
    ///
    /// The name is stored exactly as given and must contain something other
    /// than whitespace. The age must lie in `0..=MAX_AGE`.
    pub fn new(name: &str, age: i64) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidInput("name must not be empty".to_string()));
        }
        if !(0..=MAX_AGE).contains(&age) {
            return Err(StoreError::InvalidInput(format!(
                "age must be between 0 and {}, got {}",
                MAX_AGE, age
            )));
        }

        Ok(Self {
            name: name.to_string(),
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }
}
