//! Student record, request payload, and error definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A single student entry held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier of the student within the store.
    pub id: i64,
    /// Display name; prefix filtering matches against this field.
    pub name: String,
}

impl Student {
    /// Build a record from its parts.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Request body accepted by the create and update endpoints.
///
/// The identifier is optional at the wire level so that a missing id can be reported
/// through [`StudentError`] instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentPayload {
    /// Identifier carried in the body.
    #[serde(default)]
    pub id: Option<i64>,
    /// Name carried in the body; absent names are stored as an empty string.
    #[serde(default)]
    pub name: String,
}

impl StudentPayload {
    /// Convert into a stored record, failing when no identifier was supplied.
    pub fn into_student(self) -> Result<Student, StudentError> {
        let id = self.id.ok_or(StudentError::MissingId)?;
        Ok(Student {
            id,
            name: self.name,
        })
    }
}

impl From<Student> for StudentPayload {
    fn from(student: Student) -> Self {
        Self {
            id: Some(student.id),
            name: student.name,
        }
    }
}

/// Outcomes of a CRUD operation that are reported to the caller as failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentError {
    /// No record exists for the requested identifier.
    #[error("student {0} not found")]
    NotFound(i64),
    /// A record with the identifier already exists.
    #[error("student {0} already exists")]
    Conflict(i64),
    /// The request body did not carry an identifier.
    #[error("student payload is missing an id")]
    MissingId,
}

/// Errors raised while loading the optional seed file at startup.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Read {
        /// Location of the seed file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The seed file was not a JSON array of student records.
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        /// Location of the seed file.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}
