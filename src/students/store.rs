//! In-memory id → record map backing the service.

use std::collections::BTreeMap;
use std::path::Path;

use super::types::{SeedError, Student};

/// Process-wide student map.
///
/// The store applies no business rules: conflict and not-found decisions are made by
/// [`StudentService`](super::StudentService). Iteration follows ascending id order.
#[derive(Debug, Default, Clone)]
pub struct StudentStore {
    records: BTreeMap<i64, Student>,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON array of student records.
    ///
    /// Later entries overwrite earlier ones that share an id.
    pub fn from_json_file(path: &Path) -> Result<Self, SeedError> {
        let bytes = std::fs::read(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let students: Vec<Student> =
            serde_json::from_slice(&bytes).map_err(|source| SeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(students.into_iter().collect())
    }

    /// Look up a record by id.
    pub fn get(&self, id: i64) -> Option<&Student> {
        self.records.get(&id)
    }

    /// Insert or overwrite the record stored under `id`.
    pub fn put(&mut self, id: i64, student: Student) {
        self.records.insert(id, student);
    }

    /// Remove the record stored under `id`, returning it if present.
    pub fn remove(&mut self, id: i64) -> Option<Student> {
        self.records.remove(&id)
    }

    /// Whether a record is stored under `id`.
    pub fn contains(&self, id: i64) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterate over all stored records.
    pub fn values(&self) -> impl Iterator<Item = &Student> {
        self.records.values()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl FromIterator<Student> for StudentStore {
    fn from_iter<I: IntoIterator<Item = Student>>(iter: I) -> Self {
        let mut store = Self::new();
        for student in iter {
            store.put(student.id, student);
        }
        store
    }
}
