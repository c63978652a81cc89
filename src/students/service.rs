//! Student service applying the CRUD rules on top of the store.

use crate::{
    metrics::{MetricsSnapshot, StudentMetrics},
    students::{
        filters::NameFilter,
        store::StudentStore,
        types::{Student, StudentError, StudentPayload},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns the student store and decides conflict and not-found outcomes.
///
/// Every operation holds the store lock for its whole read-then-write sequence, so a
/// create racing another create on the same id cannot both succeed. Construct the service
/// once near process start and share it through an `Arc`.
pub struct StudentService {
    store: Mutex<StudentStore>,
    metrics: Arc<StudentMetrics>,
}

/// Abstraction over the student operations used by the HTTP surface.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Return every record accepted by `filter`.
    async fn list(&self, filter: NameFilter) -> Vec<Student>;

    /// Return the record stored under `id`.
    async fn get(&self, id: i64) -> Result<Student, StudentError>;

    /// Insert a new record, rejecting ids that are already present.
    async fn create(&self, payload: StudentPayload) -> Result<Student, StudentError>;

    /// Overwrite the record at `path_id` when the payload's id is already present.
    async fn update(&self, path_id: i64, payload: StudentPayload)
    -> Result<Student, StudentError>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: i64) -> Result<(), StudentError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    async fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl StudentService {
    /// Build a service over an empty store.
    pub fn new() -> Self {
        Self::with_store(StudentStore::new())
    }

    /// Build a service over a pre-populated store.
    pub fn with_store(store: StudentStore) -> Self {
        Self {
            store: Mutex::new(store),
            metrics: Arc::new(StudentMetrics::new()),
        }
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Drop every stored record.
    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }
}

impl Default for StudentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentApi for StudentService {
    async fn list(&self, filter: NameFilter) -> Vec<Student> {
        tracing::info!(prefix = filter.prefix(), "Listing students");
        let store = self.store.lock().await;
        if store.is_empty() {
            return Vec::new();
        }
        store
            .values()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect()
    }

    async fn get(&self, id: i64) -> Result<Student, StudentError> {
        tracing::info!(id, "Getting student");
        let store = self.store.lock().await;
        match store.get(id) {
            Some(student) => Ok(student.clone()),
            None => {
                self.metrics.record_not_found();
                Err(StudentError::NotFound(id))
            }
        }
    }

    async fn create(&self, payload: StudentPayload) -> Result<Student, StudentError> {
        let student = payload.into_student()?;
        let mut store = self.store.lock().await;
        if store.contains(student.id) {
            tracing::warn!(id = student.id, "Student id already present");
            self.metrics.record_conflict();
            return Err(StudentError::Conflict(student.id));
        }
        store.put(student.id, student.clone());
        self.metrics.record_created();
        tracing::info!(id = student.id, name = %student.name, "Inserted student");
        Ok(student)
    }

    async fn update(
        &self,
        path_id: i64,
        payload: StudentPayload,
    ) -> Result<Student, StudentError> {
        tracing::info!(id = path_id, "Updating student");
        let mut store = self.store.lock().await;
        // Existence is checked on the body id; the write is keyed on the path id.
        let body_id = match payload.id {
            Some(id) if store.contains(id) => id,
            other => {
                self.metrics.record_not_found();
                return Err(StudentError::NotFound(other.unwrap_or(path_id)));
            }
        };
        if body_id != path_id {
            tracing::warn!(path_id, body_id, "Update path id differs from body id");
        }
        let student = Student {
            id: body_id,
            name: payload.name,
        };
        store.put(path_id, student.clone());
        self.metrics.record_updated();
        Ok(student)
    }

    async fn delete(&self, id: i64) -> Result<(), StudentError> {
        tracing::info!(id, "Deleting student");
        let mut store = self.store.lock().await;
        match store.remove(id) {
            Some(_) => {
                self.metrics.record_deleted();
                Ok(())
            }
            None => {
                self.metrics.record_not_found();
                Err(StudentError::NotFound(id))
            }
        }
    }

    async fn metrics_snapshot(&self) -> MetricsSnapshot {
        let students = self.store.lock().await.len();
        self.metrics.snapshot(students)
    }
}
