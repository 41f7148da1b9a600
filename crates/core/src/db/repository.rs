use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewStudent, Student};

/// Storage operations for student records.
///
/// All operations run against a single flat table; there are no
/// relationships, soft deletes, or audit trails.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert one record and return its newly assigned id.
    async fn insert(&self, student: &NewStudent) -> Result<i64>;

    /// Insert a batch of records inside a single transaction. Either every
    /// record is committed or none are; returns the number inserted.
    async fn insert_many(&self, students: &[NewStudent]) -> Result<usize>;

    /// List records in natural retrieval order, optionally filtered by a
    /// substring match on name.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Student>>;

    /// Fetch one record by id.
    async fn get(&self, id: i64) -> Result<Option<Student>>;

    /// Update name and age for an existing record. Returns false when the id
    /// does not exist.
    async fn update(&self, id: i64, name: &str, age: i64) -> Result<bool>;

    /// Delete a record. Deleting a nonexistent id is a successful no-op;
    /// returns whether a row was actually removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;
}
