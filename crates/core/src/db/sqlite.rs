use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::error::Result;
use crate::models::{NewStudent, Student};

use super::repository::StudentStore;

/// SQLite-backed student store. Owns the connection pool; clones share it.
#[derive(Clone)]
pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_student(r: &sqlx::sqlite::SqliteRow) -> Student {
    Student {
        id: r.get("id"),
        name: r.get("name"),
        age: r.get("age"),
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn insert(&self, student: &NewStudent) -> Result<i64> {
        let result = sqlx::query("INSERT INTO students (name, age) VALUES (?1, ?2)")
            .bind(&student.name)
            .bind(student.age)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn insert_many(&self, students: &[NewStudent]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for student in students {
            sqlx::query("INSERT INTO students (name, age) VALUES (?1, ?2)")
                .bind(&student.name)
                .bind(student.age)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(students.len())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Student>> {
        let rows = match search {
            Some(q) if !q.is_empty() => {
                sqlx::query("SELECT id, name, age FROM students WHERE name LIKE ?1")
                    .bind(format!("%{q}%"))
                    .fetch_all(&self.pool)
                    .await?
            }
            _ => {
                sqlx::query("SELECT id, name, age FROM students")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.iter().map(row_to_student).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Student>> {
        let row = sqlx::query("SELECT id, name, age FROM students WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_student))
    }

    async fn update(&self, id: i64, name: &str, age: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE students SET name = ?1, age = ?2 WHERE id = ?3")
            .bind(name)
            .bind(age)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("total"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabasePool;

    async fn test_store() -> SqliteStudentStore {
        let pool = DatabasePool::new_sqlite_memory().await.unwrap();
        let DatabasePool::Sqlite(p) = pool;
        SqliteStudentStore::new(p)
    }

    #[tokio::test]
    async fn insert_then_list_returns_single_record() {
        let store = test_store().await;
        let id = store.insert(&NewStudent::new("Alice", 20)).await.unwrap();

        let students = store.list(None).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, id);
        assert_eq!(students[0].name, "Alice");
        assert_eq!(students[0].age, 20);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let store = test_store().await;
        let a = store.insert(&NewStudent::new("Alice", 20)).await.unwrap();
        let b = store.insert(&NewStudent::new("Bob", 21)).await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn get_returns_record_or_none() {
        let store = test_store().await;
        let id = store.insert(&NewStudent::new("Alice", 20)).await.unwrap();

        let found = store.get(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Alice");

        assert!(store.get(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_existing_record() {
        let store = test_store().await;
        let id = store.insert(&NewStudent::new("Alice", 20)).await.unwrap();

        let updated = store.update(id, "Alicia", 21).await.unwrap();
        assert!(updated);

        let found = store.get(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Alicia");
        assert_eq!(found.age, 21);
    }

    #[tokio::test]
    async fn update_nonexistent_returns_false() {
        let store = test_store().await;
        let updated = store.update(999, "Nobody", 0).await.unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn delete_nonexistent_is_noop() {
        let store = test_store().await;
        store.insert(&NewStudent::new("Alice", 20)).await.unwrap();

        let removed = store.delete(999).await.unwrap();
        assert!(!removed);

        // Store unchanged.
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_existing_record() {
        let store = test_store().await;
        let id = store.insert(&NewStudent::new("Alice", 20)).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_with_substring_filter() {
        let store = test_store().await;
        store.insert(&NewStudent::new("Alice", 20)).await.unwrap();
        store.insert(&NewStudent::new("Bob", 21)).await.unwrap();
        store.insert(&NewStudent::new("Malicia", 22)).await.unwrap();

        let hits = store.list(Some("lic")).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|s| s.name.contains("lic")));

        let none = store.list(Some("zzz")).await.unwrap();
        assert!(none.is_empty());

        // Empty search behaves like no filter.
        let all = store.list(Some("")).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn insert_many_commits_all_rows() {
        let store = test_store().await;
        let batch = vec![
            NewStudent::new("Bob", 21),
            NewStudent::new("Carol", 22),
            NewStudent::new("Dave", 23),
        ];

        let inserted = store.insert_many(&batch).await.unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_many_empty_batch() {
        let store = test_store().await;
        assert_eq!(store.insert_many(&[]).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn no_validation_beyond_not_null() {
        // Age range and post-trim emptiness are deliberately unchecked.
        let store = test_store().await;
        store.insert(&NewStudent::new("  ", -5)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
