use serde::{Deserialize, Serialize};

/// A student record as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    /// Auto-assigned rowid, unique and immutable for the record's lifetime.
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// A student record prior to insertion, before an id has been assigned.
///
/// Manual adds and every importer produce these; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_serde_roundtrip() {
        let student = Student {
            id: 7,
            name: "Alice".to_string(),
            age: 20,
        };
        let json = serde_json::to_string(&student).unwrap();
        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(back, student);
    }

    #[test]
    fn new_student_constructor() {
        let s = NewStudent::new("Bob", 21);
        assert_eq!(s.name, "Bob");
        assert_eq!(s.age, 21);
    }
}
