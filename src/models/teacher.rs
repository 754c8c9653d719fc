//! Teacher directory entries.
//!
//! Teachers are owned by an external directory and referenced by id.
//! Teaching load is derived from lectures and never stored here.

use serde::{Deserialize, Serialize};

/// Role of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeacherRole {
    /// Regular teaching staff.
    Teacher,
    /// Administrative staff (principal, coordinator).
    Administrator,
}

/// A teacher known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    pub role: TeacherRole,
}

impl Teacher {
    /// Creates a teacher with the `Teacher` role.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: TeacherRole::Teacher,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: TeacherRole) -> Self {
        self.role = role;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new("T1")
            .with_name("Ada")
            .with_role(TeacherRole::Administrator);
        assert_eq!(t.id, "T1");
        assert_eq!(t.name, "Ada");
        assert_eq!(t.role, TeacherRole::Administrator);
        assert_eq!(Teacher::new("T2").role, TeacherRole::Teacher);
    }
}
