use serde::{Deserialize, Serialize};

/// User entity - an account that posts, comments and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub mobile_no: String,
    pub email: String,
}

/// Fields of a user that callers may set, on create and on update alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub mobile_no: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: String, mobile_no: String, email: String) -> Self {
        Self {
            name,
            mobile_no,
            email,
        }
    }
}

impl User {
    /// Overwrite the mutable fields, leaving identity untouched.
    pub fn apply(&mut self, changes: NewUser) {
        self.name = changes.name;
        self.mobile_no = changes.mobile_no;
        self.email = changes.email;
    }
}
