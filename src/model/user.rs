use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EduError;

/// What a user is allowed to act as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Student { registration: String },
    Professor { registration: String, specialty: String },
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student { .. } => write!(f, "STUDENT"),
            Role::Professor { .. } => write!(f, "PROFESSOR"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
}

/// A credential-bearing user, identified by email.
///
/// Only a salted bcrypt hash of the password is kept.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub login: String,
    #[serde(skip_serializing)]
    password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        login: impl Into<String>,
        password: &str,
        role: Role,
        cost: u32,
    ) -> Result<Self, EduError> {
        let password_hash = bcrypt::hash(password, cost)?;
        Ok(Self {
            name: name.into(),
            email: email.into(),
            login: login.into(),
            password_hash,
            role,
        })
    }

    /// Succeeds iff the login matches and the password verifies.
    pub fn authenticate(&self, credentials: &Credentials) -> AuthResult {
        let verified = self.login == credentials.login
            && bcrypt::verify(&credentials.password, &self.password_hash).unwrap_or(false);

        if verified {
            AuthResult {
                success: true,
                message: format!("{} {} authenticated", self.role, self.name),
            }
        } else {
            AuthResult {
                success: false,
                message: "Authentication failed: invalid login or password".to_string(),
            }
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for User {}
