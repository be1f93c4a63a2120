use serde::{Deserialize, Serialize};

/// A student, identified by registration number.
///
/// `course_name` is a free-text reference to a [`Course`](super::Course) by
/// name. Students are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub registration: String,
    pub course_name: String,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        registration: impl Into<String>,
        course_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            registration: registration.into(),
            course_name: course_name.into(),
        }
    }
}

// Equality is by registration number only.
impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.registration == other.registration
    }
}

impl Eq for Student {}

/// A professor, identified by registration code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    pub name: String,
    pub specialty: String,
    pub registration: String,
}

impl Professor {
    pub fn new(
        name: impl Into<String>,
        specialty: impl Into<String>,
        registration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            registration: registration.into(),
        }
    }
}

impl PartialEq for Professor {
    fn eq(&self, other: &Self) -> bool {
        self.registration == other.registration
    }
}

impl Eq for Professor {}
