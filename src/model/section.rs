use serde::{Deserialize, Serialize};

use super::course::Course;
use super::person::{Professor, Student};

/// One offering of a course, taught by one professor, with its roster.
///
/// The course and professor are snapshots of registered entities; the
/// section does not own them. The roster never holds two students with the
/// same registration number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub code: String,
    pub course: Course,
    pub professor: Professor,
    students: Vec<Student>,
}

impl Section {
    pub fn new(code: impl Into<String>, course: Course, professor: Professor) -> Self {
        Self {
            code: code.into(),
            course,
            professor,
            students: Vec::new(),
        }
    }

    /// Adds a student to the roster. Returns `false` if already enrolled.
    pub fn enroll(&mut self, student: Student) -> bool {
        if self.is_enrolled(&student.registration) {
            return false;
        }
        self.students.push(student);
        true
    }

    /// Removes a student from the roster, returning it if present.
    pub fn withdraw(&mut self, registration: &str) -> Option<Student> {
        let pos = self
            .students
            .iter()
            .position(|s| s.registration == registration.trim())?;
        Some(self.students.remove(pos))
    }

    pub fn is_enrolled(&self, registration: &str) -> bool {
        self.students.iter().any(|s| s.registration == registration.trim())
    }

    /// Snapshot of the roster in enrollment order.
    pub fn roster(&self) -> Vec<Student> {
        self.students.clone()
    }

    pub fn enrollment_count(&self) -> usize {
        self.students.len()
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Section {}
