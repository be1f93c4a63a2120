//! Referential-integrity and field checks over read-only repositories.
//!
//! Validators never mutate and never fail as Rust errors. Multi-field checks
//! evaluate every rule and report every failure, in rule order.

use serde::Serialize;

use crate::model::CourseKind;
use crate::repository::{
    CourseRepository, ProfessorRepository, SectionRepository, StudentRepository, UserRepository,
};

/// Result of a validation: a verdict, a summary, and one line per failed rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
    pub details: Vec<String>,
}

impl Validation {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Single-rule failure.
    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: "Validation failed".to_string(),
            details: vec![detail.into()],
        }
    }

    /// Aggregated failure over every broken rule.
    pub fn fail_all(details: Vec<String>) -> Self {
        Self {
            valid: false,
            message: format!("Validation errors: {}", details.join(", ")),
            details,
        }
    }

    /// Success when `errors` is empty, otherwise an aggregated failure.
    fn from_errors(errors: Vec<String>, ok_message: &str) -> Self {
        if errors.is_empty() {
            Self::ok(ok_message)
        } else {
            Self::fail_all(errors)
        }
    }

    pub fn joined(&self) -> String {
        self.details.join(", ")
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Borrows the repositories it checks against.
pub struct Validator<'a> {
    pub courses: &'a CourseRepository,
    pub students: &'a StudentRepository,
    pub professors: &'a ProfessorRepository,
    pub sections: &'a SectionRepository,
    pub users: &'a UserRepository,
}

impl Validator<'_> {
    pub fn course_exists(&self, code: &str) -> Validation {
        if is_blank(code) {
            return Validation::fail("Course code must not be blank");
        }
        if !self.courses.exists(code) {
            return Validation::fail(format!("Course with code '{code}' not found"));
        }
        Validation::ok(format!("Course '{code}' is valid"))
    }

    pub fn course_exists_by_name(&self, name: &str) -> Validation {
        if is_blank(name) {
            return Validation::fail("Course name must not be blank");
        }
        if !self.courses.exists_by_name(name) {
            return Validation::fail(format!("Course '{name}' not found"));
        }
        Validation::ok(format!("Course '{name}' is valid"))
    }

    pub fn student_can_enroll(&self, registration: &str, course_code: &str) -> Validation {
        if !self.students.exists(registration) {
            return Validation::fail(format!(
                "Student with registration '{registration}' not found"
            ));
        }
        let course = self.course_exists(course_code);
        if !course.valid {
            return course;
        }
        Validation::ok("Student can be enrolled in the course")
    }

    pub fn student_registration(
        &self,
        name: &str,
        registration: &str,
        course_name: &str,
    ) -> Validation {
        let mut errors = Vec::new();

        if is_blank(name) {
            errors.push("Name must not be blank".to_string());
        }
        if is_blank(registration) {
            errors.push("Registration must not be blank".to_string());
        }
        // Blank course names are reported by the existence check.
        let course = self.course_exists_by_name(course_name);
        if !course.valid {
            errors.extend(course.details);
        }
        if !is_blank(registration) && self.students.exists(registration) {
            errors.push(format!("Registration '{registration}' is already registered"));
        }

        Validation::from_errors(errors, "Student data is valid")
    }

    pub fn professor_registration(
        &self,
        name: &str,
        specialty: &str,
        registration: &str,
    ) -> Validation {
        let mut errors = Vec::new();

        if is_blank(name) {
            errors.push("Name must not be blank".to_string());
        }
        if is_blank(specialty) {
            errors.push("Specialty must not be blank".to_string());
        }
        if is_blank(registration) {
            errors.push("Registration must not be blank".to_string());
        } else if self.professors.exists(registration) {
            errors.push(format!(
                "Professor registration '{registration}' is already registered"
            ));
        }

        Validation::from_errors(errors, "Professor data is valid")
    }

    pub fn course_registration(
        &self,
        name: &str,
        code: &str,
        hours: u32,
        kind: &CourseKind,
    ) -> Validation {
        let mut errors = Vec::new();

        if is_blank(name) {
            errors.push("Course name must not be blank".to_string());
        } else if self.courses.exists_by_name(name) {
            errors.push(format!("Course '{name}' already exists"));
        }
        if is_blank(code) {
            errors.push("Course code must not be blank".to_string());
        } else if self.courses.exists(code) {
            errors.push(format!("Course with code '{code}' already exists"));
        }
        if hours == 0 {
            errors.push("Hours must be a positive number".to_string());
        }
        match kind {
            CourseKind::Plain => {}
            CourseKind::InPerson { room } if is_blank(room) => {
                errors.push("Room must not be blank for in-person courses".to_string());
            }
            CourseKind::Remote { platform } if is_blank(platform) => {
                errors.push("Platform must not be blank for remote courses".to_string());
            }
            CourseKind::InPerson { .. } | CourseKind::Remote { .. } => {}
        }

        Validation::from_errors(errors, "Course data is valid")
    }

    pub fn section_creation(
        &self,
        code: &str,
        course_code: &str,
        professor_registration: &str,
    ) -> Validation {
        let mut errors = Vec::new();

        if is_blank(code) {
            errors.push("Section code must not be blank".to_string());
        } else if self.sections.exists(code) {
            errors.push(format!("Section with code '{code}' already exists"));
        }
        let course = self.course_exists(course_code);
        if !course.valid {
            errors.extend(course.details);
        }
        if !self.professors.exists(professor_registration) {
            errors.push(format!(
                "Professor with registration '{professor_registration}' not found"
            ));
        }

        Validation::from_errors(errors, "Section data is valid")
    }

    pub fn grade_item(&self, score: f64, weight: f64, category: &str) -> Validation {
        let mut errors = Vec::new();

        // Written so that NaN fails both checks.
        if !(0.0..=10.0).contains(&score) {
            errors.push("Score must be between 0 and 10".to_string());
        }
        if !(weight > 0.0 && weight <= 1.0) {
            errors.push("Weight must be greater than 0 and at most 1".to_string());
        }
        if is_blank(category) {
            errors.push("Category must not be blank".to_string());
        }

        Validation::from_errors(errors, "Grade item is valid")
    }

    pub fn user_registration(
        &self,
        name: &str,
        email: &str,
        login: &str,
        password: &str,
    ) -> Validation {
        let mut errors = Vec::new();

        if is_blank(name) {
            errors.push("Name must not be blank".to_string());
        }
        if is_blank(email) {
            errors.push("Email must not be blank".to_string());
        } else if self.users.exists(email) {
            errors.push(format!("Email '{email}' is already in use"));
        }
        if is_blank(login) {
            errors.push("Login must not be blank".to_string());
        } else if self.users.exists_login(login) {
            errors.push(format!("Login '{login}' is already in use"));
        }
        if password.is_empty() {
            errors.push("Password must not be empty".to_string());
        }

        Validation::from_errors(errors, "User data is valid")
    }
}
