use log::{info, warn};
use serde::Serialize;

use super::Repository;
use crate::model::{
    Course, CourseType, Credentials, Role, Section, SectionGrades, Student, StudentGrades, User,
};

/// Histogram of registered courses by delivery format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourseTypeCounts {
    pub plain: usize,
    pub in_person: usize,
    pub remote: usize,
}

/// Histogram of users by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub students: usize,
    pub professors: usize,
    pub admins: usize,
}

impl Repository<Student> {
    pub fn find_by_course(&self, course_name: &str) -> Vec<Student> {
        let wanted = course_name.trim().to_lowercase();
        self.iter()
            .filter(|s| s.course_name.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub fn exists_in_course(&self, course_name: &str) -> bool {
        let wanted = course_name.trim().to_lowercase();
        self.iter().any(|s| s.course_name.to_lowercase() == wanted)
    }
}

impl Repository<Course> {
    pub fn find_by_name(&self, name: &str) -> Option<Course> {
        self.iter().find(|c| c.has_name(name)).cloned()
    }

    pub fn exists_by_name(&self, name: &str) -> bool {
        self.iter().any(|c| c.has_name(name))
    }

    pub fn count_by_type(&self) -> CourseTypeCounts {
        self.iter()
            .fold(CourseTypeCounts::default(), |mut counts, course| {
                match course.kind.course_type() {
                    CourseType::Plain => counts.plain += 1,
                    CourseType::InPerson => counts.in_person += 1,
                    CourseType::Remote => counts.remote += 1,
                }
                counts
            })
    }
}

impl Repository<Section> {
    pub fn find_by_course(&self, course_code: &str) -> Vec<Section> {
        self.iter()
            .filter(|s| s.course.has_code(course_code))
            .cloned()
            .collect()
    }

    pub fn exists_with_course(&self, course_code: &str) -> bool {
        self.iter().any(|s| s.course.has_code(course_code))
    }

    pub fn find_by_professor(&self, registration: &str) -> Vec<Section> {
        self.iter()
            .filter(|s| s.professor.registration == registration)
            .cloned()
            .collect()
    }

    pub fn find_by_student(&self, registration: &str) -> Vec<Section> {
        self.iter()
            .filter(|s| s.is_enrolled(registration))
            .cloned()
            .collect()
    }
}

impl Repository<User> {
    pub fn find_by_login(&self, login: &str) -> Option<User> {
        self.iter().find(|u| u.login == login.trim()).cloned()
    }

    pub fn exists_login(&self, login: &str) -> bool {
        self.iter().any(|u| u.login == login.trim())
    }

    /// The user owning `credentials.login`, if the password verifies.
    ///
    /// Logins are unique, so at most one hash is checked.
    pub fn authenticate(&self, credentials: &Credentials) -> Option<User> {
        let user = self.find_by_login(&credentials.login)?;
        let result = user.authenticate(credentials);
        if result.success {
            info!("{}", result.message);
            Some(user)
        } else {
            warn!("Authentication failed for login '{}'", credentials.login);
            None
        }
    }

    pub fn count_by_role(&self) -> RoleCounts {
        self.iter().fold(RoleCounts::default(), |mut counts, user| {
            match user.role {
                Role::Student { .. } => counts.students += 1,
                Role::Professor { .. } => counts.professors += 1,
                Role::Admin => counts.admins += 1,
            }
            counts
        })
    }
}

impl Repository<SectionGrades> {
    /// Number of (section, student) grade lists.
    pub fn total_students_graded(&self) -> usize {
        self.iter().map(|g| g.students.len()).sum()
    }

    pub fn total_items(&self) -> usize {
        self.iter().map(SectionGrades::item_count).sum()
    }

    /// Every section in which the student has grades, as (section code, grades).
    pub fn grades_for_student(&self, registration: &str) -> Vec<(String, StudentGrades)> {
        self.iter()
            .filter_map(|section| {
                section
                    .student_grades(registration)
                    .map(|grades| (section.section_code.clone(), grades.clone()))
            })
            .collect()
    }
}
