use crate::repository::{
    CourseRepository, GradeRepository, ProfessorRepository, SectionRepository, StudentRepository,
    UserRepository,
};
use crate::validator::Validator;

/// Every repository of a running session, owned in one place.
///
/// Built once at start-up and handed to the service; nothing is global.
#[derive(Debug, Clone)]
pub struct AppState {
    pub students: StudentRepository,
    pub professors: ProfessorRepository,
    pub courses: CourseRepository,
    pub sections: SectionRepository,
    pub users: UserRepository,
    pub grades: GradeRepository,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            students: StudentRepository::new(),
            professors: ProfessorRepository::new(),
            courses: CourseRepository::new(),
            sections: SectionRepository::new(),
            users: UserRepository::new(),
            grades: GradeRepository::new(),
        }
    }

    /// Read-only validator over the current repositories.
    pub fn validator(&self) -> Validator<'_> {
        Validator {
            courses: &self.courses,
            students: &self.students,
            professors: &self.professors,
            sections: &self.sections,
            users: &self.users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_empty() {
        let state = AppState::new();
        assert!(state.students.is_empty());
        assert!(state.courses.is_empty());
        assert!(state.sections.is_empty());
        assert!(state.users.is_empty());
        assert!(state.grades.is_empty());
        assert!(!state.validator().course_exists("C1").valid);
    }
}
