//! Write operations over the application state.
//!
//! Each operation validates, then mutates, then reports an [`Outcome`].
//! Anything that goes wrong below this layer is caught by [`guarded`] and
//! degraded to a failure outcome.

mod outcome;
mod seed;

use anyhow::Result;
use log::{error, info, warn};

use crate::error::EduError;
use crate::model::{
    Course, CourseType, Credentials, GradeItem, Professor, Role, Section, SectionGrades, Student,
    User,
};
use crate::state::AppState;

pub use outcome::Outcome;

/// Runs `op`, converting any error it returns into a generic failure.
fn guarded<T>(operation: &str, op: impl FnOnce() -> Result<Outcome<T>>) -> Outcome<T> {
    match op() {
        Ok(outcome) => {
            if !outcome.is_success() {
                warn!("{operation} rejected: {}", outcome.message());
            }
            outcome
        }
        Err(e) => {
            error!("Unexpected error while {operation}: {e:#}");
            Outcome::failure(format!("Unexpected error while {operation}: {e}"))
        }
    }
}

/// Orchestrates validator and repositories for every write operation.
pub struct EducationService {
    state: AppState,
    password_cost: u32,
}

impl EducationService {
    /// `password_cost` is the bcrypt cost used for new users.
    pub fn new(password_cost: u32) -> Self {
        Self::with_state(AppState::new(), password_cost)
    }

    pub fn with_state(state: AppState, password_cost: u32) -> Self {
        Self {
            state,
            password_cost,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Independent copy; writes to it leave `self` untouched.
    pub fn sandbox(&self) -> Self {
        Self::with_state(self.state.clone(), self.password_cost)
    }

    pub fn register_student(
        &mut self,
        name: &str,
        registration: &str,
        course_name: &str,
    ) -> Outcome<Student> {
        guarded("registering student", || {
            let validation = self
                .state
                .validator()
                .student_registration(name, registration, course_name);
            if !validation.valid {
                return Ok(Outcome::from_validation("Could not register student", validation));
            }

            // Store the course's canonical name, not the user's spelling of it.
            let course = self
                .state
                .courses
                .find_by_name(course_name)
                .ok_or_else(|| EduError::Internal(format!("course '{course_name}' vanished")))?;
            let student = Student::new(name.trim(), registration.trim(), course.name.clone());
            self.state.students.save(student.clone());

            let message = format!(
                "Student {} registered in course {}",
                student.name, course.name
            );
            info!("{message}");
            Ok(Outcome::success(message, student))
        })
    }

    pub fn register_professor(
        &mut self,
        name: &str,
        specialty: &str,
        registration: &str,
    ) -> Outcome<Professor> {
        guarded("registering professor", || {
            let validation = self
                .state
                .validator()
                .professor_registration(name, specialty, registration);
            if !validation.valid {
                return Ok(Outcome::from_validation(
                    "Could not register professor",
                    validation,
                ));
            }

            let professor = Professor::new(name.trim(), specialty.trim(), registration.trim());
            self.state.professors.save(professor.clone());

            let message = format!("Professor {} registered", professor.name);
            info!("{message}");
            Ok(Outcome::success(message, professor))
        })
    }

    /// Registers a course, building the variant named by `course_type`.
    /// `extra` is the room (in-person) or platform (remote); ignored for plain courses.
    pub fn register_course(
        &mut self,
        name: &str,
        code: &str,
        hours: u32,
        course_type: CourseType,
        extra: &str,
    ) -> Outcome<Course> {
        guarded("registering course", || {
            let kind = course_type.into_kind(extra);
            let validation = self
                .state
                .validator()
                .course_registration(name, code, hours, &kind);
            if !validation.valid {
                return Ok(Outcome::from_validation("Could not register course", validation));
            }

            let course = Course::new(name.trim(), code.trim(), hours, kind);
            self.state.courses.save(course.clone());

            let message = format!("Course {} registered", course.name);
            info!("{message}");
            Ok(Outcome::success(message, course))
        })
    }

    pub fn create_section(
        &mut self,
        code: &str,
        course_code: &str,
        professor_registration: &str,
    ) -> Outcome<Section> {
        guarded("creating section", || {
            let validation = self.state.validator().section_creation(
                code,
                course_code,
                professor_registration,
            );
            if !validation.valid {
                return Ok(Outcome::from_validation("Could not create section", validation));
            }

            let course = self
                .state
                .courses
                .find_by_id(course_code)
                .ok_or_else(|| EduError::Internal(format!("course '{course_code}' vanished")))?;
            let professor = self
                .state
                .professors
                .find_by_id(professor_registration)
                .ok_or_else(|| {
                    EduError::Internal(format!("professor '{professor_registration}' vanished"))
                })?;
            let section = Section::new(code.trim(), course, professor);
            self.state.sections.save(section.clone());

            let message = format!(
                "Section {} created for course {}",
                section.code, section.course.name
            );
            info!("{message}");
            Ok(Outcome::success(message, section))
        })
    }

    /// Enrolls a registered student in a section of their own course.
    ///
    /// Enrolling someone who is already on the roster succeeds without
    /// changing it.
    pub fn enroll_student(&mut self, registration: &str, section_code: &str) -> Outcome<Section> {
        guarded("enrolling student", || {
            let Some(student) = self.state.students.find_by_id(registration) else {
                return Ok(Outcome::failure("Student not found"));
            };
            let Some(mut section) = self.state.sections.find_by_id(section_code) else {
                return Ok(Outcome::failure("Section not found"));
            };

            let validation = self
                .state
                .validator()
                .student_can_enroll(registration, &section.course.code);
            if !validation.valid {
                return Ok(Outcome::from_validation("Could not enroll student", validation));
            }
            if !section.course.has_name(&student.course_name) {
                return Ok(Outcome::failure(format!(
                    "Student '{}' is enrolled in course '{}', not '{}'",
                    student.name, student.course_name, section.course.name
                )));
            }

            if section.is_enrolled(&student.registration) {
                let message = format!(
                    "Student {} is already enrolled in section {}",
                    student.name, section.code
                );
                return Ok(Outcome::success(message, section));
            }

            let message = format!(
                "Student {} enrolled in section {}",
                student.name, section.code
            );
            section.enroll(student);
            self.state.sections.upsert(section.clone());

            info!("{message}");
            Ok(Outcome::success(message, section))
        })
    }

    pub fn withdraw_student(&mut self, registration: &str, section_code: &str) -> Outcome<Section> {
        guarded("withdrawing student", || {
            let Some(mut section) = self.state.sections.find_by_id(section_code) else {
                return Ok(Outcome::failure("Section not found"));
            };
            let Some(student) = section.withdraw(registration) else {
                return Ok(Outcome::failure(format!(
                    "Student '{registration}' is not enrolled in section '{section_code}'"
                )));
            };
            self.state.sections.upsert(section.clone());

            let message = format!(
                "Student {} withdrawn from section {}",
                student.name, section.code
            );
            info!("{message}");
            Ok(Outcome::success(message, section))
        })
    }

    /// Appends a grade item to an enrolled student's list within a section.
    ///
    /// Recording again for the same student adds to the list.
    pub fn record_grade(
        &mut self,
        section_code: &str,
        registration: &str,
        description: &str,
        category: &str,
        weight: f64,
        score: f64,
    ) -> Outcome<GradeItem> {
        guarded("recording grade", || {
            let validation = self.state.validator().grade_item(score, weight, category);
            if !validation.valid {
                return Ok(Outcome::from_validation("Invalid grade item", validation));
            }

            let Some(section) = self.state.sections.get(section_code) else {
                return Ok(Outcome::failure("Section not found"));
            };
            let Some(student) = self.state.students.find_by_id(registration) else {
                return Ok(Outcome::failure("Student not found"));
            };
            if !section.is_enrolled(registration) {
                return Ok(Outcome::failure(format!(
                    "Student '{}' is not enrolled in section '{}'",
                    student.name, section.code
                )));
            }

            let mut grades = self
                .state
                .grades
                .find_by_id(&section.code)
                .unwrap_or_else(|| SectionGrades::new(section.code.clone()));
            let item = GradeItem::new(description.trim(), category.trim(), weight, score);
            grades.student_grades_mut(&student).add(item.clone());
            let section_code = grades.section_code.clone();
            self.state.grades.upsert(grades);

            let message = format!(
                "Grade '{}' recorded for student {} in section {}",
                item.description, student.name, section_code
            );
            info!("{message}");
            Ok(Outcome::success(message, item))
        })
    }

    pub fn register_user(
        &mut self,
        name: &str,
        email: &str,
        login: &str,
        password: &str,
        role: Role,
    ) -> Outcome<User> {
        guarded("registering user", || {
            let validation = self
                .state
                .validator()
                .user_registration(name, email, login, password);
            if !validation.valid {
                return Ok(Outcome::from_validation("Could not register user", validation));
            }

            let user = User::new(
                name.trim(),
                email.trim(),
                login.trim(),
                password,
                role,
                self.password_cost,
            )?;
            self.state.users.save(user.clone());

            let message = format!("User {} ({}) registered", user.name, user.role);
            info!("{message}");
            Ok(Outcome::success(message, user))
        })
    }

    pub fn authenticate(&self, login: &str, password: &str) -> Outcome<User> {
        guarded("authenticating", || {
            let credentials = Credentials::new(login, password);
            Ok(match self.state.users.authenticate(&credentials) {
                Some(user) => {
                    let message = format!("Welcome, {}!", user.name);
                    Outcome::success(message, user)
                }
                None => Outcome::failure("Authentication failed: invalid login or password"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GradeStatus;

    const TEST_COST: u32 = 4;

    fn service() -> EducationService {
        let mut service = EducationService::new(TEST_COST);
        assert!(service
            .register_course("Intro", "C1", 40, CourseType::Plain, "")
            .is_success());
        assert!(service.register_professor("Paula", "Math", "P").is_success());
        service
    }

    fn with_section() -> EducationService {
        let mut service = service();
        assert!(service.register_student("Ana", "S1", "Intro").is_success());
        assert!(service.create_section("T1", "C1", "P").is_success());
        service
    }

    #[test]
    fn end_to_end_scenario_reaches_pass() {
        let mut service = with_section();

        let enrolled = service.enroll_student("S1", "T1");
        assert!(enrolled.is_success());
        let roster: Vec<_> = enrolled
            .value()
            .unwrap()
            .roster()
            .into_iter()
            .map(|s| s.registration)
            .collect();
        assert_eq!(roster, vec!["S1"]);

        assert!(service
            .record_grade("T1", "S1", "Quiz", "exam", 0.5, 8.0)
            .is_success());
        assert!(service
            .record_grade("T1", "S1", "Quiz 2", "exam", 0.5, 6.0)
            .is_success());

        let grades = service.state().grades.get("T1").unwrap();
        let ana = grades.student_grades("S1").unwrap();
        assert_eq!(ana.items.len(), 2);
        assert_eq!(ana.weighted_average(), 7.0);
        assert_eq!(ana.status(), GradeStatus::Pass);
    }

    #[test]
    fn registering_with_unknown_course_fails_and_stores_nothing() {
        let mut service = service();
        let outcome = service.register_student("Ana", "S1", "Nonexistent");
        assert!(!outcome.is_success());
        assert!(outcome
            .details()
            .iter()
            .any(|d| d == "Course 'Nonexistent' not found"));
        assert!(!service.state().students.exists("S1"));
    }

    #[test]
    fn student_keeps_canonical_course_name() {
        let mut service = service();
        let outcome = service.register_student("Ana", "S1", "intro");
        assert_eq!(outcome.value().unwrap().course_name, "Intro");
    }

    #[test]
    fn duplicate_course_code_or_name_leaves_repository_unchanged() {
        let mut service = service();
        assert!(!service
            .register_course("Other", "c1", 10, CourseType::Plain, "")
            .is_success());
        assert!(!service
            .register_course("INTRO", "C2", 10, CourseType::Plain, "")
            .is_success());
        assert_eq!(service.state().courses.len(), 1);
        assert!(service.state().courses.exists("C1"));
        assert!(service.state().courses.exists_by_name("Intro"));
        assert!(!service.state().courses.exists("C2"));
    }

    #[test]
    fn register_course_dispatches_on_type() {
        let mut service = service();
        let remote = service.register_course("Python", "PY101", 40, CourseType::Remote, "Moodle");
        assert_eq!(remote.value().unwrap().kind.label(), "Remote");
        let room = service.register_course("Java", "J1", 60, CourseType::InPerson, "Sala 301");
        assert_eq!(
            room.value().unwrap().kind.detail().as_deref(),
            Some("Room: Sala 301")
        );
    }

    #[test]
    fn section_requires_existing_course_and_professor() {
        let mut service = service();
        let outcome = service.create_section("T1", "C9", "NOPE");
        assert_eq!(
            outcome.details(),
            [
                "Course with code 'C9' not found".to_string(),
                "Professor with registration 'NOPE' not found".to_string(),
            ]
        );
        assert!(service.state().sections.is_empty());

        assert!(service.create_section("T1", "C1", "P").is_success());
        assert!(!service.create_section("T1", "C1", "P").is_success());
        assert_eq!(service.state().sections.len(), 1);
    }

    #[test]
    fn enrollment_is_idempotent() {
        let mut service = with_section();
        assert!(service.enroll_student("S1", "T1").is_success());
        let again = service.enroll_student("S1", "T1");
        assert!(again.is_success());
        assert!(again.message().contains("already enrolled"));
        assert_eq!(service.state().sections.get("T1").unwrap().enrollment_count(), 1);
    }

    #[test]
    fn enrollment_reports_missing_student_or_section() {
        let mut service = with_section();
        assert_eq!(service.enroll_student("S9", "T1").message(), "Student not found");
        assert_eq!(service.enroll_student("S1", "T9").message(), "Section not found");
    }

    #[test]
    fn enrollment_requires_matching_course() {
        let mut service = with_section();
        service.register_course("Python", "PY101", 40, CourseType::Remote, "Moodle");
        service.register_student("Pedro", "S3", "Python");

        let outcome = service.enroll_student("S3", "T1");
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.message(),
            "Student 'Pedro' is enrolled in course 'Python', not 'Intro'"
        );
        assert_eq!(service.state().sections.get("T1").unwrap().enrollment_count(), 0);
    }

    #[test]
    fn withdraw_removes_from_roster() {
        let mut service = with_section();
        service.enroll_student("S1", "T1");
        assert!(service.withdraw_student("S1", "T1").is_success());
        assert!(!service.withdraw_student("S1", "T1").is_success());
        assert_eq!(service.state().sections.get("T1").unwrap().enrollment_count(), 0);
    }

    #[test]
    fn withdrawn_student_keeps_recorded_grades() {
        let mut service = with_section();
        service.enroll_student("S1", "T1");
        assert!(service
            .record_grade("T1", "S1", "Quiz", "exam", 1.0, 8.0)
            .is_success());
        assert!(service.withdraw_student("S1", "T1").is_success());

        let grades = service.state().grades.get("T1").unwrap();
        assert_eq!(grades.students.len(), 1);
        assert_eq!(grades.section_average(), 8.0);

        let outcome = service.record_grade("T1", "S1", "Quiz 2", "exam", 1.0, 9.0);
        assert!(!outcome.is_success());
        assert!(outcome.details()[0].contains("not enrolled"));
        assert_eq!(service.state().grades.get("T1").unwrap().item_count(), 1);
    }

    #[test]
    fn grade_for_student_not_enrolled_fails() {
        let mut service = with_section();
        let outcome = service.record_grade("T1", "S1", "Quiz", "exam", 0.5, 8.0);
        assert!(!outcome.is_success());
        assert!(outcome.details()[0].contains("not enrolled"));
        assert!(service.state().grades.is_empty());
    }

    #[test]
    fn out_of_range_grades_are_not_persisted() {
        let mut service = with_section();
        service.enroll_student("S1", "T1");

        for (weight, score) in [(0.3, 15.0), (0.0, 8.0), (1.5, 8.0), (0.5, -0.1)] {
            let outcome = service.record_grade("T1", "S1", "Quiz", "exam", weight, score);
            assert!(!outcome.is_success(), "weight {weight} score {score}");
        }
        assert_eq!(service.state().grades.total_items(), 0);

        let outcome = service.record_grade("T1", "S1", "Quiz", "exam", 0.3, 15.0);
        assert_eq!(outcome.details(), ["Score must be between 0 and 10".to_string()]);
    }

    #[test]
    fn grade_lookups_fail_cleanly() {
        let mut service = with_section();
        assert_eq!(
            service.record_grade("T9", "S1", "Quiz", "exam", 0.5, 8.0).message(),
            "Section not found"
        );
        assert_eq!(
            service.record_grade("T1", "S9", "Quiz", "exam", 0.5, 8.0).message(),
            "Student not found"
        );
    }

    #[test]
    fn users_register_and_authenticate() {
        let mut service = service();
        let outcome =
            service.register_user("Admin", "admin@edu.com", "admin", "admin123", Role::Admin);
        assert!(outcome.is_success());
        assert!(!service
            .register_user("Other", "other@edu.com", "admin", "x", Role::Admin)
            .is_success());

        let ok = service.authenticate("admin", "admin123");
        assert_eq!(ok.message(), "Welcome, Admin!");
        assert!(!service.authenticate("admin", "wrong").is_success());
    }

    #[test]
    fn hashing_faults_become_failure_outcomes() {
        let mut service = EducationService::new(1);
        let outcome = service.register_user("Admin", "admin@edu.com", "admin", "pw", Role::Admin);
        assert!(!outcome.is_success());
        assert!(outcome
            .message()
            .starts_with("Unexpected error while registering user"));
        assert!(service.state().users.is_empty());
    }
}
