use serde::Serialize;

use super::{EducationService, Outcome};
use crate::model::{CourseType, Role};

/// Counts of what [`EducationService::load_sample_data`] created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub courses: usize,
    pub students: usize,
    pub professors: usize,
    pub users: usize,
    pub sections: usize,
    pub grade_items: usize,
}

// (description, category, weight)
const ASSESSMENTS: [(&str, &str, f64); 3] = [
    ("Prova 1", "Prova", 0.3),
    ("Trabalho", "Trabalho", 0.2),
    ("Prova Final", "Prova", 0.5),
];

impl EducationService {
    /// Loads the demonstration data set through the regular operations.
    ///
    /// Fails with one detail per rejected step, e.g. when run twice.
    pub fn load_sample_data(&mut self) -> Outcome<SeedSummary> {
        let mut summary = SeedSummary::default();
        let mut failures = Vec::new();

        let mut track = |ok: bool, message: &str, counter: &mut usize| {
            if ok {
                *counter += 1;
            } else {
                failures.push(message.to_string());
            }
        };

        for (name, code, hours, course_type, extra) in [
            ("Java OO", "JAVA101", 60, CourseType::Plain, ""),
            ("Java Avançado", "JAVA201", 80, CourseType::InPerson, "Sala 301"),
            ("Python", "PY101", 40, CourseType::Remote, "Plataforma Virtual"),
        ] {
            let outcome = self.register_course(name, code, hours, course_type, extra);
            track(outcome.is_success(), outcome.message(), &mut summary.courses);
        }

        for (name, registration, course) in [
            ("Jean Ricardo Land Miranda", "24231215-5", "Java OO"),
            ("Maria Silva", "002", "Java OO"),
            ("Pedro Santos", "003", "Python"),
        ] {
            let outcome = self.register_student(name, registration, course);
            track(outcome.is_success(), outcome.message(), &mut summary.students);
        }

        let outcome = self.register_professor("Carlos", "POO", "PROF001");
        track(outcome.is_success(), outcome.message(), &mut summary.professors);

        for (name, email, login, password, role) in [
            (
                "Jean",
                "jean@edu.com",
                "jean",
                "123",
                Role::Student {
                    registration: "24231215-5".into(),
                },
            ),
            (
                "Carlos",
                "carlos@edu.com",
                "carlos",
                "456",
                Role::Professor {
                    registration: "PROF001".into(),
                    specialty: "POO".into(),
                },
            ),
            ("Admin", "admin@edu.com", "admin", "admin123", Role::Admin),
        ] {
            let outcome = self.register_user(name, email, login, password, role);
            track(outcome.is_success(), outcome.message(), &mut summary.users);
        }

        let outcome = self.create_section("TURMA2024", "JAVA101", "PROF001");
        track(outcome.is_success(), outcome.message(), &mut summary.sections);

        let mut enrolled = 0;
        for registration in ["24231215-5", "002"] {
            let outcome = self.enroll_student(registration, "TURMA2024");
            track(outcome.is_success(), outcome.message(), &mut enrolled);
        }

        for (registration, scores) in [("24231215-5", [8.5, 9.0, 7.5]), ("002", [9.0, 8.5, 8.0])] {
            for ((description, category, weight), score) in ASSESSMENTS.iter().zip(scores) {
                let outcome = self.record_grade(
                    "TURMA2024",
                    registration,
                    description,
                    category,
                    *weight,
                    score,
                );
                track(outcome.is_success(), outcome.message(), &mut summary.grade_items);
            }
        }

        if failures.is_empty() {
            Outcome::success("Sample data loaded", summary)
        } else {
            Outcome::Failure {
                message: format!("Sample data partially loaded: {}", failures.join(", ")),
                details: failures,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GradeStatus;

    #[test]
    fn loads_the_full_sample_set() {
        let mut service = EducationService::new(4);
        let outcome = service.load_sample_data();
        assert!(outcome.is_success(), "{}", outcome.message());
        assert_eq!(
            *outcome.value().unwrap(),
            SeedSummary {
                courses: 3,
                students: 3,
                professors: 1,
                users: 3,
                sections: 1,
                grade_items: 6,
            }
        );

        let state = service.state();
        assert_eq!(state.sections.get("TURMA2024").unwrap().enrollment_count(), 2);
        let grades = state.grades.get("TURMA2024").unwrap();
        assert_eq!(grades.best_student().unwrap().name, "Maria Silva");
        assert_eq!(
            grades.student_grades("24231215-5").unwrap().status(),
            GradeStatus::Pass
        );
    }

    #[test]
    fn sample_users_can_log_in() {
        let mut service = EducationService::new(4);
        service.load_sample_data();
        assert!(service.authenticate("carlos", "456").is_success());
        assert!(service.authenticate("jean", "123").is_success());
    }

    #[test]
    fn loading_twice_reports_duplicates_without_duplicating() {
        let mut service = EducationService::new(4);
        service.load_sample_data();
        let second = service.load_sample_data();
        assert!(!second.is_success());
        assert!(second
            .details()
            .iter()
            .any(|d| d.contains("Course with code 'JAVA101' already exists")));
        assert_eq!(service.state().courses.len(), 3);
        assert_eq!(service.state().students.len(), 3);
    }
}
