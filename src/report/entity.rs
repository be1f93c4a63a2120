use std::fmt::Write;

use serde::Serialize;

use super::Render;
use crate::model::{GradeItem, GradeStatus, Role};
use crate::state::AppState;

/// One section's grades for a student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSectionGrades {
    pub section_code: String,
    pub items: Vec<GradeItem>,
    pub average: f64,
    pub status: GradeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub name: String,
    pub registration: String,
    pub course_name: String,
    pub email: Option<String>,
    pub enrolled_sections: Vec<String>,
    pub grades: Vec<StudentSectionGrades>,
}

impl StudentReport {
    pub fn build(state: &AppState, registration: &str) -> Option<Self> {
        let student = state.students.get(registration)?;
        let email = state.users.iter().find_map(|u| match &u.role {
            Role::Student { registration: r } if r == registration => Some(u.email.clone()),
            _ => None,
        });
        let grades = state
            .grades
            .grades_for_student(registration)
            .into_iter()
            .map(|(section_code, g)| StudentSectionGrades {
                section_code,
                average: g.weighted_average(),
                status: g.status(),
                items: g.items,
            })
            .collect();

        Some(Self {
            name: student.name.clone(),
            registration: student.registration.clone(),
            course_name: student.course_name.clone(),
            email,
            enrolled_sections: state
                .sections
                .find_by_student(registration)
                .into_iter()
                .map(|s| s.code)
                .collect(),
            grades,
        })
    }
}

impl Render for StudentReport {
    fn title(&self) -> String {
        format!("STUDENT REPORT - {}", self.name)
    }

    fn body(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Name: {}", self.name);
        let _ = writeln!(out, "Registration: {}", self.registration);
        let _ = writeln!(out, "Course: {}", self.course_name);
        if let Some(email) = &self.email {
            let _ = writeln!(out, "Email: {email}");
        }
        if !self.enrolled_sections.is_empty() {
            let _ = writeln!(out, "Sections: {}", self.enrolled_sections.join(", "));
        }

        if self.grades.is_empty() {
            let _ = writeln!(out, "\nNo grades recorded.");
            return out;
        }
        for section in &self.grades {
            let _ = writeln!(out, "\nGRADES - {}:", section.section_code);
            for item in &section.items {
                let _ = writeln!(
                    out,
                    "  - {} ({}): {:.1} (weight: {:.2})",
                    item.description, item.category, item.score, item.weight
                );
            }
            let _ = writeln!(out, "Final average: {:.2}", section.average);
            let _ = writeln!(out, "Status: {}", section.status);
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessorReport {
    pub name: String,
    pub specialty: String,
    pub registration: String,
    pub email: Option<String>,
    pub sections: Vec<String>,
}

impl ProfessorReport {
    pub fn build(state: &AppState, registration: &str) -> Option<Self> {
        let professor = state.professors.get(registration)?;
        let email = state.users.iter().find_map(|u| match &u.role {
            Role::Professor {
                registration: r, ..
            } if r == registration => Some(u.email.clone()),
            _ => None,
        });
        Some(Self {
            name: professor.name.clone(),
            specialty: professor.specialty.clone(),
            registration: professor.registration.clone(),
            email,
            sections: state
                .sections
                .find_by_professor(registration)
                .into_iter()
                .map(|s| s.code)
                .collect(),
        })
    }
}

impl Render for ProfessorReport {
    fn title(&self) -> String {
        format!("PROFESSOR REPORT - {}", self.name)
    }

    fn body(&self) -> String {
        let mut out = format!(
            "Name: {}\nSpecialty: {}\nRegistration: {}\n",
            self.name, self.specialty, self.registration
        );
        if let Some(email) = &self.email {
            let _ = writeln!(out, "Email: {email}");
        }
        if self.sections.is_empty() {
            out.push_str("Sections: none\n");
        } else {
            let _ = writeln!(out, "Sections: {}", self.sections.join(", "));
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub name: String,
    pub code: String,
    pub hours: u32,
    pub kind: String,
    pub detail: Option<String>,
    pub sections: Vec<String>,
    pub students: Vec<String>,
}

impl CourseReport {
    pub fn build(state: &AppState, code: &str) -> Option<Self> {
        let course = state.courses.get(code)?;
        Some(Self {
            name: course.name.clone(),
            code: course.code.clone(),
            hours: course.hours,
            kind: course.kind.label().to_string(),
            detail: course.kind.detail(),
            sections: state
                .sections
                .find_by_course(&course.code)
                .into_iter()
                .map(|s| s.code)
                .collect(),
            students: state
                .students
                .find_by_course(&course.name)
                .into_iter()
                .map(|s| s.name)
                .collect(),
        })
    }
}

impl Render for CourseReport {
    fn title(&self) -> String {
        format!("COURSE REPORT - {}", self.name)
    }

    fn body(&self) -> String {
        let mut out = format!(
            "Name: {}\nCode: {}\nHours: {}\nType: {}\n",
            self.name, self.code, self.hours, self.kind
        );
        if let Some(detail) = &self.detail {
            let _ = writeln!(out, "{detail}");
        }
        let _ = writeln!(out, "Sections offered: {}", self.sections.len());
        let _ = writeln!(out, "Students in course: {}", self.students.len());
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub name: String,
    pub registration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub code: String,
    pub professor: String,
    pub course: String,
    pub enrollment_count: usize,
    pub roster: Vec<RosterEntry>,
}

impl SectionReport {
    pub fn build(state: &AppState, code: &str) -> Option<Self> {
        let section = state.sections.get(code)?;
        Some(Self {
            code: section.code.clone(),
            professor: section.professor.name.clone(),
            course: section.course.name.clone(),
            enrollment_count: section.enrollment_count(),
            roster: section
                .roster()
                .into_iter()
                .map(|s| RosterEntry {
                    name: s.name,
                    registration: s.registration,
                })
                .collect(),
        })
    }
}

impl Render for SectionReport {
    fn title(&self) -> String {
        format!("SECTION REPORT - {}", self.code)
    }

    fn body(&self) -> String {
        let mut out = format!(
            "Code: {}\nProfessor: {}\nCourse: {}\nStudents enrolled: {}\n",
            self.code, self.professor, self.course, self.enrollment_count
        );
        if !self.roster.is_empty() {
            out.push_str("\nRoster:\n");
            for entry in &self.roster {
                let _ = writeln!(out, "- {} ({})", entry.name, entry.registration);
            }
        }
        out
    }
}

/// A student's standing within one section.
#[derive(Debug, Clone, Serialize)]
pub struct StudentStanding {
    pub name: String,
    pub registration: String,
    pub average: f64,
    pub status: GradeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionGradesReport {
    pub section_code: String,
    pub course: String,
    pub professor: String,
    pub average: f64,
    pub best_student: Option<String>,
    pub students: Vec<StudentStanding>,
}

impl SectionGradesReport {
    /// `None` when the section has no grades yet.
    pub fn build(state: &AppState, section_code: &str) -> Option<Self> {
        let grades = state.grades.get(section_code)?;
        let section = state.sections.get(section_code);
        Some(Self {
            section_code: grades.section_code.clone(),
            course: section.map_or_else(|| "-".to_string(), |s| s.course.name.clone()),
            professor: section.map_or_else(|| "-".to_string(), |s| s.professor.name.clone()),
            average: grades.section_average(),
            best_student: grades.best_student().map(|s| s.name.clone()),
            students: grades
                .students
                .iter()
                .map(|g| StudentStanding {
                    name: g.student.name.clone(),
                    registration: g.student.registration.clone(),
                    average: g.weighted_average(),
                    status: g.status(),
                })
                .collect(),
        })
    }
}

impl Render for SectionGradesReport {
    fn title(&self) -> String {
        format!("GRADES REPORT - {}", self.section_code)
    }

    fn body(&self) -> String {
        let mut out = format!(
            "Section: {}\nCourse: {}\nProfessor: {}\nSection average: {:.2}\n",
            self.section_code, self.course, self.professor, self.average
        );
        if let Some(best) = &self.best_student {
            let _ = writeln!(out, "Best student: {best}");
        }
        out.push_str("\nSTUDENT PERFORMANCE:\n");
        for s in &self.students {
            let _ = writeln!(
                out,
                "  {} - Average: {:.2} - Status: {}",
                s.name, s.average, s.status
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseType;
    use crate::service::EducationService;

    fn seeded() -> EducationService {
        let mut service = EducationService::new(4);
        assert!(service.load_sample_data().is_success());
        service
    }

    #[test]
    fn student_report_lists_items_average_and_status() {
        let service = seeded();
        let report = StudentReport::build(service.state(), "002").unwrap();
        assert_eq!(report.enrolled_sections, vec!["TURMA2024"]);
        assert_eq!(report.grades.len(), 1);
        assert!((report.grades[0].average - 8.4).abs() < 1e-9);

        let body = report.body();
        assert!(body.contains("  - Prova 1 (Prova): 9.0 (weight: 0.30)"));
        assert!(body.contains("Final average: 8.40"));
        assert!(body.contains("Status: PASS"));
        assert_eq!(report.title(), "STUDENT REPORT - Maria Silva");
    }

    #[test]
    fn student_without_grades_says_so() {
        let service = seeded();
        let report = StudentReport::build(service.state(), "003").unwrap();
        assert!(report.body().contains("No grades recorded."));
        assert!(StudentReport::build(service.state(), "999").is_none());
    }

    #[test]
    fn student_report_picks_up_linked_email() {
        let service = seeded();
        let report = StudentReport::build(service.state(), "24231215-5").unwrap();
        assert_eq!(report.email.as_deref(), Some("jean@edu.com"));
    }

    #[test]
    fn professor_report_lists_sections() {
        let service = seeded();
        let report = ProfessorReport::build(service.state(), "PROF001").unwrap();
        assert_eq!(report.sections, vec!["TURMA2024"]);
        assert_eq!(report.email.as_deref(), Some("carlos@edu.com"));
        assert!(report.body().contains("Specialty: POO"));
    }

    #[test]
    fn course_report_shows_variant_detail() {
        let service = seeded();
        let remote = CourseReport::build(service.state(), "py101").unwrap();
        assert_eq!(remote.kind, "Remote");
        assert!(remote.body().contains("Platform: Plataforma Virtual"));

        let plain = CourseReport::build(service.state(), "JAVA101").unwrap();
        assert!(plain.detail.is_none());
        assert_eq!(plain.students.len(), 2);
        assert_eq!(plain.sections, vec!["TURMA2024"]);
    }

    #[test]
    fn section_report_lists_roster() {
        let service = seeded();
        let report = SectionReport::build(service.state(), "TURMA2024").unwrap();
        assert_eq!(report.enrollment_count, 2);
        assert!(report.body().contains("- Maria Silva (002)"));
        assert_eq!(report.professor, "Carlos");
    }

    #[test]
    fn grades_report_shows_best_student_and_average() {
        let service = seeded();
        let report = SectionGradesReport::build(service.state(), "TURMA2024").unwrap();
        assert_eq!(report.best_student.as_deref(), Some("Maria Silva"));
        assert!((report.average - 8.25).abs() < 1e-9);
        let body = report.body();
        assert!(body.contains("Section average: 8.25"));
        assert!(body.contains("Maria Silva - Average: 8.40 - Status: PASS"));
    }

    #[test]
    fn grades_report_absent_for_ungraded_section() {
        let mut service = seeded();
        service.register_course("Redes", "RED1", 40, CourseType::Plain, "");
        service.create_section("T9", "RED1", "PROF001");
        assert!(SectionGradesReport::build(service.state(), "T9").is_none());
    }
}
