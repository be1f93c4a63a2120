use std::fmt::Write;

use serde::Serialize;

use super::Render;
use crate::repository::{CourseTypeCounts, RoleCounts};
use crate::state::AppState;

/// Entity counts across every repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub students: usize,
    pub professors: usize,
    pub courses: usize,
    pub sections: usize,
    pub graded_students: usize,
    pub grade_items: usize,
    pub users: usize,
}

impl Totals {
    pub fn collect(state: &AppState) -> Self {
        Self {
            students: state.students.len(),
            professors: state.professors.len(),
            courses: state.courses.len(),
            sections: state.sections.len(),
            graded_students: state.grades.total_students_graded(),
            grade_items: state.grades.total_items(),
            users: state.users.len(),
        }
    }

    fn write_to(&self, out: &mut String) {
        let _ = writeln!(out, "Total students: {}", self.students);
        let _ = writeln!(out, "Total professors: {}", self.professors);
        let _ = writeln!(out, "Total courses: {}", self.courses);
        let _ = writeln!(out, "Total sections: {}", self.sections);
        let _ = writeln!(out, "Total users: {}", self.users);
        let _ = writeln!(out, "Students with grades: {}", self.graded_students);
        let _ = writeln!(out, "Grade items recorded: {}", self.grade_items);
    }
}

fn write_course_types(out: &mut String, counts: &CourseTypeCounts) {
    out.push_str("\nCourses by type:\n");
    let _ = writeln!(out, "- Regular: {}", counts.plain);
    let _ = writeln!(out, "- In-person: {}", counts.in_person);
    let _ = writeln!(out, "- Remote: {}", counts.remote);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSize {
    pub code: String,
    pub students: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAverage {
    pub code: String,
    pub average: f64,
}

/// System-wide overview.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralReport {
    pub totals: Totals,
    pub course_types: CourseTypeCounts,
    /// Largest first; ties keep creation order.
    pub sections_by_enrollment: Vec<SectionSize>,
    pub section_averages: Vec<SectionAverage>,
}

impl GeneralReport {
    pub fn build(state: &AppState) -> Self {
        let mut sections_by_enrollment: Vec<SectionSize> = state
            .sections
            .iter()
            .map(|s| SectionSize {
                code: s.code.clone(),
                students: s.enrollment_count(),
            })
            .collect();
        sections_by_enrollment.sort_by(|a, b| b.students.cmp(&a.students));

        Self {
            totals: Totals::collect(state),
            course_types: state.courses.count_by_type(),
            sections_by_enrollment,
            section_averages: state
                .grades
                .iter()
                .map(|g| SectionAverage {
                    code: g.section_code.clone(),
                    average: g.section_average(),
                })
                .collect(),
        }
    }
}

impl Render for GeneralReport {
    fn title(&self) -> String {
        "GENERAL SYSTEM REPORT".to_string()
    }

    fn body(&self) -> String {
        let mut out = String::new();
        self.totals.write_to(&mut out);
        write_course_types(&mut out, &self.course_types);

        if !self.sections_by_enrollment.is_empty() {
            out.push_str("\nSections by enrollment:\n");
            for s in &self.sections_by_enrollment {
                let _ = writeln!(out, "- {}: {} students", s.code, s.students);
            }
        }
        if !self.section_averages.is_empty() {
            out.push_str("\nSection averages:\n");
            for s in &self.section_averages {
                let _ = writeln!(out, "- {}: {:.2}", s.code, s.average);
            }
        }
        out
    }
}

/// Counts plus the user and course breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub totals: Totals,
    pub roles: RoleCounts,
    pub course_types: CourseTypeCounts,
}

impl StatisticsReport {
    pub fn build(state: &AppState) -> Self {
        Self {
            totals: Totals::collect(state),
            roles: state.users.count_by_role(),
            course_types: state.courses.count_by_type(),
        }
    }
}

impl Render for StatisticsReport {
    fn title(&self) -> String {
        "SYSTEM STATISTICS".to_string()
    }

    fn body(&self) -> String {
        let mut out = String::new();
        self.totals.write_to(&mut out);
        out.push_str("\nUsers by role:\n");
        let _ = writeln!(out, "- Students: {}", self.roles.students);
        let _ = writeln!(out, "- Professors: {}", self.roles.professors);
        let _ = writeln!(out, "- Admins: {}", self.roles.admins);
        write_course_types(&mut out, &self.course_types);
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
    fn totals_count_every_repository() {
        let service = seeded();
        assert_eq!(
            Totals::collect(service.state()),
            Totals {
                students: 3,
                professors: 1,
                courses: 3,
                sections: 1,
                graded_students: 2,
                grade_items: 6,
                users: 3,
            }
        );
    }

    #[test]
    fn empty_state_reports_zeroes() {
        let state = AppState::new();
        let report = GeneralReport::build(&state);
        assert_eq!(report.totals, Totals::default());
        assert!(report.sections_by_enrollment.is_empty());
        assert!(report.body().contains("Total students: 0"));
    }

    #[test]
    fn sections_ranked_by_enrollment_keeping_ties_stable() {
        let mut service = seeded();
        service.create_section("T-EMPTY-A", "JAVA101", "PROF001");
        service.register_student("Ana", "010", "Python");
        service.create_section("T-PY", "PY101", "PROF001");
        service.enroll_student("003", "T-PY");
        service.enroll_student("010", "T-PY");
        service.create_section("T-EMPTY-B", "PY101", "PROF001");

        let report = GeneralReport::build(service.state());
        let order: Vec<_> = report
            .sections_by_enrollment
            .iter()
            .map(|s| s.code.as_str())
            .collect();
        assert_eq!(order, vec!["TURMA2024", "T-PY", "T-EMPTY-A", "T-EMPTY-B"]);
    }

    #[test]
    fn general_report_lists_course_types_and_averages() {
        let mut service = seeded();
        service.register_course("Redes", "RED1", 40, CourseType::Remote, "Meet");
        let report = GeneralReport::build(service.state());
        assert_eq!(report.course_types.remote, 2);
        let body = report.body();
        assert!(body.contains("- Remote: 2"));
        assert!(body.contains("- TURMA2024: 8.25"));
    }

    #[test]
    fn statistics_break_down_users_by_role() {
        let service = seeded();
        let report = StatisticsReport::build(service.state());
        assert_eq!(
            report.roles,
            RoleCounts {
                students: 1,
                professors: 1,
                admins: 1,
            }
        );
        assert!(report.body().contains("- Admins: 1"));
        assert_eq!(report.title(), "SYSTEM STATISTICS");
    }
}
