//! Read-only projections of the application state.
//!
//! Every report is an owned, serialisable snapshot built from `&AppState`;
//! building one never mutates anything. [`Render`] turns a snapshot into
//! the plain-text title and body shown on the console.

mod entity;
mod summary;

use serde::Serialize;

use crate::error::EduError;
use crate::state::AppState;

pub use entity::{
    CourseReport, ProfessorReport, SectionGradesReport, SectionReport, StudentReport,
};
pub use summary::{GeneralReport, StatisticsReport};

/// Plain-text rendering of a report.
pub trait Render {
    fn title(&self) -> String;
    fn body(&self) -> String;
}

/// Any report the system can produce.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Student(StudentReport),
    Professor(ProfessorReport),
    Course(CourseReport),
    Section(SectionReport),
    SectionGrades(SectionGradesReport),
    General(GeneralReport),
    Statistics(StatisticsReport),
}

impl Report {
    fn inner(&self) -> &dyn Render {
        match self {
            Report::Student(r) => r,
            Report::Professor(r) => r,
            Report::Course(r) => r,
            Report::Section(r) => r,
            Report::SectionGrades(r) => r,
            Report::General(r) => r,
            Report::Statistics(r) => r,
        }
    }

    /// Pretty-printed JSON snapshot, tagged with the report kind.
    pub fn to_json(&self) -> Result<String, EduError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Render for Report {
    fn title(&self) -> String {
        self.inner().title()
    }

    fn body(&self) -> String {
        self.inner().body()
    }
}

/// Which family of reports to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    General,
    Students,
    Professors,
    Courses,
    Sections,
    Grades,
    Statistics,
    All,
}

pub fn student_reports(state: &AppState) -> Vec<Report> {
    state
        .students
        .iter()
        .filter_map(|s| StudentReport::build(state, &s.registration))
        .map(Report::Student)
        .collect()
}

pub fn professor_reports(state: &AppState) -> Vec<Report> {
    state
        .professors
        .iter()
        .filter_map(|p| ProfessorReport::build(state, &p.registration))
        .map(Report::Professor)
        .collect()
}

pub fn course_reports(state: &AppState) -> Vec<Report> {
    state
        .courses
        .iter()
        .filter_map(|c| CourseReport::build(state, &c.code))
        .map(Report::Course)
        .collect()
}

pub fn section_reports(state: &AppState) -> Vec<Report> {
    state
        .sections
        .iter()
        .filter_map(|s| SectionReport::build(state, &s.code))
        .map(Report::Section)
        .collect()
}

pub fn section_grades_reports(state: &AppState) -> Vec<Report> {
    state
        .grades
        .iter()
        .filter_map(|g| SectionGradesReport::build(state, &g.section_code))
        .map(Report::SectionGrades)
        .collect()
}

/// Every per-entity report followed by the general overview.
pub fn all_reports(state: &AppState) -> Vec<Report> {
    let mut reports = student_reports(state);
    reports.extend(professor_reports(state));
    reports.extend(course_reports(state));
    reports.extend(section_reports(state));
    reports.extend(section_grades_reports(state));
    reports.push(Report::General(GeneralReport::build(state)));
    reports
}

/// Reports in `scope`, in display order.
pub fn build(state: &AppState, scope: ReportScope) -> Vec<Report> {
    match scope {
        ReportScope::General => vec![Report::General(GeneralReport::build(state))],
        ReportScope::Statistics => vec![Report::Statistics(StatisticsReport::build(state))],
        ReportScope::Students => student_reports(state),
        ReportScope::Professors => professor_reports(state),
        ReportScope::Courses => course_reports(state),
        ReportScope::Sections => section_reports(state),
        ReportScope::Grades => section_grades_reports(state),
        ReportScope::All => all_reports(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::EducationService;

    fn seeded() -> EducationService {
        let mut service = EducationService::new(4);
        assert!(service.load_sample_data().is_success());
        service
    }

    #[test]
    fn all_reports_follow_display_order() {
        let service = seeded();
        let reports = build(service.state(), ReportScope::All);
        let kinds: Vec<_> = reports
            .iter()
            .map(|r| match r {
                Report::Student(_) => "student",
                Report::Professor(_) => "professor",
                Report::Course(_) => "course",
                Report::Section(_) => "section",
                Report::SectionGrades(_) => "grades",
                Report::General(_) => "general",
                Report::Statistics(_) => "statistics",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "student", "student", "student", "professor", "course", "course", "course",
                "section", "grades", "general",
            ]
        );
    }

    #[test]
    fn report_serializes_with_kind_tag() {
        let service = seeded();
        let reports = build(service.state(), ReportScope::General);
        let json: serde_json::Value = serde_json::from_str(&reports[0].to_json().unwrap()).unwrap();
        assert_eq!(json["report"], "general");
        assert_eq!(json["totals"]["students"], 3);
    }

    #[test]
    fn building_reports_does_not_mutate_state() {
        let service = seeded();
        let before = service.state().grades.total_items();
        build(service.state(), ReportScope::All);
        assert_eq!(service.state().grades.total_items(), before);
        assert_eq!(service.state().sections.len(), 1);
    }

    #[test]
    fn enum_delegates_rendering() {
        let service = seeded();
        let report = &build(service.state(), ReportScope::Sections)[0];
        assert_eq!(report.title(), "SECTION REPORT - TURMA2024");
        assert!(report.body().contains("Students enrolled: 2"));
    }
}
