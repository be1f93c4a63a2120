//! Built-in success and failure checks, runnable from the menu or the CLI.
//!
//! Each scenario runs against a sandbox copy of the session so the live
//! data is never changed.

use serde::Serialize;

use crate::service::EducationService;

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioVerdict {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

impl ScenarioVerdict {
    fn new(name: &'static str, passed: bool, message: impl Into<String>) -> Self {
        Self {
            name,
            passed,
            message: message.into(),
        }
    }
}

type Scenario = fn(&mut EducationService) -> ScenarioVerdict;

const SCENARIOS: [(&str, Scenario); 6] = [
    ("Register student with existing course", register_with_existing_course),
    ("Register student with unknown course", register_with_unknown_course),
    ("Create section with unknown course", section_with_unknown_course),
    ("Create section with unregistered professor", section_with_unknown_professor),
    ("Record grade with out-of-range score", grade_with_invalid_score),
    ("Enroll an already enrolled student", duplicate_enrollment),
];

/// Scenario names, in run order.
pub fn names() -> impl Iterator<Item = &'static str> {
    SCENARIOS.iter().map(|(name, _)| *name)
}

/// Runs the scenario at `index` (zero-based).
pub fn run_one(service: &EducationService, index: usize) -> Option<ScenarioVerdict> {
    let (_, scenario) = SCENARIOS.get(index)?;
    Some(scenario(&mut service.sandbox()))
}

pub fn run_all(service: &EducationService) -> Vec<ScenarioVerdict> {
    (0..SCENARIOS.len())
        .filter_map(|i| run_one(service, i))
        .collect()
}

fn expect_success<T>(name: &'static str, outcome: crate::service::Outcome<T>) -> ScenarioVerdict {
    let passed = outcome.is_success();
    ScenarioVerdict::new(name, passed, outcome.message())
}

fn expect_failure<T>(name: &'static str, outcome: crate::service::Outcome<T>) -> ScenarioVerdict {
    if outcome.is_success() {
        ScenarioVerdict::new(name, false, "Operation should not have succeeded")
    } else {
        ScenarioVerdict::new(name, true, outcome.message())
    }
}

fn register_with_existing_course(service: &mut EducationService) -> ScenarioVerdict {
    let name = SCENARIOS[0].0;
    let Some(course) = service.state().courses.iter().next().map(|c| c.name.clone()) else {
        return ScenarioVerdict::new(name, false, "No courses registered to test with");
    };
    expect_success(
        name,
        service.register_student("Aluno Teste Sucesso", "TESTE001", &course),
    )
}

fn register_with_unknown_course(service: &mut EducationService) -> ScenarioVerdict {
    expect_failure(
        SCENARIOS[1].0,
        service.register_student("Aluno Teste Falha", "TESTE002", "Curso Que Não Existe"),
    )
}

fn section_with_unknown_course(service: &mut EducationService) -> ScenarioVerdict {
    let professor = service
        .state()
        .professors
        .iter()
        .next()
        .map_or_else(|| "TESTE001".to_string(), |p| p.registration.clone());
    expect_failure(
        SCENARIOS[2].0,
        service.create_section("TURMATESTE", "INVALIDO", &professor),
    )
}

fn section_with_unknown_professor(service: &mut EducationService) -> ScenarioVerdict {
    let name = SCENARIOS[3].0;
    let Some(course) = service.state().courses.iter().next().map(|c| c.code.clone()) else {
        return ScenarioVerdict::new(name, false, "No courses registered to test with");
    };
    expect_failure(name, service.create_section("TURMATESTE2", &course, "INVALIDO"))
}

fn first_enrollment(service: &EducationService) -> Option<(String, String)> {
    service.state().sections.iter().find_map(|section| {
        section
            .roster()
            .first()
            .map(|s| (section.code.clone(), s.registration.clone()))
    })
}

fn grade_with_invalid_score(service: &mut EducationService) -> ScenarioVerdict {
    let name = SCENARIOS[4].0;
    let Some((section, student)) = first_enrollment(service) else {
        return ScenarioVerdict::new(name, false, "No section with enrolled students");
    };
    expect_failure(
        name,
        service.record_grade(&section, &student, "Prova Teste", "Prova", 0.3, 15.0),
    )
}

fn duplicate_enrollment(service: &mut EducationService) -> ScenarioVerdict {
    let name = SCENARIOS[5].0;
    let Some((section, student)) = first_enrollment(service) else {
        return ScenarioVerdict::new(name, false, "No section with enrolled students");
    };
    let outcome = service.enroll_student(&student, &section);
    let copies = outcome
        .value()
        .map(|s| {
            s.roster()
                .iter()
                .filter(|s| s.registration == student)
                .count()
        })
        .unwrap_or(0);
    if copies == 1 {
        ScenarioVerdict::new(name, true, "Student was not duplicated in the section")
    } else {
        ScenarioVerdict::new(
            name,
            false,
            format!("Expected one roster entry, found {copies}: {}", outcome.message()),
        )
    }
}
