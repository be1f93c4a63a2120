use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::person::Student;

/// Minimum weighted average for [`GradeStatus::Pass`].
pub const PASS_THRESHOLD: f64 = 7.0;
/// Minimum weighted average for [`GradeStatus::Probation`].
pub const PROBATION_THRESHOLD: f64 = 5.0;

/// Outcome derived from a weighted average. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradeStatus {
    Pass,
    Probation,
    Fail,
}

impl GradeStatus {
    pub fn from_average(average: f64) -> Self {
        if average >= PASS_THRESHOLD {
            GradeStatus::Pass
        } else if average >= PROBATION_THRESHOLD {
            GradeStatus::Probation
        } else {
            GradeStatus::Fail
        }
    }
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeStatus::Pass => write!(f, "PASS"),
            GradeStatus::Probation => write!(f, "PROBATION"),
            GradeStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// One weighted graded component (quiz, assignment, exam).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeItem {
    pub id: Uuid,
    pub description: String,
    /// Free-text label such as "exam" or "assignment".
    pub category: String,
    /// In (0, 1].
    pub weight: f64,
    /// In [0, 10].
    pub score: f64,
    pub recorded_at: DateTime<Utc>,
}

impl GradeItem {
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        weight: f64,
        score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            category: category.into(),
            weight,
            score,
            recorded_at: Utc::now(),
        }
    }

    pub fn weighted_score(&self) -> f64 {
        self.score * self.weight
    }
}

/// A single student's grade items within one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGrades {
    pub student: Student,
    pub items: Vec<GradeItem>,
}

impl StudentGrades {
    pub fn new(student: Student) -> Self {
        Self {
            student,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, item: GradeItem) {
        self.items.push(item);
    }

    /// Σ(score × weight) / Σ(weight), or 0 when there is nothing to divide by.
    pub fn weighted_average(&self) -> f64 {
        let weight_sum: f64 = self.items.iter().map(|i| i.weight).sum();
        if weight_sum <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self.items.iter().map(GradeItem::weighted_score).sum();
        weighted / weight_sum
    }

    pub fn status(&self) -> GradeStatus {
        GradeStatus::from_average(self.weighted_average())
    }
}

/// Every student's grades for one section, keyed by section code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionGrades {
    pub section_code: String,
    pub students: Vec<StudentGrades>,
}

impl SectionGrades {
    pub fn new(section_code: impl Into<String>) -> Self {
        Self {
            section_code: section_code.into(),
            students: Vec::new(),
        }
    }

    pub fn student_grades(&self, registration: &str) -> Option<&StudentGrades> {
        self.students
            .iter()
            .find(|g| g.student.registration == registration.trim())
    }

    /// Returns the student's grade list, creating an empty one on first use.
    pub fn student_grades_mut(&mut self, student: &Student) -> &mut StudentGrades {
        let pos = match self
            .students
            .iter()
            .position(|g| g.student.registration == student.registration)
        {
            Some(pos) => pos,
            None => {
                self.students.push(StudentGrades::new(student.clone()));
                self.students.len() - 1
            }
        };
        &mut self.students[pos]
    }

    /// Mean of the students' weighted averages.
    pub fn section_average(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.students.iter().map(StudentGrades::weighted_average).sum();
        sum / self.students.len() as f64
    }

    /// Student with the highest weighted average; the earliest one wins ties.
    pub fn best_student(&self) -> Option<&Student> {
        let mut best: Option<(&StudentGrades, f64)> = None;
        for grades in &self.students {
            let average = grades.weighted_average();
            match best {
                Some((_, top)) if average <= top => {}
                _ => best = Some((grades, average)),
            }
        }
        best.map(|(grades, _)| &grades.student)
    }

    pub fn item_count(&self) -> usize {
        self.students.iter().map(|g| g.items.len()).sum()
    }
}
