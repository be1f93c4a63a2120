mod course;
mod grade;
mod person;
mod section;
mod user;

pub use course::{Course, CourseKind, CourseType};
pub use grade::{GradeItem, GradeStatus, SectionGrades, StudentGrades};
pub use person::{Professor, Student};
pub use section::Section;
pub use user::{Credentials, Role, User};
