//! Interactive console menu.
//!
//! The menu only prompts and prints; every write goes through
//! [`EducationService`]. Input and output are generic so the whole flow can
//! be driven from a script in tests. End of input at any prompt ends the
//! session cleanly.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use log::debug;

use crate::model::{CourseType, Role, Student};
use crate::report::{
    self, Report, ReportScope, SectionGradesReport, StatisticsReport, StudentReport,
};
use crate::scenarios;
use crate::service::{EducationService, Outcome};
use crate::ui::Ui;

/// Raised when input runs out mid-prompt; unwinds to [`Menu::run`].
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

const MAIN_MENU: &str = "\
1. Manage students
2. Manage professors
3. Manage courses
4. Manage sections
5. Record grades
6. Reports
7. Authenticate user
8. System statistics
9. Run scenarios
0. Exit";

pub struct Menu<'s, R, W> {
    service: &'s mut EducationService,
    ui: Ui,
    input: R,
    out: W,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(service: &'s mut EducationService, ui: Ui, input: R, out: W) -> Self {
        Self {
            service,
            ui,
            input,
            out,
        }
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.main_loop() {
            Err(e) if e.is::<EndOfInput>() => {
                debug!("input closed, leaving menu");
                writeln!(self.out)?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            self.ui.banner(&mut self.out, "EDUCONNECT - ACADEMIC MANAGEMENT")?;
            writeln!(self.out, "{MAIN_MENU}")?;
            match self.read_option("Choose an option", 0, 9)? {
                1 => self.students()?,
                2 => self.professors()?,
                3 => self.courses()?,
                4 => self.sections()?,
                5 => self.grades()?,
                6 => self.reports()?,
                7 => self.authenticate()?,
                8 => {
                    let report = Report::Statistics(StatisticsReport::build(self.service.state()));
                    self.ui.report(&mut self.out, &report)?;
                }
                9 => self.scenarios()?,
                _ => {
                    writeln!(self.out, "\nThank you for using EduConnect!")?;
                    return Ok(());
                }
            }
        }
    }

    fn students(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "STUDENTS")?;
        if self.service.state().students.is_empty() {
            writeln!(self.out, "No students registered.")?;
        }
        let students = self.service.state().students.list_all();
        for (i, s) in students.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} - {} - {}",
                i + 1,
                s.name,
                s.registration,
                s.course_name
            )?;
        }
        self.ui.separator(&mut self.out)?;
        if !self.read_bool("Add a new student?")? {
            return Ok(());
        }

        if self.service.state().courses.is_empty() {
            self.ui.failure(
                &mut self.out,
                "Cannot register a student: no courses available. Register a course first.",
            )?;
            return Ok(());
        }
        let courses = self.service.state().courses.list_all();
        writeln!(self.out, "\nAvailable courses:")?;
        for (i, c) in courses.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, c.name)?;
        }

        let name = self.read_string("Full name")?;
        let registration = self.read_string("Registration")?;
        let index = self.read_option("Course number", 1, courses.len())?;
        let course = &courses[index - 1].name;

        let outcome = self.service.register_student(&name, &registration, course);
        self.ui.outcome(&mut self.out, &outcome)?;
        if let Some(student) = outcome.into_value() {
            self.offer_login(&student.name, Role::Student {
                registration: student.registration.clone(),
            })?;
        }
        Ok(())
    }

    fn professors(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "PROFESSORS")?;
        let professors = self.service.state().professors.list_all();
        if professors.is_empty() {
            writeln!(self.out, "No professors registered.")?;
        }
        for (i, p) in professors.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} - {} - {}",
                i + 1,
                p.name,
                p.specialty,
                p.registration
            )?;
        }
        self.ui.separator(&mut self.out)?;
        if !self.read_bool("Add a new professor?")? {
            return Ok(());
        }

        let name = self.read_string("Full name")?;
        let specialty = self.read_string("Specialty")?;
        let registration = self.read_string("Registration")?;
        let outcome = self
            .service
            .register_professor(&name, &specialty, &registration);
        self.ui.outcome(&mut self.out, &outcome)?;
        if let Some(professor) = outcome.into_value() {
            self.offer_login(&professor.name, Role::Professor {
                registration: professor.registration.clone(),
                specialty: professor.specialty.clone(),
            })?;
        }
        Ok(())
    }

    fn offer_login(&mut self, name: &str, role: Role) -> Result<()> {
        if !self.read_bool("Create a login for this person?")? {
            return Ok(());
        }
        let email = self.read_string("Email")?;
        let login = self.read_string("Login")?;
        let password = self.read_string("Password")?;
        let outcome = self
            .service
            .register_user(name, &email, &login, &password, role);
        self.ui.outcome(&mut self.out, &outcome)?;
        Ok(())
    }

    fn courses(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "COURSES")?;
        let courses = self.service.state().courses.list_all();
        if courses.is_empty() {
            writeln!(self.out, "No courses registered.")?;
        }
        for (i, c) in courses.iter().enumerate() {
            let offered = if self.service.state().sections.exists_with_course(&c.code) {
                ""
            } else {
                " (no sections yet)"
            };
            writeln!(self.out, "{}. {c}{offered}", i + 1)?;
        }
        self.ui.separator(&mut self.out)?;
        if !self.read_bool("Add a new course?")? {
            return Ok(());
        }

        let name = self.read_string("Course name")?;
        let code = self.read_string("Code")?;
        let hours: u32 = self.read_number("Hours")?;
        writeln!(self.out, "\nCourse type:\n1. In-person\n2. Remote\n3. Regular")?;
        let (course_type, extra) = match self.read_option("Choose the type", 1, 3)? {
            1 => (CourseType::InPerson, self.read_string("Room")?),
            2 => (CourseType::Remote, self.read_string("Platform")?),
            _ => (CourseType::Plain, String::new()),
        };

        let outcome = self
            .service
            .register_course(&name, &code, hours, course_type, &extra);
        self.ui.outcome(&mut self.out, &outcome)?;
        Ok(())
    }

    fn sections(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "SECTIONS")?;
        let sections = self.service.state().sections.list_all();
        if sections.is_empty() {
            writeln!(self.out, "No sections created.")?;
        }
        for s in &sections {
            writeln!(
                self.out,
                "Code: {} | Course: {} | Professor: {} | Students: {}",
                s.code,
                s.course.name,
                s.professor.name,
                s.enrollment_count()
            )?;
        }
        self.ui.separator(&mut self.out)?;
        writeln!(
            self.out,
            "1. Create section\n2. Enroll student\n3. Withdraw student\n4. Back"
        )?;
        match self.read_option("Choose an option", 1, 4)? {
            1 => self.create_section(),
            2 => self.enroll(),
            3 => {
                let code = self.read_string("Section code")?;
                let registration = self.read_string("Student registration")?;
                let outcome = self.service.withdraw_student(&registration, &code);
                self.ui.outcome(&mut self.out, &outcome)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn create_section(&mut self) -> Result<()> {
        let courses = self.service.state().courses.list_all();
        let professors = self.service.state().professors.list_all();
        if courses.is_empty() || professors.is_empty() {
            self.ui.failure(
                &mut self.out,
                "Cannot create a section: register at least one course and one professor first.",
            )?;
            return Ok(());
        }

        let code = self.read_string("Section code")?;
        writeln!(self.out, "\nSelect the course:")?;
        for (i, c) in courses.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, c.name)?;
        }
        let course = &courses[self.read_option("Course number", 1, courses.len())? - 1];
        writeln!(self.out, "\nSelect the professor:")?;
        for (i, p) in professors.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, p.name)?;
        }
        let professor = &professors[self.read_option("Professor number", 1, professors.len())? - 1];
        if !self.service.state().students.exists_in_course(&course.name) {
            writeln!(self.out, "Note: no students are registered in {} yet.", course.name)?;
        }

        let outcome = self
            .service
            .create_section(&code, &course.code, &professor.registration);
        self.ui.outcome(&mut self.out, &outcome)?;
        if outcome.is_success() && self.read_bool("Enroll students now?")? {
            self.enroll_into(&code)?;
        }
        Ok(())
    }

    fn enroll(&mut self) -> Result<()> {
        let sections = self.service.state().sections.list_all();
        if sections.is_empty() {
            self.ui.failure(&mut self.out, "No sections available.")?;
            return Ok(());
        }
        writeln!(self.out, "\nAvailable sections:")?;
        for (i, s) in sections.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} - {} ({} students)",
                i + 1,
                s.code,
                s.course.name,
                s.enrollment_count()
            )?;
        }
        let index = self.read_option("Select the section", 1, sections.len())?;
        self.enroll_into(&sections[index - 1].code)
    }

    fn enroll_into(&mut self, section_code: &str) -> Result<()> {
        let students: Vec<Student> = self.service.state().students.list_all();
        if students.is_empty() {
            writeln!(self.out, "No students available for enrollment.")?;
            return Ok(());
        }
        loop {
            let enrolled = self
                .service
                .state()
                .sections
                .get(section_code)
                .map(|s| s.roster())
                .unwrap_or_default();
            writeln!(self.out, "\nStudents:")?;
            for (i, s) in students.iter().enumerate() {
                let marker = if enrolled.contains(s) { " [ENROLLED]" } else { "" };
                writeln!(self.out, "{}. {} - {}{marker}", i + 1, s.name, s.course_name)?;
            }
            let index = self.read_option("Student number (0 to stop)", 0, students.len())?;
            if index == 0 {
                return Ok(());
            }
            let outcome = self
                .service
                .enroll_student(&students[index - 1].registration, section_code);
            self.ui.outcome(&mut self.out, &outcome)?;
            if !self.read_bool("Enroll another student?")? {
                return Ok(());
            }
        }
    }

    fn grades(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "GRADES")?;
        writeln!(
            self.out,
            "1. Record grade\n2. View section grades\n3. View student grades\n4. Back"
        )?;
        match self.read_option("Choose an option", 1, 4)? {
            1 => {
                let section = self.read_string("Section code")?;
                let registration = self.read_string("Student registration")?;
                let description = self.read_string("Description")?;
                let category = self.read_string("Category (e.g. Prova, Trabalho)")?;
                let weight: f64 = self.read_number("Weight (0-1]")?;
                let score: f64 = self.read_number("Score (0-10)")?;
                let outcome = self.service.record_grade(
                    &section,
                    &registration,
                    &description,
                    &category,
                    weight,
                    score,
                );
                self.ui.outcome(&mut self.out, &outcome)?;
            }
            2 => {
                let code = self.read_string("Section code")?;
                match SectionGradesReport::build(self.service.state(), &code) {
                    Some(r) => self.ui.report(&mut self.out, &Report::SectionGrades(r))?,
                    None => self
                        .ui
                        .failure(&mut self.out, "No grades recorded for this section")?,
                }
            }
            3 => {
                let registration = self.read_string("Student registration")?;
                match StudentReport::build(self.service.state(), &registration) {
                    Some(r) => self.ui.report(&mut self.out, &Report::Student(r))?,
                    None => self.ui.failure(&mut self.out, "Student not found")?,
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn reports(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "REPORTS")?;
        writeln!(
            self.out,
            "1. General\n2. Students\n3. Professors\n4. Courses\n5. Sections\n6. Grades\n7. All\n8. Back"
        )?;
        let scope = match self.read_option("Choose an option", 1, 8)? {
            1 => ReportScope::General,
            2 => ReportScope::Students,
            3 => ReportScope::Professors,
            4 => ReportScope::Courses,
            5 => ReportScope::Sections,
            6 => ReportScope::Grades,
            7 => ReportScope::All,
            _ => return Ok(()),
        };
        let reports = report::build(self.service.state(), scope);
        if reports.is_empty() {
            writeln!(self.out, "Nothing to report.")?;
        }
        for r in &reports {
            self.ui.report(&mut self.out, r)?;
        }
        Ok(())
    }

    fn authenticate(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "AUTHENTICATION")?;
        let login = self.read_string("Login")?;
        let password = self.read_string("Password")?;
        let outcome = self.service.authenticate(&login, &password);
        self.ui.outcome(&mut self.out, &outcome)?;
        if let Outcome::Success { value: user, .. } = &outcome {
            writeln!(self.out, "Role: {}", user.role)?;
        }
        Ok(())
    }

    fn scenarios(&mut self) -> Result<()> {
        self.ui.banner(&mut self.out, "SCENARIOS")?;
        let count = scenarios::names().count();
        for (i, name) in scenarios::names().enumerate() {
            writeln!(self.out, "{}. {name}", i + 1)?;
        }
        writeln!(self.out, "{}. Run all\n{}. Back", count + 1, count + 2)?;

        let choice = self.read_option("Choose a scenario", 1, count + 2)?;
        let verdicts = if choice == count + 1 {
            scenarios::run_all(self.service)
        } else {
            scenarios::run_one(self.service, choice - 1).into_iter().collect()
        };
        for verdict in &verdicts {
            self.ui.verdict(&mut self.out, verdict)?;
        }
        Ok(())
    }

    fn read_string(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}: ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompts until the line parses.
    fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            match self.read_string(prompt)?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.ui.failure(&mut self.out, "Please enter a valid number")?,
            }
        }
    }

    fn read_option(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize> {
        let prompt = format!("{prompt} ({min}-{max})");
        loop {
            let option: usize = self.read_number(&prompt)?;
            if (min..=max).contains(&option) {
                return Ok(option);
            }
            self.ui.failure(
                &mut self.out,
                &format!("Please choose an option between {min} and {max}"),
            )?;
        }
    }

    fn read_bool(&mut self, prompt: &str) -> Result<bool> {
        let prompt = format!("{prompt} (y/n)");
        loop {
            match self.read_string(&prompt)?.to_lowercase().as_str() {
                "y" | "yes" | "s" | "sim" => return Ok(true),
                "n" | "no" | "nao" | "não" => return Ok(false),
                _ => writeln!(self.out, "Please answer y or n.")?,
            }
        }
    }
}
