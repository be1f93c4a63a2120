//! In-memory repositories, one per entity type.
//!
//! Every repository is a [`Repository<T>`] over an insertion-ordered `Vec`
//! with linear lookup by natural key. Entity-specific lookups live in
//! inherent impls on the concrete instantiations (see the sibling modules).

mod lookups;

use log::debug;

use crate::model::{Course, Professor, Section, SectionGrades, Student, User};

pub use lookups::{CourseTypeCounts, RoleCounts};

/// An entity with a natural key used for equality and lookup.
pub trait Keyed {
    fn key(&self) -> &str;

    /// Whether `key` identifies this entity. Exact match, ignoring
    /// surrounding whitespace, unless overridden.
    fn matches_key(&self, key: &str) -> bool {
        self.key() == key.trim()
    }

    /// Short label for log lines.
    fn kind() -> &'static str;
}

impl Keyed for Student {
    fn key(&self) -> &str {
        &self.registration
    }

    fn kind() -> &'static str {
        "student"
    }
}

impl Keyed for Professor {
    fn key(&self) -> &str {
        &self.registration
    }

    fn kind() -> &'static str {
        "professor"
    }
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.code
    }

    fn matches_key(&self, key: &str) -> bool {
        self.has_code(key)
    }

    fn kind() -> &'static str {
        "course"
    }
}

impl Keyed for Section {
    fn key(&self) -> &str {
        &self.code
    }

    fn kind() -> &'static str {
        "section"
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.email
    }

    fn matches_key(&self, key: &str) -> bool {
        self.email.to_lowercase() == key.trim().to_lowercase()
    }

    fn kind() -> &'static str {
        "user"
    }
}

impl Keyed for SectionGrades {
    fn key(&self) -> &str {
        &self.section_code
    }

    fn kind() -> &'static str {
        "section grades"
    }
}

/// Ordered in-memory collection of one entity type.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    items: Vec<T>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + Clone> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entity` unless one with the same natural key is present.
    ///
    /// Saving twice is a no-op; returns whether the entity was added.
    pub fn save(&mut self, entity: T) -> bool {
        if self.exists(entity.key()) {
            return false;
        }
        debug!("{} '{}' saved", T::kind(), entity.key());
        self.items.push(entity);
        true
    }

    /// Replaces the entity with the same key in place, or appends it.
    pub fn upsert(&mut self, entity: T) {
        match self.items.iter().position(|e| e.matches_key(entity.key())) {
            Some(pos) => {
                debug!("{} '{}' updated", T::kind(), entity.key());
                self.items[pos] = entity;
            }
            None => {
                debug!("{} '{}' saved", T::kind(), entity.key());
                self.items.push(entity);
            }
        }
    }

    /// Removes the entity with this key. No-op when absent.
    #[allow(dead_code)]
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let pos = self.items.iter().position(|e| e.matches_key(key))?;
        let removed = self.items.remove(pos);
        debug!("{} '{}' removed", T::kind(), removed.key());
        Some(removed)
    }

    /// Independent snapshot in insertion order.
    pub fn list_all(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn find_by_id(&self, key: &str) -> Option<T> {
        self.get(key).cloned()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|e| e.matches_key(key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.items.iter().any(|e| e.matches_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub type StudentRepository = Repository<Student>;
pub type ProfessorRepository = Repository<Professor>;
pub type CourseRepository = Repository<Course>;
pub type SectionRepository = Repository<Section>;
pub type UserRepository = Repository<User>;
pub type GradeRepository = Repository<SectionGrades>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseKind, Role};

    #[test]
    fn save_is_idempotent_by_key() {
        let mut repo = StudentRepository::new();
        assert!(repo.save(Student::new("Ana", "S1", "Intro")));
        assert!(!repo.save(Student::new("Ana Clara", "S1", "Other")));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id("S1").unwrap().name, "Ana");
    }

    #[test]
    fn find_by_id_returns_none_when_absent() {
        let repo = StudentRepository::new();
        assert!(repo.find_by_id("S1").is_none());
        assert!(!repo.exists("S1"));
        assert!(repo.is_empty());
    }

    #[test]
    fn list_all_is_an_ordered_snapshot() {
        let mut repo = StudentRepository::new();
        repo.save(Student::new("Ana", "S1", "Intro"));
        repo.save(Student::new("Bia", "S2", "Intro"));

        let mut snapshot = repo.list_all();
        assert_eq!(snapshot[0].registration, "S1");
        assert_eq!(snapshot[1].registration, "S2");
        snapshot.clear();
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn remove_by_key_and_noop_when_absent() {
        let mut repo = StudentRepository::new();
        repo.save(Student::new("Ana", "S1", "Intro"));
        assert!(repo.remove("S9").is_none());
        assert_eq!(repo.remove("S1").unwrap().name, "Ana");
        assert!(repo.is_empty());
    }

    #[test]
    fn course_keys_match_case_insensitively() {
        let mut repo = CourseRepository::new();
        repo.save(Course::new("Intro", "C1", 40, CourseKind::Plain));
        assert!(repo.exists("c1"));
        assert!(!repo.save(Course::new("Other", "c1", 10, CourseKind::Plain)));
        assert_eq!(repo.len(), 1);

        repo.save(Course::new("Ética", "ÉT1", 20, CourseKind::Plain));
        assert_eq!(repo.find_by_id("ét1").unwrap().name, "Ética");
    }

    #[test]
    fn user_emails_match_without_case() {
        let mut repo = UserRepository::new();
        let user = User::new("Ana", "Ána@Edu.com", "ana", "secret", Role::Admin, 4).unwrap();
        repo.save(user);
        assert!(repo.exists(" ána@edu.com "));
        assert!(repo.exists("ÁNA@EDU.COM"));
    }

    #[test]
    fn section_keys_match_exactly() {
        let mut repo = SectionRepository::new();
        repo.save(Section::new(
            "T1",
            Course::new("Intro", "C1", 40, CourseKind::Plain),
            Professor::new("Carlos", "POO", "P1"),
        ));
        assert!(repo.exists("T1"));
        assert!(!repo.exists("t1"));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut repo = SectionRepository::new();
        let course = Course::new("Intro", "C1", 40, CourseKind::Plain);
        let professor = Professor::new("Carlos", "POO", "P1");
        repo.save(Section::new("T0", course.clone(), professor.clone()));
        repo.save(Section::new("T1", course.clone(), professor.clone()));

        let mut updated = repo.find_by_id("T0").unwrap();
        updated.enroll(Student::new("Ana", "S1", "Intro"));
        repo.upsert(updated);

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.list_all()[0].code, "T0");
        assert_eq!(repo.get("T0").unwrap().enrollment_count(), 1);

        repo.upsert(Section::new("T2", course, professor));
        assert_eq!(repo.len(), 3);
    }
}
