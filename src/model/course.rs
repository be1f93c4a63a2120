use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Delivery format of a course, with the data each format carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourseKind {
    Plain,
    InPerson { room: String },
    Remote { platform: String },
}

impl CourseKind {
    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            CourseKind::Plain => "Regular",
            CourseKind::InPerson { .. } => "In-person",
            CourseKind::Remote { .. } => "Remote",
        }
    }

    pub fn course_type(&self) -> CourseType {
        match self {
            CourseKind::Plain => CourseType::Plain,
            CourseKind::InPerson { .. } => CourseType::InPerson,
            CourseKind::Remote { .. } => CourseType::Remote,
        }
    }

    /// The room or platform, if this format has one.
    pub fn detail(&self) -> Option<String> {
        match self {
            CourseKind::Plain => None,
            CourseKind::InPerson { room } => Some(format!("Room: {room}")),
            CourseKind::Remote { platform } => Some(format!("Platform: {platform}")),
        }
    }
}

/// Type tag used when registering a course, before the variant data is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    Plain,
    InPerson,
    Remote,
}

impl CourseType {
    /// Builds the matching [`CourseKind`]; `extra` is the room or platform.
    pub fn into_kind(self, extra: &str) -> CourseKind {
        match self {
            CourseType::Plain => CourseKind::Plain,
            CourseType::InPerson => CourseKind::InPerson {
                room: extra.trim().to_string(),
            },
            CourseType::Remote => CourseKind::Remote {
                platform: extra.trim().to_string(),
            },
        }
    }
}

impl FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "regular" => Ok(CourseType::Plain),
            "in-person" | "inperson" | "presencial" => Ok(CourseType::InPerson),
            "remote" | "ead" | "online" => Ok(CourseType::Remote),
            other => Err(format!("Unknown course type: '{other}'")),
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseType::Plain => write!(f, "plain"),
            CourseType::InPerson => write!(f, "in-person"),
            CourseType::Remote => write!(f, "remote"),
        }
    }
}

/// A course offered by the institution.
///
/// Both `code` and `name` are unique and matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub code: String,
    pub hours: u32,
    pub kind: CourseKind,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        hours: u32,
        kind: CourseKind,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            hours,
            kind,
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.trim().to_lowercase()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.has_code(&other.code)
    }
}

impl Eq for Course {}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} course: {} | Code: {} | Hours: {}h",
            self.kind.label(),
            self.name,
            self.code,
            self.hours
        )?;
        if let Some(detail) = self.kind.detail() {
            write!(f, " | {detail}")?;
        }
        Ok(())
    }
}
