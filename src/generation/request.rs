use std::fmt;
use std::str::FromStr;

use super::GenerationError;

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_QUESTION_TYPE: &str = "multiple_choice";

/// Difficulty. Quiz-style labels (`easy`/`medium`/`hard`) are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Label stored on a quiz record.
    pub fn difficulty(&self) -> &'static str {
        match self {
            Level::Beginner => "easy",
            Level::Intermediate => "medium",
            Level::Advanced => "hard",
        }
    }
}

impl FromStr for Level {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "beginner" | "easy" => Ok(Level::Beginner),
            "intermediate" | "medium" => Ok(Level::Intermediate),
            "advanced" | "hard" => Ok(Level::Advanced),
            _ => Err(GenerationError::InvalidRequest(format!(
                "unknown level '{}', expected one of beginner, intermediate, advanced, easy, medium, hard",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobRole {
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    MobileDeveloper,
    DevOpsEngineer,
    DataScientist,
    QaEngineer,
    ProductManager,
}

impl JobRole {
    pub const ALL: [JobRole; 8] = [
        JobRole::FrontendDeveloper,
        JobRole::BackendDeveloper,
        JobRole::FullStackDeveloper,
        JobRole::MobileDeveloper,
        JobRole::DevOpsEngineer,
        JobRole::DataScientist,
        JobRole::QaEngineer,
        JobRole::ProductManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::FrontendDeveloper => "Frontend Developer",
            JobRole::BackendDeveloper => "Backend Developer",
            JobRole::FullStackDeveloper => "Full Stack Developer",
            JobRole::MobileDeveloper => "Mobile Developer",
            JobRole::DevOpsEngineer => "DevOps Engineer",
            JobRole::DataScientist => "Data Scientist",
            JobRole::QaEngineer => "QA Engineer",
            JobRole::ProductManager => "Product Manager",
        }
    }
}

impl FromStr for JobRole {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        JobRole::ALL
            .into_iter()
            .find(|role| canonical(role.as_str()) == wanted)
            .ok_or_else(|| {
                GenerationError::InvalidRequest(format!("unknown job role '{}'", s.trim()))
            })
    }
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TechnicalSkills,
    SystemDesign,
    Behavioral,
    ProblemSolving,
    Coding,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::TechnicalSkills,
        Category::SystemDesign,
        Category::Behavioral,
        Category::ProblemSolving,
        Category::Coding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TechnicalSkills => "Technical Skills",
            Category::SystemDesign => "System Design",
            Category::Behavioral => "Behavioral",
            Category::ProblemSolving => "Problem Solving",
            Category::Coding => "Coding",
        }
    }
}

impl FromStr for Category {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        Category::ALL
            .into_iter()
            .find(|c| canonical(c.as_str()) == wanted)
            .ok_or_else(|| {
                GenerationError::InvalidRequest(format!("unknown category '{}'", s.trim()))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the questions are about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// Free-form academic subject and topic.
    Subject { subject: String, topic: String },
    /// Job interview practice.
    Interview { job_role: JobRole, category: Category },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub focus: Focus,
    pub level: Level,
    pub question_count: usize,
    /// Passed to the model as a hint only.
    pub question_type: String,
}

impl GenerationRequest {
    pub fn subject(
        subject: &str,
        topic: &str,
        level: &str,
        question_count: Option<usize>,
        question_type: Option<&str>,
    ) -> Result<Self, GenerationError> {
        let subject = required("subject", subject)?;
        let topic = required("topic", topic)?;
        Ok(Self {
            focus: Focus::Subject { subject, topic },
            level: level.parse()?,
            question_count: question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            question_type: question_type
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_QUESTION_TYPE)
                .to_string(),
        })
    }

    pub fn interview(
        job_role: &str,
        level: &str,
        category: &str,
        question_count: Option<usize>,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            focus: Focus::Interview {
                job_role: job_role.parse()?,
                category: category.parse()?,
            },
            level: level.parse()?,
            question_count: question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            question_type: DEFAULT_QUESTION_TYPE.to_string(),
        })
    }

    pub fn check_question_count(&self, max: usize) -> Result<(), GenerationError> {
        if self.question_count == 0 || self.question_count > max {
            return Err(GenerationError::InvalidRequest(format!(
                "question count must be between 1 and {}, got {}",
                max, self.question_count
            )));
        }
        Ok(())
    }

    /// Human-readable subject line, used for quiz titles.
    pub fn subject_line(&self) -> String {
        match &self.focus {
            Focus::Subject { topic, .. } => topic.clone(),
            Focus::Interview { job_role, category } => format!("{} {}", job_role, category),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, GenerationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GenerationError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Lowercase, `-`/`_` as spaces, single-spaced.
fn canonical(s: &str) -> String {
    s.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
