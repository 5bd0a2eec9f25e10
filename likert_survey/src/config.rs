// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// One of the five ordinal answers of a Likert scale.
///
/// The order of declaration is the order in which the options are presented,
/// and the first one is the option that is pre-selected for every question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Default)]
pub enum ScaleLabel {
    #[default]
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

impl ScaleLabel {
    pub const ALL: [ScaleLabel; 5] = [
        ScaleLabel::StronglyDisagree,
        ScaleLabel::Disagree,
        ScaleLabel::Neutral,
        ScaleLabel::Agree,
        ScaleLabel::StronglyAgree,
    ];

    /// The highest score that a single answer can get.
    pub const MAX_SCORE: u32 = 5;

    /// The numeric score of this answer, from 1 (strongly disagree) to 5 (strongly agree).
    pub fn score(&self) -> u32 {
        match self {
            ScaleLabel::StronglyDisagree => 1,
            ScaleLabel::Disagree => 2,
            ScaleLabel::Neutral => 3,
            ScaleLabel::Agree => 4,
            ScaleLabel::StronglyAgree => 5,
        }
    }

    /// The text shown to the respondent and written in the exports.
    pub fn label(&self) -> &'static str {
        match self {
            ScaleLabel::StronglyDisagree => "Strongly Disagree",
            ScaleLabel::Disagree => "Disagree",
            ScaleLabel::Neutral => "Neutral",
            ScaleLabel::Agree => "Agree",
            ScaleLabel::StronglyAgree => "Strongly Agree",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        ScaleLabel::ALL.iter().map(|l| l.label()).collect()
    }
}

impl Display for ScaleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses the exact text of a label, as returned by [ScaleLabel::label].
impl FromStr for ScaleLabel {
    type Err = SurveyErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScaleLabel::ALL
            .iter()
            .find(|l| l.label() == s)
            .copied()
            .ok_or_else(|| SurveyErrors::UnknownLabel(s.to_string()))
    }
}

/// A named group of questions that are scored together.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Section {
    pub name: String,
    pub questions: Vec<String>,
}

impl Section {
    pub fn new(name: &str, questions: &[&str]) -> Section {
        Section {
            name: name.to_string(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// The fixed set of sections and questions of a survey.
///
/// A definition can only be obtained through validation, so every section
/// has a unique name and at least one question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyDefinition {
    title: String,
    description: Option<String>,
    sections: Vec<Section>,
}

impl SurveyDefinition {
    pub fn new(title: &str, sections: Vec<Section>) -> Result<SurveyDefinition, SurveyErrors> {
        if sections.is_empty() {
            return Err(SurveyErrors::NoSections);
        }
        for (idx, section) in sections.iter().enumerate() {
            if sections[..idx].iter().any(|s| s.name == section.name) {
                return Err(SurveyErrors::DuplicateSection(section.name.clone()));
            }
            if section.questions.is_empty() {
                return Err(SurveyErrors::EmptySection(section.name.clone()));
            }
            if let Some(pos) = section.questions.iter().position(|q| q.trim().is_empty()) {
                return Err(SurveyErrors::BlankQuestion {
                    section: section.name.clone(),
                    index: pos,
                });
            }
        }
        Ok(SurveyDefinition {
            title: title.to_string(),
            description: None,
            sections,
        })
    }

    /// Sets the introduction shown to the respondent before the first question.
    pub fn with_description(mut self, description: &str) -> SurveyDefinition {
        self.description = match description.trim() {
            "" => None,
            d => Some(d.to_string()),
        };
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The sections, in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub(crate) fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    pub fn num_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// The survey run by the Business Intelligence department to rate its reports and services.
    pub fn bi_department() -> SurveyDefinition {
        let sections = vec![
            Section::new(
                "Accuracy and Reliability",
                &[
                    "The reports created by the BI department are accurate and reliable.",
                    "I trust the reports the BI department has created for me.",
                ],
            ),
            Section::new(
                "Communication and Responsiveness",
                &[
                    "The BI department is responsive to my requests for information.",
                    "The BI department communicates effectively about data sources and methodologies used in reports.",
                ],
            ),
            Section::new(
                "Value and Insight",
                &[
                    "The reports provided by the BI department add value to my decision-making.",
                    "The BI department helps me uncover insights that I wouldn't have identified on my own.",
                ],
            ),
            Section::new(
                "Timeliness",
                &["The BI department delivers reports in a timely manner."],
            ),
            Section::new(
                "Usability and Clarity",
                &[
                    "The reports from the BI department are easy to understand and interpret.",
                    "I can easily access and use the data in the BI reports.",
                ],
            ),
            Section::new(
                "Support and Training",
                &[
                    "The BI department provides sufficient training or support to help me understand how to use the reports.",
                    "The BI department is willing to work with me on customizing reports to fit my needs.",
                ],
            ),
            Section::new(
                "Collaboration",
                &["The BI department collaborates well with other departments to ensure data meets organizational needs."],
            ),
        ];
        SurveyDefinition {
            title: "Business Intelligence Department Survey".to_string(),
            description: Some(
                "This survey is designed to assess how well the Business Intelligence (BI) department \
                 is serving its stakeholders. Please answer the following questions based on your \
                 experience with the BI department's reports and services."
                    .to_string(),
            ),
            sections,
        }
    }
}

// ******** Output data structures *********

/// The share of the maximum score reached by a section, between 0 and 100.
///
/// It is displayed with exactly two decimals and a percent sign, e.g. `80.00%`.
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub struct Percentage(pub f64);

impl Percentage {
    pub fn from_scores(total: u32, max: u32) -> Percentage {
        Percentage((total as f64 / max as f64) * 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct SectionAggregate {
    pub section: String,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: Percentage,
}

/// One line of the result table: a question, its answer and the score of its section.
#[derive(PartialEq, Debug, Clone)]
pub struct ResultRow {
    pub section: String,
    pub question: String,
    pub response: ScaleLabel,
    pub aggregate: Percentage,
}

#[derive(PartialEq, Debug, Clone)]
pub struct SurveyResult {
    /// One entry per section, in declaration order.
    pub aggregates: Vec<SectionAggregate>,
    /// One entry per question, sections first then questions, in declaration order.
    pub rows: Vec<ResultRow>,
}

/// Errors for invalid survey definitions or answers that do not fit the survey.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    NoSections,
    EmptySection(String),
    DuplicateSection(String),
    BlankQuestion { section: String, index: usize },
    UnknownSection(String),
    QuestionOutOfRange {
        section: String,
        index: usize,
        num_questions: usize,
    },
    UnknownLabel(String),
    MismatchedResponses {
        survey: String,
        expected: usize,
        found: usize,
    },
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::NoSections => write!(f, "the survey has no section"),
            SurveyErrors::EmptySection(name) => write!(f, "section {:?} has no question", name),
            SurveyErrors::DuplicateSection(name) => {
                write!(f, "section {:?} is declared more than once", name)
            }
            SurveyErrors::BlankQuestion { section, index } => {
                write!(f, "question {} of section {:?} is blank", index, section)
            }
            SurveyErrors::UnknownSection(name) => write!(f, "unknown section {:?}", name),
            SurveyErrors::QuestionOutOfRange {
                section,
                index,
                num_questions,
            } => write!(
                f,
                "question index {} is out of range for section {:?} ({} questions)",
                index, section, num_questions
            ),
            SurveyErrors::MismatchedResponses {
                survey,
                expected,
                found,
            } => write!(
                f,
                "the answers do not belong to survey {:?} ({} questions expected, {} found)",
                survey, expected, found
            ),
            SurveyErrors::UnknownLabel(s) => write!(
                f,
                "unknown answer {:?}, expected one of {:?}",
                s,
                ScaleLabel::labels()
            ),
        }
    }
}
