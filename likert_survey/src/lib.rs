pub mod builder;
mod config;
pub mod manual;

use log::{debug, info, warn};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct Score(u32);

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Score(iter.map(|s| s.0).sum())
    }
}

impl From<ScaleLabel> for Score {
    fn from(l: ScaleLabel) -> Score {
        Score(l.score())
    }
}

/// The answers of one respondent.
///
/// The answers are stored per section, in the same order as the sections and
/// questions of the survey definition they were created from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseSet {
    // Invariant: same shape as the sections of the definition.
    answers: Vec<Vec<ScaleLabel>>,
    // Which answers were explicitly given, as opposed to pre-selected.
    explicit: Vec<Vec<bool>>,
}

impl ResponseSet {
    /// Creates the answers for a survey, with the default option pre-selected everywhere.
    pub fn with_defaults(survey: &SurveyDefinition) -> ResponseSet {
        let answers: Vec<Vec<ScaleLabel>> = survey
            .sections()
            .iter()
            .map(|s| vec![ScaleLabel::default(); s.questions.len()])
            .collect();
        let explicit = answers.iter().map(|a| vec![false; a.len()]).collect();
        ResponseSet { answers, explicit }
    }

    /// The answers of the section at the given position.
    pub fn section_answers(&self, section_idx: usize) -> Option<&[ScaleLabel]> {
        self.answers.get(section_idx).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.answers.iter().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if these answers were created for the given survey: same number
    /// of sections and same number of questions in each section.
    pub fn matches(&self, survey: &SurveyDefinition) -> bool {
        self.answers.len() == survey.sections().len()
            && survey
                .sections()
                .iter()
                .zip(self.answers.iter())
                .all(|(s, a)| s.questions.len() == a.len())
    }
}

/// An ongoing survey for a single respondent.
///
/// The session starts with every question answered with the pre-selected
/// option ([ScaleLabel::default]). Answers can be changed any number of times
/// until [Session::submit] is called, which consumes the session.
///
/// ```
/// use likert_survey::{ScaleLabel, Session, SurveyDefinition};
///
/// let survey = SurveyDefinition::bi_department();
/// let mut session = Session::new(&survey);
/// session.register_response("Timeliness", 0, ScaleLabel::Agree)?;
/// let submission = session.submit();
/// let timeliness = &submission.aggregates()[3];
/// assert_eq!(timeliness.percentage.to_string(), "80.00%");
///
/// # Ok::<(), likert_survey::SurveyErrors>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session<'a> {
    survey: &'a SurveyDefinition,
    responses: ResponseSet,
}

impl<'a> Session<'a> {
    pub fn new(survey: &'a SurveyDefinition) -> Session<'a> {
        debug!(
            "Session::new: survey {:?} with {} questions",
            survey.title(),
            survey.num_questions()
        );
        Session {
            survey,
            responses: ResponseSet::with_defaults(survey),
        }
    }

    pub fn survey(&self) -> &SurveyDefinition {
        self.survey
    }

    /// Records the answer to a question, replacing any previous answer.
    ///
    /// Arguments:
    /// * `section` the name of the section, which must be part of the survey
    /// * `question_idx` the position of the question in the section, starting at 0
    /// * `label` the answer
    pub fn register_response(
        &mut self,
        section: &str,
        question_idx: usize,
        label: ScaleLabel,
    ) -> Result<(), SurveyErrors> {
        let section_idx = self
            .survey
            .section_index(section)
            .ok_or_else(|| SurveyErrors::UnknownSection(section.to_string()))?;
        let answers = &mut self.responses.answers[section_idx];
        let num_questions = answers.len();
        let slot = answers
            .get_mut(question_idx)
            .ok_or_else(|| SurveyErrors::QuestionOutOfRange {
                section: section.to_string(),
                index: question_idx,
                num_questions,
            })?;
        debug!(
            "register_response: {:?}[{}]: {:?} -> {:?}",
            section, question_idx, slot, label
        );
        *slot = label;
        self.responses.explicit[section_idx][question_idx] = true;
        Ok(())
    }

    /// Same as [Session::register_response], with the answer given as text.
    pub fn register_response_str(
        &mut self,
        section: &str,
        question_idx: usize,
        label: &str,
    ) -> Result<(), SurveyErrors> {
        let l: ScaleLabel = label.parse()?;
        self.register_response(section, question_idx, l)
    }

    pub fn response(&self, section: &str, question_idx: usize) -> Option<ScaleLabel> {
        let section_idx = self.survey.section_index(section)?;
        self.responses.answers[section_idx]
            .get(question_idx)
            .copied()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    /// True when every question has an answer.
    ///
    /// Since every question starts with the pre-selected option, this is
    /// always the case for a session.
    pub fn is_complete(&self) -> bool {
        self.responses.matches(self.survey)
    }

    /// The number of questions that still hold the pre-selected option because
    /// the respondent never chose an answer for them.
    pub fn defaulted_count(&self) -> usize {
        self.responses
            .explicit
            .iter()
            .map(|v| v.iter().filter(|b| !**b).count())
            .sum()
    }

    pub fn compute_results(&self) -> SurveyResult {
        tabulate(self.survey, &self.responses)
    }

    /// Ends the session. The answers cannot be changed afterwards.
    pub fn submit(self) -> Submission<'a> {
        let defaulted = self.defaulted_count();
        if defaulted > 0 {
            warn!(
                "submit: {} question(s) were not answered explicitly and count as {:?}",
                defaulted,
                ScaleLabel::default().label()
            );
        }
        let results = self.compute_results();
        info!(
            "submit: survey {:?} submitted with {} answers",
            self.survey.title(),
            results.rows.len()
        );
        Submission {
            survey: self.survey,
            responses: self.responses,
            results,
        }
    }
}

/// A submitted survey: the final answers and the results computed from them.
#[derive(Debug, Clone)]
pub struct Submission<'a> {
    survey: &'a SurveyDefinition,
    responses: ResponseSet,
    results: SurveyResult,
}

impl<'a> Submission<'a> {
    pub fn survey(&self) -> &SurveyDefinition {
        self.survey
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn results(&self) -> &SurveyResult {
        &self.results
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.results.rows
    }

    pub fn aggregates(&self) -> &[SectionAggregate] {
        &self.results.aggregates
    }
}

/// Computes the score of each section and the table of answers.
///
/// The rows follow the order of the definition: all the questions of the
/// first section, then all the questions of the second section, and so on.
///
/// The answers must have been created for this survey (see [ResponseSet::matches]).
pub fn compute_results(
    survey: &SurveyDefinition,
    responses: &ResponseSet,
) -> Result<SurveyResult, SurveyErrors> {
    if !responses.matches(survey) {
        return Err(SurveyErrors::MismatchedResponses {
            survey: survey.title().to_string(),
            expected: survey.num_questions(),
            found: responses.len(),
        });
    }
    Ok(tabulate(survey, responses))
}

// Invariant: responses.matches(survey)
fn tabulate(survey: &SurveyDefinition, responses: &ResponseSet) -> SurveyResult {
    let mut aggregates: Vec<SectionAggregate> = Vec::new();
    let mut rows: Vec<ResultRow> = Vec::new();
    for (section, answers) in survey.sections().iter().zip(responses.answers.iter()) {
        let total: Score = answers.iter().map(|l| Score::from(*l)).sum();
        let max = Score(ScaleLabel::MAX_SCORE * section.questions.len() as u32);
        let percentage = Percentage::from_scores(total.0, max.0);
        debug!(
            "tabulate: section {:?}: {:?} / {:?} = {}",
            section.name, total, max, percentage
        );
        for (question, response) in section.questions.iter().zip(answers.iter()) {
            rows.push(ResultRow {
                section: section.name.clone(),
                question: question.clone(),
                response: *response,
                aggregate: percentage,
            });
        }
        aggregates.push(SectionAggregate {
            section: section.name.clone(),
            total_score: total.0,
            max_score: max.0,
            percentage,
        });
    }
    SurveyResult { aggregates, rows }
}
