use crate::survey::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub questions: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "surveyTitle")]
    pub survey_title: Option<String>,
    pub description: Option<String>,
    pub sections: Vec<SectionConfig>,
}

impl SurveyConfig {
    pub fn validate(&self) -> BiResult<SurveyDefinition> {
        let title = self
            .survey_title
            .clone()
            .unwrap_or_else(|| "Survey".to_string());
        let sections: Vec<Section> = self
            .sections
            .iter()
            .map(|s| Section {
                name: s.name.clone(),
                questions: s.questions.clone(),
            })
            .collect();
        let survey = SurveyDefinition::new(&title, sections).context(InvalidSurveySnafu {})?;
        Ok(match self.description.as_deref() {
            Some(d) => survey.with_description(d),
            None => survey,
        })
    }
}

pub fn read_survey_definition(path: &str) -> BiResult<SurveyDefinition> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_survey_definition: config: {:?}", config);
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::io_common::temp_path;

    #[test]
    fn reads_custom_survey() {
        let p = temp_path("custom_survey", "json");
        fs::write(
            &p,
            r#"{
                "surveyTitle": "Coffee survey",
                "description": "Five seconds about your coffee.",
                "sections": [
                    {"name": "Taste", "questions": ["The coffee is good.", "The coffee is hot."]},
                    {"name": "Service", "questions": ["The staff is friendly."]}
                ]
            }"#,
        )
        .unwrap();
        let survey = read_survey_definition(&p).unwrap();
        assert_eq!(survey.title(), "Coffee survey");
        assert_eq!(survey.description(), Some("Five seconds about your coffee."));
        assert_eq!(survey.sections().len(), 2);
        assert_eq!(survey.sections()[0].name, "Taste");
        assert_eq!(survey.num_questions(), 3);
    }

    #[test]
    fn title_is_optional() {
        let config: SurveyConfig =
            serde_json::from_str(r#"{"sections": [{"name": "A", "questions": ["q"]}]}"#).unwrap();
        let survey = config.validate().unwrap();
        assert_eq!(survey.title(), "Survey");
        assert_eq!(survey.description(), None);
    }

    #[test]
    fn duplicate_sections_are_rejected() {
        let config: SurveyConfig = serde_json::from_str(
            r#"{"sections": [{"name": "A", "questions": ["q"]}, {"name": "A", "questions": ["r"]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(BiSurveyError::InvalidSurvey {
                source: SurveyErrors::DuplicateSection(_)
            })
        ));
    }

    #[test]
    fn malformed_json() {
        let p = temp_path("malformed_survey", "json");
        fs::write(&p, r#"{"sections": "#).unwrap();
        assert!(matches!(
            read_survey_definition(&p),
            Err(BiSurveyError::ParsingJson { .. })
        ));
    }
}
