pub use crate::config::*;

/// A builder for survey definitions.
///
/// ```
/// pub use likert_survey::builder::Builder;
/// # use likert_survey::SurveyErrors;
///
/// let survey = Builder::new("Coffee survey")
///     .section("Taste", &["The coffee is good.", "The coffee is hot enough."])?
///     .section("Service", &["The staff is friendly."])?
///     .build()?;
///
/// assert_eq!(survey.num_questions(), 3);
///
/// # Ok::<(), SurveyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _title: String,
    pub(crate) _description: Option<String>,
    pub(crate) _sections: Vec<Section>,
}

impl Builder {
    pub fn new(title: &str) -> Builder {
        Builder {
            _title: title.to_string(),
            _description: None,
            _sections: Vec::new(),
        }
    }

    /// The introduction shown before the first question.
    pub fn description(mut self, description: &str) -> Builder {
        self._description = Some(description.to_string());
        self
    }

    /// Adds a section at the end of the survey.
    ///
    /// The questions are presented and exported in the order given here.
    pub fn section(mut self, name: &str, questions: &[&str]) -> Result<Builder, SurveyErrors> {
        if self._sections.iter().any(|s| s.name == name) {
            return Err(SurveyErrors::DuplicateSection(name.to_string()));
        }
        self._sections.push(Section::new(name, questions));
        Ok(self)
    }

    /// Validates the sections and returns the survey.
    pub fn build(self) -> Result<SurveyDefinition, SurveyErrors> {
        let survey = SurveyDefinition::new(&self._title, self._sections)?;
        Ok(match self._description {
            Some(d) => survey.with_description(&d),
            None => survey,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Builder;
    use crate::SurveyErrors;

    #[test]
    fn duplicate_section_fails_early() {
        let res = Builder::new("t")
            .section("A", &["q"])
            .and_then(|b| b.section("A", &["r"]));
        assert!(matches!(res, Err(SurveyErrors::DuplicateSection(n)) if n == "A"));
    }

    #[test]
    fn empty_section_fails_at_build() {
        let res = Builder::new("t").section("A", &[]).unwrap().build();
        assert_eq!(res, Err(SurveyErrors::EmptySection("A".to_string())));
    }

    #[test]
    fn keeps_declaration_order() {
        let survey = Builder::new("t")
            .section("B", &["b1"])
            .unwrap()
            .section("A", &["a1", "a2"])
            .unwrap()
            .build()
            .unwrap();
        let names: Vec<&str> = survey.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(survey.title(), "t");
        assert_eq!(survey.description(), None);
    }

    #[test]
    fn description_is_kept() {
        let survey = Builder::new("t")
            .description("Tell us what you think.")
            .section("A", &["a1"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(survey.description(), Some("Tell us what you think."));
    }
}
