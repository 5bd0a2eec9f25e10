use crate::survey::*;

/// The name of the export when no output is given.
pub const DEFAULT_EXPORT_FILE: &str = "bi_survey_responses_and_percentages.csv";

/// Writes some text to a file, or to the standard output if the destination is `stdout`.
pub fn write_text(dest: &str, content: &str) -> BiResult<()> {
    if dest == "stdout" {
        print!("{}", content);
        Ok(())
    } else {
        info!("Writing {:?}", dest);
        fs::write(dest, content).context(WritingFileSnafu { path: dest })
    }
}

/// The position of a question in its section, if both exist.
pub fn find_question(survey: &SurveyDefinition, section: &str, question: &str) -> Option<usize> {
    let question = question.trim();
    survey
        .section(section.trim())?
        .questions
        .iter()
        .position(|q| q == question)
}

/// Reads an answer typed in a file. Surrounding spaces and the case of the letters are ignored.
pub fn parse_answer(text: &str) -> Result<ScaleLabel, SurveyErrors> {
    let trimmed = text.trim();
    ScaleLabel::ALL
        .iter()
        .find(|l| l.label().eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| SurveyErrors::UnknownLabel(text.to_string()))
}

/// Registers an answer given as text, with the location of the answer to report errors.
pub fn register_answer(
    session: &mut Session,
    section: &str,
    question_idx: usize,
    label: &str,
    at: String,
) -> BiResult<()> {
    parse_answer(label)
        .and_then(|l| session.register_response(section.trim(), question_idx, l))
        .context(InvalidAnswerSnafu { at })
}

#[cfg(test)]
pub fn temp_path(name: &str, ext: &str) -> String {
    std::env::temp_dir()
        .join(format!("bisurvey_{}_{}.{}", name, std::process::id(), ext))
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_questions() {
        let survey = SurveyDefinition::bi_department();
        assert_eq!(
            find_question(
                &survey,
                "Accuracy and Reliability",
                " I trust the reports the BI department has created for me."
            ),
            Some(1)
        );
        assert_eq!(find_question(&survey, "Timeliness", "Is it late?"), None);
        assert_eq!(
            find_question(
                &survey,
                "Timelines",
                "The BI department delivers reports in a timely manner."
            ),
            None
        );
    }

    #[test]
    fn answers_from_files_are_normalized() {
        assert_eq!(parse_answer(" strongly agree "), Ok(ScaleLabel::StronglyAgree));
        assert_eq!(parse_answer("NEUTRAL"), Ok(ScaleLabel::Neutral));
        assert_eq!(
            parse_answer("Agree!"),
            Err(SurveyErrors::UnknownLabel("Agree!".to_string()))
        );

        let survey = SurveyDefinition::bi_department();
        let mut session = Session::new(&survey);
        register_answer(&mut session, " Timeliness ", 0, "agree", "line 2".to_string()).unwrap();
        assert_eq!(session.response("Timeliness", 0), Some(ScaleLabel::Agree));
    }

    #[test]
    fn bad_label_reports_location() {
        let survey = SurveyDefinition::bi_department();
        let mut session = Session::new(&survey);
        let res = register_answer(&mut session, "Timeliness", 0, "Yes", "line 2".to_string());
        match res {
            Err(BiSurveyError::InvalidAnswer { at, source }) => {
                assert_eq!(at, "line 2");
                assert_eq!(source, SurveyErrors::UnknownLabel("Yes".to_string()));
            }
            x => panic!("unexpected result {:?}", x),
        }
    }
}
