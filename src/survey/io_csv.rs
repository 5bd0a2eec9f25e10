// Primitives for reading and writing CSV files.

use std::io::Write;

use crate::survey::{
    io_common::{find_question, register_answer},
    *,
};

pub const HEADER: [&str; 4] = ["Section", "Question", "Response", "Aggregate Percentage"];

/// Writes the result table in CSV, with a header row.
///
/// Fields are quoted only when needed (commas, quotes or line breaks) and
/// lines end with `\n`, so that the same rows always give the same bytes.
pub fn export_csv<W: Write>(rows: &[ResultRow], writer: W) -> BiResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(HEADER).context(CsvWriteSnafu {})?;
    for row in rows.iter() {
        let percentage = row.aggregate.to_string();
        wtr.write_record([
            row.section.as_str(),
            row.question.as_str(),
            row.response.label(),
            percentage.as_str(),
        ])
        .context(CsvWriteSnafu {})?;
    }
    wtr.flush().context(CsvFlushSnafu {})?;
    Ok(())
}

pub fn to_csv_string(rows: &[ResultRow]) -> BiResult<String> {
    let mut buffer: Vec<u8> = Vec::new();
    export_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).context(CsvEncodingSnafu {})
}

/// Reads the answers of a respondent from a CSV file.
///
/// The file must have the columns `Section`, `Question` and `Response` (in any order,
/// other columns are ignored). An export of this program is a valid input.
pub fn read_csv_answers(path: &str, session: &mut Session) -> BiResult<()> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let header = rdr.headers().context(CsvOpenSnafu { path })?.clone();
    debug!("read_csv_answers: header: {:?}", header);
    let col = |name: &str| -> BiResult<usize> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .context(CsvMissingColumnSnafu { path, column: name })
    };
    let section_idx = col(HEADER[0])?;
    let question_idx = col(HEADER[1])?;
    let response_idx = col(HEADER[2])?;

    let mut num_answers = 0;
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_answers: lineno: {:?} line: {:?}", lineno, line);
        let section = line
            .get(section_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let question = line
            .get(question_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let response = line
            .get(response_idx)
            .context(CsvLineTooShortSnafu { lineno })?;

        let q_idx = find_question(session.survey(), section, question).context(
            UnknownQuestionSnafu {
                section,
                question,
                lineno,
            },
        )?;
        register_answer(
            session,
            section,
            q_idx,
            response,
            format!("{} line {}", path, lineno),
        )?;
        num_answers += 1;
    }
    info!("Read {} answers from {:?}", num_answers, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::io_common::temp_path;

    fn two_section_survey() -> SurveyDefinition {
        likert_survey::builder::Builder::new("Golden")
            .section("Timeliness", &["Reports arrive on time."])
            .unwrap()
            .section(
                "Accuracy and Reliability",
                &[
                    "Numbers are right, \"mostly\".",
                    "I trust the reports, even late ones.",
                ],
            )
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn golden_export() {
        let survey = two_section_survey();
        let mut session = Session::new(&survey);
        session
            .register_response("Timeliness", 0, ScaleLabel::Agree)
            .unwrap();
        session
            .register_response("Accuracy and Reliability", 0, ScaleLabel::StronglyAgree)
            .unwrap();
        session
            .register_response("Accuracy and Reliability", 1, ScaleLabel::Neutral)
            .unwrap();
        let submission = session.submit();
        let text = to_csv_string(submission.rows()).unwrap();
        let expected = "Section,Question,Response,Aggregate Percentage\n\
            Timeliness,Reports arrive on time.,Agree,80.00%\n\
            Accuracy and Reliability,\"Numbers are right, \"\"mostly\"\".\",Strongly Agree,80.00%\n\
            Accuracy and Reliability,\"I trust the reports, even late ones.\",Neutral,80.00%\n";
        assert_eq!(text, expected);
        // Stable output
        assert_eq!(to_csv_string(submission.rows()).unwrap(), expected);
    }

    #[test]
    fn export_parses_back() {
        let survey = SurveyDefinition::bi_department();
        let mut session = Session::new(&survey);
        session
            .register_response("Value and Insight", 1, ScaleLabel::Agree)
            .unwrap();
        session
            .register_response("Collaboration", 0, ScaleLabel::StronglyAgree)
            .unwrap();
        let submission = session.submit();
        let text = to_csv_string(submission.rows()).unwrap();

        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let header: Vec<String> = rdr
            .headers()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(header, HEADER.to_vec());
        let parsed: Vec<(String, String, String, String)> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                (
                    r[0].to_string(),
                    r[1].to_string(),
                    r[2].to_string(),
                    r[3].to_string(),
                )
            })
            .collect();
        let expected: Vec<(String, String, String, String)> = submission
            .rows()
            .iter()
            .map(|r| {
                (
                    r.section.clone(),
                    r.question.clone(),
                    r.response.label().to_string(),
                    r.aggregate.to_string(),
                )
            })
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn default_export_is_twenty_percent() {
        let survey = SurveyDefinition::bi_department();
        let submission = Session::new(&survey).submit();
        let text = to_csv_string(submission.rows()).unwrap();
        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let mut count = 0;
        for r in rdr.records() {
            let r = r.unwrap();
            assert_eq!(&r[2], "Strongly Disagree");
            assert_eq!(&r[3], "20.00%");
            count += 1;
        }
        assert_eq!(count, 12);
    }

    #[test]
    fn export_feeds_back_as_input() {
        let survey = two_section_survey();
        let mut session = Session::new(&survey);
        session
            .register_response("Accuracy and Reliability", 1, ScaleLabel::Disagree)
            .unwrap();
        session
            .register_response("Timeliness", 0, ScaleLabel::StronglyAgree)
            .unwrap();
        let first = session.submit();

        let p = temp_path("feed_back", "csv");
        fs::write(&p, to_csv_string(first.rows()).unwrap()).unwrap();

        let mut session2 = Session::new(&survey);
        read_csv_answers(&p, &mut session2).unwrap();
        assert_eq!(session2.defaulted_count(), 0);
        assert_eq!(session2.submit().results(), first.results());
    }

    #[test]
    fn partial_input_keeps_defaults() {
        let survey = two_section_survey();
        let p = temp_path("partial", "csv");
        fs::write(
            &p,
            "Question,Response,Section\nReports arrive on time., agree ,Timeliness\n",
        )
        .unwrap();
        let mut session = Session::new(&survey);
        read_csv_answers(&p, &mut session).unwrap();
        assert_eq!(session.response("Timeliness", 0), Some(ScaleLabel::Agree));
        assert_eq!(
            session.response("Accuracy and Reliability", 0),
            Some(ScaleLabel::StronglyDisagree)
        );
        assert_eq!(session.defaulted_count(), 2);
    }

    #[test]
    fn unknown_question_is_an_error() {
        let survey = two_section_survey();
        let p = temp_path("unknown_question", "csv");
        fs::write(&p, "Section,Question,Response\nTimeliness,Is it late?,Agree\n").unwrap();
        let mut session = Session::new(&survey);
        assert!(matches!(
            read_csv_answers(&p, &mut session),
            Err(BiSurveyError::UnknownQuestion { lineno: 2, .. })
        ));
    }

    #[test]
    fn missing_column_is_an_error() {
        let survey = two_section_survey();
        let p = temp_path("missing_column", "csv");
        fs::write(&p, "Section,Question\nTimeliness,Reports arrive on time.\n").unwrap();
        let mut session = Session::new(&survey);
        match read_csv_answers(&p, &mut session) {
            Err(BiSurveyError::CsvMissingColumn { column, .. }) => assert_eq!(column, "Response"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn invalid_label_is_an_error() {
        let survey = two_section_survey();
        let p = temp_path("invalid_label", "csv");
        fs::write(
            &p,
            "Section,Question,Response\nTimeliness,Reports arrive on time.,Sometimes\n",
        )
        .unwrap();
        let mut session = Session::new(&survey);
        assert!(matches!(
            read_csv_answers(&p, &mut session),
            Err(BiSurveyError::InvalidAnswer {
                source: SurveyErrors::UnknownLabel(_),
                ..
            })
        ));
    }
}
