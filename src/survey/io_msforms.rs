use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::survey::{io_common::register_answer, *};

/// Reads the answers of a respondent from an Excel export of Microsoft Forms or Google Forms.
///
/// The first row holds the question texts and the second row the answers. Forms that use a
/// Likert grid name their columns `Grid title [Question]`, which is also accepted.
/// Questions that have no column, or an empty cell, keep their default answer.
pub fn read_msforms_answers(
    path: &str,
    worksheet_name: Option<&str>,
    session: &mut Session,
) -> BiResult<()> {
    let wrange = get_range(path, worksheet_name)?;
    let mut rows = wrange.rows();

    let header = rows.next().context(EmptyExcelSnafu {})?;
    debug!("read_msforms_answers: header: {:?}", header);
    let answers = rows.next().context(EmptyExcelSnafu {})?;
    debug!("read_msforms_answers: answers: {:?}", answers);
    if rows.next().is_some() {
        warn!(
            "read_msforms_answers: {:?} has more than one respondent, only the first one is used",
            path
        );
    }

    let header_names: Vec<Option<String>> = header
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();

    let survey = session.survey().clone();
    let col_indexes = get_col_index_mapping(&survey, &header_names);
    debug!("read_msforms_answers: col_indexes: {:?}", col_indexes);

    for (col_idx, section, q_idx) in col_indexes {
        match answers.get(col_idx) {
            Some(DataType::String(s)) if s.trim().is_empty() => {
                // No choice made, keep the default.
            }
            Some(DataType::String(s)) => {
                register_answer(
                    session,
                    &section,
                    q_idx,
                    s,
                    format!("{} column {}", path, col_idx + 1),
                )?;
            }
            Some(DataType::Empty) | None => {
                // No choice made, keep the default.
            }
            Some(v) => {
                return ExcelWrongCellTypeSnafu {
                    column: col_idx + 1,
                    content: format!("{:?}", v),
                }
                .fail();
            }
        }
    }
    Ok(())
}

/// Given the header of a file (names of each of the columns), finds the column of
/// each question of the survey. The result is in the order of the survey.
pub fn get_col_index_mapping(
    survey: &SurveyDefinition,
    header: &[Option<String>],
) -> Vec<(usize, String, usize)> {
    let mut col_indexes: Vec<(usize, String, usize)> = Vec::new();
    for section in survey.sections() {
        for (q_idx, question) in section.questions.iter().enumerate() {
            let found = header.iter().position(|h| match h {
                Some(h) => header_matches(h, question),
                None => false,
            });
            match found {
                Some(col_idx) => col_indexes.push((col_idx, section.name.clone(), q_idx)),
                None => debug!(
                    "get_col_index_mapping: no column for question {:?}",
                    question
                ),
            }
        }
    }
    col_indexes
}

fn header_matches(header: &str, question: &str) -> bool {
    let header = header.trim();
    header == question || header.ends_with(format!("[{}]", question).as_str())
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> BiResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        workbook
            .worksheet_range(worksheet_name)
            .context(ExcelMissingWorksheetSnafu {
                path,
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", &path, &worksheet_name);
                Ok(wrange.clone())
            }
            _ => ExcelTooManyWorksheetsSnafu { path }.fail(),
        }
    }
}
