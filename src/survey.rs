use log::{debug, info, warn};

use likert_survey::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::read_survey_definition;
use crate::survey::io_common::{write_text, DEFAULT_EXPORT_FILE};
use crate::survey::io_interactive::DialoguerPrompter;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_interactive;
pub mod io_msforms;
pub mod output;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BiSurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing to {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON survey definition {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error building the JSON summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Invalid survey definition"))]
    InvalidSurvey { source: SurveyErrors },
    #[snafu(display("Invalid answer at {at}"))]
    InvalidAnswer { source: SurveyErrors, at: String },
    #[snafu(display("Unknown question {question:?} in section {section:?} at line {lineno}"))]
    UnknownQuestion {
        section: String,
        question: String,
        lineno: usize,
    },
    #[snafu(display("Error reading the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Could not parse line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} of the CSV file is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("The CSV file {path} has no column {column:?}"))]
    CsvMissingColumn { path: String, column: String },
    #[snafu(display("Error writing the CSV export"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error flushing the CSV export"))]
    CsvFlush { source: std::io::Error },
    #[snafu(display("The CSV export is not valid UTF-8"))]
    CsvEncoding { source: std::string::FromUtf8Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no header row or no answer row"))]
    EmptyExcel {},
    #[snafu(display("The Excel file {path} has no worksheet named {name:?}"))]
    ExcelMissingWorksheet { path: String, name: String },
    #[snafu(display(
        "The Excel file {path} has several worksheets, use --excel-worksheet-name to pick one"
    ))]
    ExcelTooManyWorksheets { path: String },
    #[snafu(display("Unexpected cell in column {column}: {content}"))]
    ExcelWrongCellType { column: usize, content: String },
    #[snafu(display("Error while asking the questions"))]
    Prompt { source: dialoguer::Error },
    #[snafu(display("Unknown input type {input_type:?} (expected interactive, csv or msforms)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Input type {input_type} requires an input file (--input)"))]
    MissingInput { input_type: String },
    #[snafu(display("Difference detected between the export and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BiResult<T> = Result<T, BiSurveyError>;

/// Where the answers of the respondent come from.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Interactive,
    Csv,
    MsForms,
}

impl InputType {
    pub fn resolve(input_type: Option<&str>, input: Option<&str>) -> BiResult<InputType> {
        match (input_type, input) {
            (None, None) => Ok(InputType::Interactive),
            (None, Some(_)) => Ok(InputType::Csv),
            (Some("interactive"), _) => Ok(InputType::Interactive),
            (Some("csv"), _) => Ok(InputType::Csv),
            (Some("msforms"), _) => Ok(InputType::MsForms),
            (Some(x), _) => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }
}

fn load_survey(config_path: Option<&str>) -> BiResult<SurveyDefinition> {
    match config_path {
        Some(p) => {
            info!("Reading survey definition {:?}", p);
            read_survey_definition(p)
        }
        None => {
            debug!("load_survey: using the built-in survey");
            Ok(SurveyDefinition::bi_department())
        }
    }
}

fn collect_answers(
    session: &mut Session,
    input_type: InputType,
    input: Option<&str>,
    args: &Args,
) -> BiResult<()> {
    match input_type {
        InputType::Interactive => {
            let mut prompter = DialoguerPrompter {};
            io_interactive::fill_form(session, &mut prompter)
        }
        InputType::Csv => {
            let path = input.context(MissingInputSnafu { input_type: "csv" })?;
            io_csv::read_csv_answers(path, session)
        }
        InputType::MsForms => {
            let path = input.context(MissingInputSnafu {
                input_type: "msforms",
            })?;
            io_msforms::read_msforms_answers(path, args.excel_worksheet_name.as_deref(), session)
        }
    }
}

/// Compares an export with a reference file, and prints the differences if any.
pub fn check_reference(reference_path: &str, export: &str) -> BiResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningFileSnafu {
        path: reference_path,
    })?;
    if reference != export {
        warn!("Found differences with the reference file");
        print_diff(reference.as_str(), export, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The export matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_survey(args: &Args) -> BiResult<()> {
    let survey = load_survey(args.config.as_deref())?;
    info!(
        "survey: {:?}: {} sections, {} questions",
        survey.title(),
        survey.sections().len(),
        survey.num_questions()
    );

    let input_type = InputType::resolve(args.input_type.as_deref(), args.input.as_deref())?;
    debug!("run_survey: input type: {:?}", input_type);

    let mut session = Session::new(&survey);
    collect_answers(&mut session, input_type, args.input.as_deref(), args)?;

    if !session.is_complete() {
        whatever!("Some questions have no answer");
    }
    let submission = session.submit();

    println!("Thank you for completing the survey!");
    println!();
    println!("{}", output::render_table(submission.rows()));

    let export = io_csv::to_csv_string(submission.rows())?;
    let out = args.out.as_deref().unwrap_or(DEFAULT_EXPORT_FILE);
    write_text(out, &export)?;
    if out != "stdout" {
        println!("Survey responses and percentages written to {}", out);
    }

    if let Some(summary_p) = args.summary.as_deref() {
        let js = output::build_summary_js(&submission);
        let pretty_js = serde_json::to_string_pretty(&js).context(WritingJsonSnafu {})?;
        write_text(summary_p, &pretty_js)?;
    }

    // The reference export, if provided for comparison
    if let Some(reference_p) = args.reference.as_deref() {
        check_reference(reference_p, &export)?;
    }

    Ok(())
}
