use clap::Parser;

/// This is a Likert-scale survey program: it collects the answers of one respondent,
/// scores each section and exports the results in CSV.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the survey definition in JSON format.
    /// If not provided, the survey of the Business Intelligence department is used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) If specified, the answers are read from this file instead of
    /// being asked in the terminal.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default interactive, or csv when --input is given) The type of the input:
    /// interactive, csv or msforms. See the manual for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path or 'stdout') Where to write the CSV export of the answers and the
    /// section percentages. Defaults to bi_survey_responses_and_percentages.csv
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the score of each section will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference CSV export. If provided, bisurvey will
    /// check that the exported output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    /// It is only required if the file has more than one worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
