// Asking the questions in the terminal.

use crate::survey::*;

/// Something that can ask the respondent to pick one option in a list.
pub trait Prompter {
    /// Presents the survey before the first question.
    fn intro(&mut self, title: &str, description: Option<&str>);

    /// Prints a header before the questions of a section.
    fn section(&mut self, name: &str);

    /// Returns the index of the chosen option.
    fn select(&mut self, question: &str, options: &[&str], default: usize) -> BiResult<usize>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> BiResult<bool>;
}

/// Asks the questions with the `dialoguer` selection widget.
pub struct DialoguerPrompter {}

impl Prompter for DialoguerPrompter {
    fn intro(&mut self, title: &str, description: Option<&str>) {
        println!("{}", title);
        if let Some(d) = description {
            println!();
            println!("{}", d);
        }
    }

    fn section(&mut self, name: &str) {
        println!();
        println!("### {}", name);
    }

    fn select(&mut self, question: &str, options: &[&str], default: usize) -> BiResult<usize> {
        dialoguer::Select::new()
            .with_prompt(question)
            .items(options)
            .default(default)
            .interact()
            .context(PromptSnafu {})
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> BiResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context(PromptSnafu {})
    }
}

/// Runs the form until the respondent submits it.
///
/// After the last question the respondent either submits the survey or goes
/// through the questions again, with the current answers pre-selected.
pub fn fill_form<P: Prompter>(session: &mut Session, prompter: &mut P) -> BiResult<()> {
    let survey = session.survey().clone();
    prompter.intro(survey.title(), survey.description());
    let mut pass = 1;
    loop {
        ask_questions(session, prompter)?;
        if prompter.confirm("Submit the survey?", true)? {
            info!("fill_form: survey submitted after {} pass(es)", pass);
            return Ok(());
        }
        pass += 1;
        debug!("fill_form: reviewing the answers, pass {}", pass);
    }
}

/// Asks every question of the survey, in order.
///
/// The option of the current answer is pre-selected, which is the lowest
/// option for a new session.
pub fn ask_questions<P: Prompter>(session: &mut Session, prompter: &mut P) -> BiResult<()> {
    let survey = session.survey().clone();
    let options = ScaleLabel::labels();
    for section in survey.sections() {
        prompter.section(&section.name);
        for (idx, question) in section.questions.iter().enumerate() {
            let current = session
                .response(&section.name, idx)
                .unwrap_or_default();
            let default = ScaleLabel::ALL
                .iter()
                .position(|l| *l == current)
                .unwrap_or(0);
            let choice = prompter.select(question, &options, default)?;
            let label = match ScaleLabel::ALL.get(choice) {
                Some(l) => *l,
                None => whatever!("Option {} is not a valid answer", choice),
            };
            session
                .register_response(&section.name, idx, label)
                .context(InvalidAnswerSnafu {
                    at: format!("{} #{}", section.name, idx + 1),
                })?;
        }
    }
    Ok(())
}
