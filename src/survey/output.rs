use crate::survey::io_csv::HEADER;
use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JSValue};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section: String,
    #[serde(rename = "totalScore")]
    pub total_score: u32,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    #[serde(rename = "aggregatePercentage")]
    pub aggregate_percentage: String,
}

impl From<&SectionAggregate> for SectionSummary {
    fn from(agg: &SectionAggregate) -> SectionSummary {
        SectionSummary {
            section: agg.section.clone(),
            total_score: agg.total_score,
            max_score: agg.max_score,
            aggregate_percentage: agg.percentage.to_string(),
        }
    }
}

pub fn build_summary_js(submission: &Submission) -> JSValue {
    let sections: Vec<SectionSummary> = submission
        .aggregates()
        .iter()
        .map(SectionSummary::from)
        .collect();
    json!({
        "survey": submission.survey().title(),
        "sections": sections
    })
}

/// Renders the result rows as a text table, one line per question.
pub fn render_table(rows: &[ResultRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.section.clone(),
                r.question.clone(),
                r.response.label().to_string(),
                r.aggregate.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 4] = [0; 4];
    for (idx, h) in HEADER.iter().enumerate() {
        widths[idx] = h.chars().count();
    }
    for line in cells.iter() {
        for (idx, c) in line.iter().enumerate() {
            widths[idx] = widths[idx].max(c.chars().count());
        }
    }

    let format_line = |line: &[&str]| -> String {
        line.iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<String>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out: Vec<String> = vec![format_line(&HEADER)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<String>>()
            .join("-+-"),
    );
    for line in cells.iter() {
        let refs: Vec<&str> = line.iter().map(|s| s.as_str()).collect();
        out.push(format_line(&refs));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_survey() -> SurveyDefinition {
        likert_survey::builder::Builder::new("Small")
            .section("Timeliness", &["On time?"])
            .unwrap()
            .section("Accuracy", &["Right?", "Trusted?"])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn table_layout() {
        let survey = small_survey();
        let mut session = Session::new(&survey);
        session
            .register_response("Timeliness", 0, ScaleLabel::Agree)
            .unwrap();
        let submission = session.submit();
        let table = render_table(submission.rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "Section    | Question | Response          | Aggregate Percentage"
        );
        assert_eq!(
            lines[2],
            "Timeliness | On time? | Agree             | 80.00%"
        );
        assert_eq!(
            lines[4],
            "Accuracy   | Trusted? | Strongly Disagree | 20.00%"
        );
    }

    #[test]
    fn summary_json() {
        let survey = small_survey();
        let submission = Session::new(&survey).submit();
        let js = build_summary_js(&submission);
        assert_eq!(js["survey"], "Small");
        assert_eq!(
            js["sections"][1],
            json!({
                "section": "Accuracy",
                "totalScore": 2,
                "maxScore": 10,
                "aggregatePercentage": "20.00%"
            })
        );
    }
}
