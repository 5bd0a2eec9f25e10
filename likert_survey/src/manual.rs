/*!

This is the long-form manual for `likert_survey` and `bisurvey`.

## Scoring

Every answer is one of five options, each worth a number of points:

| Answer            | Score |
|-------------------|-------|
| Strongly Disagree | 1     |
| Disagree          | 2     |
| Neutral           | 3     |
| Agree             | 4     |
| Strongly Agree    | 5     |

The score of a section is the sum of the scores of its answers divided by the
best possible sum (5 times the number of questions), expressed as a percentage
with two decimals: `80.00%`. A section answered only with `Strongly Disagree`
scores `20.00%` and a section answered only with `Strongly Agree` scores `100.00%`.

Every question starts with `Strongly Disagree` selected. A question that the
respondent skips is therefore scored as `Strongly Disagree`. `bisurvey` logs a
warning when this happens.

## Input formats

The answers of the respondent can be collected in the following ways:
* `interactive` (default) the questions are asked one by one in the terminal. After the
  last question, `bisurvey` asks whether to submit the survey. Answering no goes through
  the questions again, with the current answers pre-selected.
* `csv` a comma-separated file with the columns `Section`, `Question` and `Response`.
  This is also the format of the export, so an export can be fed back.
* `msforms` an Excel (.xlsx) export from Microsoft Forms or Google Forms. The first
  row holds the text of the questions and the second row holds the answers.

With the file formats, questions that are not found in the file keep the default answer.

## Survey definition

By default, `bisurvey` runs the survey of the Business Intelligence department. Another survey
can be provided in JSON with the `--config` flag:

```json
{
  "surveyTitle": "Coffee survey",
  "description": "A few questions about the coffee machine.",
  "sections": [
    { "name": "Taste", "questions": ["The coffee is good."] },
    { "name": "Service", "questions": ["The staff is friendly."] }
  ]
}
```

Section names must be unique and each section must have at least one question.
The title and the description are optional. The description is shown under the title
before the first question.

In the files, the answers are matched ignoring the case of the letters and the
surrounding spaces: ` strongly agree ` is read as `Strongly Agree`.

## Outputs

The results table is printed after the survey is submitted, and exported in CSV:

```text
Section,Question,Response,Aggregate Percentage
Timeliness,The BI department delivers reports in a timely manner.,Agree,80.00%
```

The default file name is `bi_survey_responses_and_percentages.csv`. The `--summary`
flag writes the score of each section in JSON, and the `--reference` flag checks the
export against a previously saved file.

*/
