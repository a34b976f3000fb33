use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Header spelling preserved verbatim; downstream consumers match on it
const TABLE_HEADER_INDEX: &str = "Index";
const TABLE_HEADER_POINTS: &str = "Summerized Key Points from Web Article";

/// Shape of the final rendered summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "text" => Ok(OutputFormat::Text),
            other => Err(Error::Formatting(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

/// Render the combined summary in the requested shape.
///
/// Text mode returns the summary unchanged. Table mode splits it into
/// sentences and renders a two-column table of 1-based index and sentence.
/// A summary with no splittable sentences is a formatting failure; the
/// caller still holds the unformatted summary.
pub fn format_summary(summary: &str, mode: OutputFormat) -> Result<String> {
    match mode {
        OutputFormat::Text => Ok(summary.to_string()),
        OutputFormat::Table => {
            let sentences = split_sentences(summary);
            if sentences.is_empty() {
                return Err(Error::Formatting(
                    "summary contains no sentences to tabulate".to_string(),
                ));
            }
            Ok(render_table(&sentences))
        }
    }
}

/// Split text into sentences at `.` or `?` followed by whitespace.
///
/// Two exclusions keep common abbreviations intact:
/// - a word-dot-word-dot run right before the boundary ("e.g.", "U.S.")
/// - a capital-lowercase-dot run right before the boundary ("Mr.", "Dr.")
///
/// The terminator stays with its sentence; the single separator whitespace
/// character is consumed. Empty segments are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        if !chars[i].is_whitespace() {
            continue;
        }
        let terminator = chars[i - 1];
        if terminator != '.' && terminator != '?' {
            continue;
        }
        if is_abbreviation(&chars, i) {
            continue;
        }

        let sentence: String = chars[start..i].iter().collect();
        if !sentence.trim().is_empty() {
            sentences.push(sentence);
        }
        start = i + 1;
    }

    if start < chars.len() {
        let sentence: String = chars[start..].iter().collect();
        if !sentence.trim().is_empty() {
            sentences.push(sentence);
        }
    }

    sentences
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check the characters before a candidate boundary for abbreviation shapes
fn is_abbreviation(chars: &[char], boundary: usize) -> bool {
    // word '.' word '.' as in "e.g." or "U.S."
    if boundary >= 4
        && is_word_char(chars[boundary - 4])
        && chars[boundary - 3] == '.'
        && is_word_char(chars[boundary - 2])
    {
        return true;
    }
    // capital lowercase '.' as in "Mr." or "Dr."
    if boundary >= 3
        && chars[boundary - 3].is_ascii_uppercase()
        && chars[boundary - 2].is_ascii_lowercase()
        && chars[boundary - 1] == '.'
    {
        return true;
    }
    false
}

/// Render sentences as a two-column plain-text table
fn render_table(sentences: &[String]) -> String {
    let index_width = TABLE_HEADER_INDEX
        .len()
        .max(sentences.len().to_string().len());
    let points_width = sentences
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        .max(TABLE_HEADER_POINTS.len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:>index_width$}  {}\n",
        TABLE_HEADER_INDEX, TABLE_HEADER_POINTS
    ));
    out.push_str(&format!(
        "{}  {}\n",
        "-".repeat(index_width),
        "-".repeat(points_width)
    ));
    for (index, sentence) in sentences.iter().enumerate() {
        out.push_str(&format!("{:>index_width$}  {}\n", index + 1, sentence));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_mode_is_a_passthrough() {
        let summary = "Anything at all. Even this.";
        assert_eq!(
            format_summary(summary, OutputFormat::Text).unwrap(),
            summary
        );
    }

    #[test]
    fn table_mode_indexes_each_sentence() {
        let summary = "First point here. Second point here. Third point here.";
        let table = format_summary(summary, OutputFormat::Table).unwrap();

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains(TABLE_HEADER_INDEX));
        assert!(lines[0].contains(TABLE_HEADER_POINTS));
        assert!(lines[1].starts_with('-'));
        assert!(lines[2].contains("1  First point here."));
        assert!(lines[3].contains("2  Second point here."));
        assert!(lines[4].contains("3  Third point here."));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_summary_is_a_formatting_error() {
        let result = format_summary("", OutputFormat::Table);
        assert!(matches!(result, Err(Error::Formatting(_))));
    }

    #[test]
    fn splits_on_question_marks() {
        let sentences = split_sentences("Really? Yes indeed.");
        assert_eq!(sentences, vec!["Really?", "Yes indeed."]);
    }

    #[test]
    fn does_not_split_after_double_dotted_abbreviations() {
        let sentences = split_sentences("See e.g. the appendix. The rest follows.");
        assert_eq!(
            sentences,
            vec!["See e.g. the appendix.", "The rest follows."]
        );

        let sentences = split_sentences("U.S. policy shifted. Markets reacted.");
        assert_eq!(sentences, vec!["U.S. policy shifted.", "Markets reacted."]);
    }

    #[test]
    fn does_not_split_after_honorifics() {
        let sentences = split_sentences("I met Mr. Smith yesterday. He waved.");
        assert_eq!(sentences, vec!["I met Mr. Smith yesterday.", "He waved."]);
    }

    #[test]
    fn single_sentence_stays_whole() {
        let sentences = split_sentences("Just one sentence without a boundary");
        assert_eq!(sentences, vec!["Just one sentence without a boundary"]);
    }

    #[test]
    fn trailing_whitespace_does_not_add_an_empty_sentence() {
        let sentences = split_sentences("One sentence. ");
        assert_eq!(sentences, vec!["One sentence."]);
    }

    #[test]
    fn output_format_round_trips_through_strings() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }
}
