use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::COMMAND_NAMES;
use labeldesk_core::LabelSchema;

/// Completion and hints for command names, dimension keys and label values.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    schema: LabelSchema,
}

impl CliHelper {
    pub fn new(schema: LabelSchema) -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|c| c.to_string()).collect(),
            schema,
        }
    }

    /// Candidates for the word under the cursor, with its start offset.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);
        let word = &line[start..];
        let words: Vec<&str> = line[..start].split_whitespace().collect();

        let pool: Vec<String> = match words.as_slice() {
            [] => self.commands.clone(),
            ["label" | "l"] => self.schema.keys().map(str::to_string).collect(),
            ["label" | "l", dimension] => self
                .schema
                .dimension(dimension)
                .map(|d| d.values.clone())
                .unwrap_or_default(),
            ["export"] => vec!["csv".to_string(), "json".to_string()],
            _ => Vec::new(),
        };

        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(word))
            .collect();
        (start, matches)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let command = line.split_whitespace().next().unwrap_or_default();
        if self.commands.iter().any(|c| c == command) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let word = &line[start..];
        if word.is_empty() {
            return None;
        }
        matches
            .first()
            .filter(|candidate| candidate.len() > word.len())
            .map(|candidate| candidate[word.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_commands_dimensions_and_values() {
        let helper = CliHelper::new(LabelSchema::default());

        let (start, matches) = helper.candidates("su");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["submit"]);

        let (start, matches) = helper.candidates("label pr");
        assert_eq!(start, 6);
        assert_eq!(matches, vec!["priority"]);

        let (_, matches) = helper.candidates("label priority ");
        assert_eq!(matches, vec!["high", "medium", "low"]);

        let (_, matches) = helper.candidates("export j");
        assert_eq!(matches, vec!["json"]);
    }

    #[test]
    fn test_no_candidates_past_known_arguments() {
        let helper = CliHelper::new(LabelSchema::default());
        let (_, matches) = helper.candidates("skip now ");
        assert!(matches.is_empty());
    }
}
