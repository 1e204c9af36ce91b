//! REPL command parsing.

use labeldesk_core::ExportFormat;

/// Command names offered for completion.
pub const COMMAND_NAMES: &[&str] = &[
    "show", "label", "reset", "submit", "skip", "goto", "stats", "log", "export", "report",
    "clear", "help", "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Label { dimension: String, value: String },
    Reset,
    Submit,
    Skip,
    /// 1-based item id.
    Goto(usize),
    Stats,
    Log,
    Export(ExportFormat),
    Report,
    Clear,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = parts.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "show" => Command::Show,
            "label" | "l" => match args.as_slice() {
                [dimension, value] => Command::Label {
                    dimension: dimension.to_string(),
                    value: value.to_string(),
                },
                [pair] if pair.contains('=') => {
                    let (dimension, value) = pair.split_once('=').unwrap_or_default();
                    Command::Label {
                        dimension: dimension.to_string(),
                        value: value.to_string(),
                    }
                }
                _ => return Err("usage: label <dimension> <value>".to_string()),
            },
            "reset" => Command::Reset,
            "submit" | "s" => Command::Submit,
            "skip" | "n" => Command::Skip,
            "goto" => match args.as_slice() {
                [id] => match id.parse::<usize>() {
                    Ok(id) if id > 0 => Command::Goto(id),
                    _ => return Err(format!("invalid item id '{}'", id)),
                },
                _ => return Err("usage: goto <item id>".to_string()),
            },
            "stats" => Command::Stats,
            "log" => Command::Log,
            "export" => match args.as_slice() {
                [format] => Command::Export(format.parse()?),
                _ => return Err("usage: export <csv|json>".to_string()),
            },
            "report" => Command::Report,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}' (type 'help')", other)),
        };

        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  show                      Show the current item and draft
  label <dimension> <value> Select a label (alias: l, or l dimension=value)
  reset                     Clear the draft labels
  submit                    Submit the current item (alias: s)
  skip                      Skip the current item (alias: n)
  goto <id>                 Jump to an item by id
  stats                     Show session statistics
  log                       Show recent activity
  export <csv|json>         Export annotations to a file
  report                    Show the QA report
  clear                     Clear all session data
  quit                      Exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_forms() {
        let expected = Command::Label {
            dimension: "sentiment".into(),
            value: "positive".into(),
        };
        assert_eq!(Command::parse("label sentiment positive"), Ok(expected.clone()));
        assert_eq!(Command::parse("l sentiment=positive"), Ok(expected));
        assert!(Command::parse("label sentiment").is_err());
    }

    #[test]
    fn test_parse_goto_rejects_zero_and_garbage() {
        assert_eq!(Command::parse("goto 3"), Ok(Command::Goto(3)));
        assert!(Command::parse("goto 0").is_err());
        assert!(Command::parse("goto three").is_err());
    }

    #[test]
    fn test_parse_export_formats() {
        assert_eq!(
            Command::parse("export csv"),
            Ok(Command::Export(ExportFormat::Tabular))
        );
        assert_eq!(
            Command::parse("EXPORT json"),
            Ok(Command::Export(ExportFormat::Structured))
        );
        assert!(Command::parse("export pdf").is_err());
    }

    #[test]
    fn test_parse_aliases_and_unknown() {
        assert_eq!(Command::parse("s"), Ok(Command::Submit));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert!(Command::parse("dance").unwrap_err().contains("unknown command"));
        assert!(Command::parse("   ").is_err());
    }
}
