use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

use buildmeta_core::core_api::{Choice, MetaError, MetaErrorCode, Prompter};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

enum LineSource {
    Editor(DefaultEditor),
    Piped(StdinLock<'static>),
}

/// Numbered-list prompts on stdout. Reads through rustyline on a terminal and
/// plain lines otherwise, so sessions can be scripted through a pipe.
pub struct TerminalPrompter {
    source: LineSource,
}

impl TerminalPrompter {
    pub fn from_stdin() -> Result<Self, MetaError> {
        let stdin = io::stdin();
        let source = if stdin.is_terminal() {
            let editor = DefaultEditor::new().map_err(|e| {
                MetaError::new(
                    MetaErrorCode::Io,
                    format!("failed to initialise line editor: {e}"),
                )
            })?;
            LineSource::Editor(editor)
        } else {
            LineSource::Piped(stdin.lock())
        };
        Ok(Self { source })
    }

    /// `None` on end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, MetaError> {
        match &mut self.source {
            LineSource::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(Some(line)),
                Err(ReadlineError::Eof) => Ok(None),
                Err(ReadlineError::Interrupted) => Err(MetaError::cancelled()),
                Err(e) => Err(io_error(e)),
            },
            LineSource::Piped(stdin) => {
                print!("{prompt}");
                io::stdout().flush().map_err(io_error)?;
                let mut line = String::new();
                if stdin.read_line(&mut line).map_err(io_error)? == 0 {
                    return Ok(None);
                }
                println!();
                Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
            }
        }
    }

    fn require_line(&mut self, prompt: &str) -> Result<String, MetaError> {
        self.read_line(prompt)?.ok_or_else(MetaError::cancelled)
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, MetaError> {
        print_choices(message, choices);
        loop {
            let line = self.require_line("> ")?;
            match parse_indexes(&line, choices.len()) {
                Ok(indexes) if indexes.len() == 1 => return Ok(indexes[0]),
                Ok(_) => self.warn("Enter exactly one number"),
                Err(e) => self.warn(&e),
            }
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[Choice],
    ) -> Result<Vec<usize>, MetaError> {
        print_choices(message, choices);
        println!("  (numbers separated by spaces or commas, empty for none)");
        loop {
            let line = self.require_line("> ")?;
            match parse_indexes(&line, choices.len()) {
                Ok(indexes) => return Ok(indexes),
                Err(e) => self.warn(&e),
            }
        }
    }

    fn edit_text(&mut self, message: &str, default: &str) -> Result<String, MetaError> {
        println!("? {message}");
        println!("{default}");
        println!("  (finish with an empty line; an empty first line keeps the text above)");

        let mut lines = Vec::new();
        while let Some(line) = self.read_line("")? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        if lines.is_empty() {
            return Ok(default.to_string());
        }
        Ok(lines.join("\n"))
    }

    fn warn(&mut self, message: &str) {
        eprintln!(">> {message}");
    }
}

fn print_choices(message: &str, choices: &[Choice]) {
    println!("? {message}");
    for (i, choice) in choices.iter().enumerate() {
        println!("  {:>3}) {}", i + 1, choice.label);
    }
}

/// Parses 1-based numbers into 0-based indexes.
fn parse_indexes(input: &str, len: usize) -> Result<Vec<usize>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
            _ => Err(format!("'{token}' is not a number between 1 and {len}")),
        })
        .collect()
}

fn io_error(e: impl std::fmt::Display) -> MetaError {
    MetaError::new(MetaErrorCode::Io, format!("terminal error: {e}"))
}
