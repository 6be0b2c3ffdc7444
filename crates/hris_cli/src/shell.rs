//! Line-oriented shell over [`App`].

use crate::error::{CliError, ParseError};
use crate::render;
use hris_core::{App, Backend};
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  open <path>          go to /login, /register, /employees or /register-employee
  set <field> <value>  fill a form field (quote values with spaces or not)
  submit               submit the current form
  search [term]        filter the employee list; no term clears the filter
  retry                reload the employee list
  signout              end the session
  show                 redraw the current page
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Set { field: String, value: String },
    Submit,
    Search(String),
    Retry,
    SignOut,
    Show,
    Help,
    Quit,
}

/// Splits a line into words. Single and double quotes group words; inside
/// double quotes a backslash escapes the next character.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(ParseError::UnterminatedQuote),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            ch if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens = tokenize(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "open" => match args {
            [path] => Command::Open(path.clone()),
            _ => return Err(ParseError::Usage("open <path>")),
        },
        "set" => match args {
            [field, value @ ..] if !value.is_empty() => Command::Set {
                field: field.clone(),
                value: value.join(" "),
            },
            _ => return Err(ParseError::Usage("set <field> <value>")),
        },
        "submit" => Command::Submit,
        "search" => Command::Search(args.join(" ")),
        "retry" => Command::Retry,
        "signout" | "sign-out" | "logout" => Command::SignOut,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Reads commands until `quit` or end of input.
///
/// Command failures are printed and the loop continues; only I/O errors end
/// the shell early.
pub fn run<B, R, W>(app: &mut App<B>, input: R, mut output: W, interactive: bool) -> Result<(), CliError>
where
    B: Backend,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", render::page(app))?;
    if interactive {
        write!(output, "hris> ")?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                let text = execute(app, command);
                writeln!(output, "{text}")?;
            }
            Err(err) => writeln!(output, "error: {err}")?,
        }
        if interactive {
            write!(output, "hris> ")?;
            output.flush()?;
        }
    }
    output.flush()?;
    Ok(())
}

fn execute<B: Backend>(app: &mut App<B>, command: Command) -> String {
    let outcome = match command {
        Command::Open(path) => app.open_path(&path).map(|_| ()),
        Command::Set { field, value } => {
            return match app.set_field(&field, &value) {
                Ok(()) => format!("{field} set"),
                Err(err) => format!("error: {err}"),
            };
        }
        Command::Submit => app.submit().map(|_| ()),
        Command::Search(term) => app.search(&term),
        Command::Retry => app.retry(),
        Command::SignOut => {
            app.sign_out();
            Ok(())
        }
        Command::Show => Ok(()),
        Command::Help => return HELP.to_string(),
        Command::Quit => return String::new(),
    };

    match outcome {
        Ok(()) => render::page(app),
        Err(err) => format!("error: {err}\n{}", render::page(app)),
    }
}
