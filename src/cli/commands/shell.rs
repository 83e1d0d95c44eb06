//! Interactive shell.
//!
//! Reads one command per line and runs it against the same [`App`], so
//! session-only stores (contacts, tasks, notifications) keep their changes
//! until the shell exits. Storage flags on a line (`--db`, `--ephemeral`)
//! are ignored; the store was chosen when the shell started.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::Ordering;

use clap::Parser;
use tracing::debug;

use crate::app::App;
use crate::cli::{Cli, Commands};
use crate::error::Result;

const PROMPT: &str = "crm> ";

/// Run the read-eval loop until `exit`, `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if stdin or stdout fails. Command errors are
/// reported and the loop continues.
pub fn execute(app: &mut App, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let outer_silent = crate::is_silent();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("{PROMPT}");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let args = match split_args(&line) {
            Ok(args) => args,
            Err(message) => {
                eprintln!("Error: {message}");
                continue;
            }
        };
        match args.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }

        let cli = match Cli::try_parse_from(std::iter::once("crm".to_string()).chain(args)) {
            Ok(cli) => cli,
            Err(e) => {
                if let Err(err) = e.print() {
                    debug!(error = %err, "Failed to print parse error");
                }
                continue;
            }
        };
        if matches!(cli.command, Commands::Shell) {
            eprintln!("Error: already in a shell");
            continue;
        }

        let line_json = json || cli.json;
        crate::SILENT.store(outer_silent || cli.silent, Ordering::Relaxed);
        debug!(command = ?cli.command, "Shell command");
        if let Err(e) = super::dispatch(app, &cli.command, line_json) {
            super::report_error(&e, line_json);
        }
    }

    crate::SILENT.store(outer_silent, Ordering::Relaxed);
    Ok(())
}

/// Split a line into words, honouring single and double quotes and
/// backslash escapes outside single quotes.
fn split_args(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"') | None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(_), _) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_args("  task list --status pending ").unwrap(),
            vec!["task", "list", "--status", "pending"]
        );
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_quotes_and_escapes() {
        assert_eq!(
            split_args(r#"contact add "Mary Ann" O\'Neil --company 'Acme Pte'"#).unwrap(),
            vec!["contact", "add", "Mary Ann", "O'Neil", "--company", "Acme Pte"]
        );
        assert_eq!(split_args(r#"note "" x"#).unwrap(), vec!["note", "", "x"]);
        assert_eq!(split_args(r#"'a\b'"#).unwrap(), vec![r"a\b"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(split_args("task add \"open").is_err());
    }
}
