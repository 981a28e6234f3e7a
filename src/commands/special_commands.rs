//! Special commands parser for the interactive chat screen
//!
//! Lines starting with `/` manage documents and the mock session instead
//! of being sent to the assistant as questions. Command names are
//! case-insensitive; arguments (paths, file names, credentials) are kept
//! exactly as typed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the document table
    ListFiles,

    /// Reload the document list from the backend
    Refresh,

    /// Upload local files in one request
    Upload(Vec<PathBuf>),

    /// Remove a document by file name
    Remove(String),

    /// Sign in with the mock authenticator
    Login { email: String, password: String },

    /// Sign out of the mock session
    Logout,

    /// Show the signed-in user
    WhoAmI,

    /// Display session, document and request status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be submitted as a question.
    None,
}

fn missing(command: &str, usage: &str) -> CommandError {
    CommandError::MissingArgument {
        command: command.to_string(),
        usage: usage.to_string(),
    }
}

fn no_arguments(
    command: &str,
    rest: &str,
    parsed: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: rest.to_string(),
        })
    }
}

/// Split `/upload` arguments on whitespace, keeping quoted paths whole
fn split_paths(rest: &str) -> Result<Vec<PathBuf>, CommandError> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in rest.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CommandError::UnsupportedArgument {
            command: "/upload".to_string(),
            arg: format!("unterminated quote in {}", rest),
        });
    }
    if in_token {
        paths.push(PathBuf::from(current));
    }
    Ok(paths)
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use gander::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/remove Flight Manual.pdf").unwrap();
/// assert_eq!(cmd, SpecialCommand::Remove("Flight Manual.pdf".to_string()));
///
/// let cmd = parse_special_command("what is the range?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // Only "exit"/"quit" are recognized without a leading slash
    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/files" | "/ls" => no_arguments("/files", rest, SpecialCommand::ListFiles),
        "/refresh" => no_arguments("/refresh", rest, SpecialCommand::Refresh),

        "/upload" => {
            if rest.is_empty() {
                return Err(missing("/upload", "/upload <path> [<path>...]"));
            }
            let paths = split_paths(rest)?;
            if paths.is_empty() {
                return Err(missing("/upload", "/upload <path> [<path>...]"));
            }
            Ok(SpecialCommand::Upload(paths))
        }

        "/remove" | "/rm" => {
            if rest.is_empty() {
                return Err(missing("/remove", "/remove <file name>"));
            }
            Ok(SpecialCommand::Remove(rest.to_string()))
        }

        "/login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(email), Some(password), None) => Ok(SpecialCommand::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
                (Some(_), Some(_), Some(extra)) => Err(CommandError::UnsupportedArgument {
                    command: "/login".to_string(),
                    arg: extra.to_string(),
                }),
                _ => Err(missing("/login", "/login <email> <password>")),
            }
        }
        "/logout" => no_arguments("/logout", rest, SpecialCommand::Logout),
        "/whoami" => no_arguments("/whoami", rest, SpecialCommand::WhoAmI),

        "/status" => no_arguments("/status", rest, SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the interactive chat screen
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

DOCUMENTS:
  /files            - Show the active documents
  /refresh          - Reload the document list from the backend
  /upload <path>... - Upload one or more files in a single request
                      (quote paths that contain spaces)
  /remove <name>    - Remove a document by its file name

SESSION:
  /login <email> <password> - Sign in (mock: any non-empty pair works)
  /logout           - Sign out
  /whoami           - Show the signed-in user
  /status           - Show backend, session and request status

OTHER:
  /help             - Show this help message
  exit, quit        - Exit interactive chat

Anything else you type is sent to the assistant as a question.
Only the latest question and its answer are kept.
"#
    );
}
