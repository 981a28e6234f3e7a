/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`: interactive chat screen
- `ask`: ask a single question
- `files`: list, upload and remove documents

Each handler is a thin layer over the library components:
the api client, the view controller and the renderer.
*/

use crate::api::ApiClient;
use crate::auth::{AuthState, MockAuthenticator};
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::documents::DocumentCollection;
use crate::error::Result;
use crate::render;
use crate::view::Assistant;

use colored::Colorize;
use std::sync::Arc;

// Special commands parser for the chat screen
pub mod special_commands;

/// Build the controller for the configured backend
fn build_assistant(config: &Config) -> Result<(Assistant, String)> {
    let client = ApiClient::new(&config.api)?;
    let base_url = client.base_url().to_string();
    Ok((Assistant::new(Arc::new(client)), base_url))
}

/// Print a document collection as a table or JSON
fn output_collection(collection: &DocumentCollection, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(collection)?);
    } else if collection.is_empty() {
        println!("No documents uploaded yet");
    } else {
        render::files_table(collection).printstd();
    }
    Ok(())
}

// Chat command handler
pub mod chat {
    //! Interactive chat screen.
    //!
    //! Loads the document list, then runs a readline loop where slash
    //! commands manage documents and the mock session and anything else
    //! is asked as a question.

    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start the interactive chat screen
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Examples
    ///
    /// ```
    /// use gander::commands::chat;
    /// use gander::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat");

        let (assistant, base_url) = build_assistant(&config)?;
        let authenticator = MockAuthenticator::from_config(&config.auth);
        let mut auth = AuthState::new();

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&base_url);

        // The document list is loaded once when the screen opens
        if let Err(e) = assistant.refresh_files().await {
            eprintln!("{}", format!("Could not load documents: {}", e).yellow());
        }
        println!("{}", render::render_screen(&assistant.snapshot()));

        loop {
            match rl.readline(&format_prompt(&auth)) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::ListFiles => {
                            let view = assistant.snapshot();
                            if view.files.files().is_empty() {
                                print!("{}", render::render_sidebar(&view.files));
                            } else {
                                render::files_table(view.files.files()).printstd();
                            }
                        }
                        SpecialCommand::Refresh => {
                            report_file_op(&assistant, assistant.refresh_files().await);
                        }
                        SpecialCommand::Upload(paths) => {
                            println!("{}", format!("Uploading {} file(s)...", paths.len()).cyan());
                            report_file_op(&assistant, assistant.upload_paths(&paths).await);
                        }
                        SpecialCommand::Remove(name) => {
                            report_file_op(&assistant, assistant.remove(&name).await);
                        }
                        SpecialCommand::Login { email, password } => {
                            println!("{}", "Signing in...".cyan());
                            match authenticator.login(&email, &password).await {
                                Ok(session) => {
                                    println!(
                                        "{}",
                                        format!("Signed in as {}", session.user().email).green()
                                    );
                                    auth.sign_in(session);
                                }
                                Err(e) => eprintln!("{}", format!("Login failed: {}", e).red()),
                            }
                        }
                        SpecialCommand::Logout => match auth.sign_out() {
                            Some(session) => {
                                authenticator.logout(session).await;
                                println!("{}", "Signed out".green());
                            }
                            None => println!("Not signed in"),
                        },
                        SpecialCommand::WhoAmI => match auth.current_user() {
                            Some(user) => {
                                println!("{} <{}> ({})", user.name, user.email, user.role)
                            }
                            None => println!("Not signed in"),
                        },
                        SpecialCommand::ShowStatus => {
                            print!(
                                "{}",
                                render::render_status(&assistant.snapshot(), &auth, &base_url)
                            );
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            println!("{}", "Assistant is thinking...".dimmed());
                            assistant.ask(&line).await;
                            println!("\n{}", render::render_chat(&assistant.snapshot().chat));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print the sidebar after a file operation, or the failure
    fn report_file_op(assistant: &Assistant, outcome: Result<DocumentCollection>) {
        match outcome {
            Ok(_) => print!("{}", render::render_sidebar(&assistant.snapshot().files)),
            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
        }
    }

    fn format_prompt(auth: &AuthState) -> String {
        match auth.current_user() {
            Some(user) => format!("[{}] >> ", user.email.cyan()),
            None => ">> ".to_string(),
        }
    }

    /// Display welcome banner at the start of the chat screen
    fn print_welcome_banner(base_url: &str) {
        println!("\n{}", "═".repeat(64));
        println!("  {}", render::TITLE.bold());
        println!("{}\n", "═".repeat(64));
        println!("Backend: {}", base_url.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

}

// One-shot question handler
pub mod ask {
    //! Ask a single question and print the answer.

    use super::*;
    use crate::error::GanderError;

    /// Ask `question` and print the answer (or the fallback on failure)
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be built or the question is blank
    pub async fn run_ask(config: Config, question: String) -> Result<()> {
        let (assistant, _) = build_assistant(&config)?;

        match assistant.ask(&question).await {
            Some(answer) => {
                println!("{}", answer.content);
                Ok(())
            }
            None => Err(GanderError::InvalidInput("Question cannot be empty".to_string()).into()),
        }
    }
}

// Document management handler
pub mod files {
    //! List, upload and remove documents without entering the chat screen.

    use super::*;
    use crate::cli::FileCommand;

    /// Run a `gander files` subcommand
    ///
    /// Unlike the chat screen, failures here are returned so the process
    /// exits non-zero.
    pub async fn run_files(config: Config, command: FileCommand) -> Result<()> {
        let (assistant, _) = build_assistant(&config)?;

        let (collection, json) = match command {
            FileCommand::List { json } => (assistant.refresh_files().await?, json),
            FileCommand::Upload { paths, json } => {
                tracing::info!("Uploading {} file(s)", paths.len());
                (assistant.upload_paths(&paths).await?, json)
            }
            FileCommand::Remove { name, json } => (assistant.remove(&name).await?, json),
        };

        output_collection(&collection, json)
    }
}
