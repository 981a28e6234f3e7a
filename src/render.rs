//! Text rendering for the chat screen
//!
//! Produces the sidebar, the question/answer pane and the status block as
//! strings so the interactive loop can print them and tests can inspect them.

use crate::auth::AuthState;
use crate::chat::{ChatState, Message, Sender};
use crate::documents::DocumentCollection;
use crate::view::{FileState, ViewState};

use chrono::Local;
use colored::Colorize;
use prettytable::{cell, row, Table};

/// Screen title
pub const TITLE: &str = "Gander Documentation Assistant";

/// Join lines into a block with a trailing newline
fn to_block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_time(message: &Message) -> String {
    message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// Render the document sidebar
pub fn render_sidebar(files: &FileState) -> String {
    let header = "DOCUMENTS".bold();
    let mut lines = vec![if files.is_loading() {
        format!("{} {}", header, "(processing...)".cyan())
    } else {
        header.to_string()
    }];

    let collection = files.files();
    if collection.is_empty() && !files.is_loading() {
        lines.push("  No documents uploaded yet".to_string());
        lines.push(format!(
            "  {}",
            "Use /upload <path> to add your first document".blue()
        ));
    } else {
        lines.extend(
            collection
                .files()
                .iter()
                .enumerate()
                .map(|(index, file)| format!("  {:>2}. {}", index + 1, file.name)),
        );
    }
    to_block(lines)
}

/// Render the current question/answer pair
pub fn render_chat(chat: &ChatState) -> String {
    let mut lines = Vec::new();

    if chat.current_question().is_none() && chat.current_answer().is_none() {
        lines.push(format!("Welcome to {}", TITLE).bold().to_string());
        lines.push(
            "Upload your documentation and ask questions about maintenance, operations, or anything else it covers."
                .to_string(),
        );
    }

    for message in [chat.current_question(), chat.current_answer()]
        .into_iter()
        .flatten()
    {
        let author = match message.sender {
            Sender::User => "You".blue().bold(),
            Sender::Assistant => "Assistant".green().bold(),
        };
        lines.push(format!(
            "{} {} {}",
            author,
            format_time(message).dimmed(),
            message.content
        ));
    }

    if chat.is_loading() {
        lines.push("Assistant is thinking...".dimmed().to_string());
    }
    to_block(lines)
}

/// Render the whole screen: sidebar then chat pane
pub fn render_screen(view: &ViewState) -> String {
    format!(
        "{}\n{}",
        render_sidebar(&view.files),
        render_chat(&view.chat)
    )
}

/// Build a table of documents for `/files` and `gander files list`
pub fn files_table(collection: &DocumentCollection) -> Table {
    let mut table = Table::new();
    table.add_row(row![b->"ID", b->"Name", b->"Type"]);
    for file in collection.files() {
        table.add_row(row![
            file.id,
            file.name,
            file.file_type.as_deref().unwrap_or("-")
        ]);
    }
    table
}

/// Render session and request status for `/status`
pub fn render_status(view: &ViewState, auth: &AuthState, base_url: &str) -> String {
    let user = match auth.current_user() {
        Some(user) => format!("{} <{}> ({})", user.name, user.email, user.role),
        None => "not signed in".to_string(),
    };
    let busy = if view.files.is_loading() { "busy" } else { "idle" };

    to_block(vec![
        "Session Status".bold().to_string(),
        format!("  Backend:   {}", base_url),
        format!("  User:      {}", user),
        format!("  Documents: {}", view.files.files().len()),
        format!("  Files:     {}", busy),
        format!("  Chat:      {}", view.chat.phase()),
    ])
}
