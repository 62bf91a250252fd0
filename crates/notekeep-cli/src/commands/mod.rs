// crates/notekeep-cli/src/commands/mod.rs - Command Handler Modules
//
// MODULE ORGANIZATION:
// - init: database initialization
// - note: note mutations (new, remove, clean)
// - list: listing every note
// - search: content substring search
// - web: the browser viewer entry point
// - config: effective configuration display
// - completions: shell completion scripts
//
// Rendering helpers shared by the handlers live here.

pub mod config;
#[cfg(feature = "completions")]
pub mod completions;
pub mod init;
pub mod list;
pub mod note;
pub mod search;
pub mod web;

use anyhow::Result;
use chrono::{DateTime, Local};
use console::style;
use notekeep_core::{Note, NoteId};

/// Ids at or above this are read as millisecond timestamps (2001-09-09)
const TIMESTAMP_ID_FLOOR: NoteId = 1_000_000_000_000;

/// Print a list of notes as JSON or human-readable blocks
pub fn print_notes(notes: &[Note], json: bool, empty_message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("{}", style(empty_message).dim());
        return Ok(());
    }

    for note in notes {
        println!("{}", render_note(note));
    }
    Ok(())
}

/// Human-readable block for one note
///
/// ```text
/// #1700000000000  2023-11-14 22:13  [errand, shop]
///     Buy milk
/// ```
pub fn render_note(note: &Note) -> String {
    let mut header = format!("{}", style(format!("#{}", note.id)).cyan().bold());

    if let Some(created) = created_at(note.id) {
        header.push_str("  ");
        header.push_str(&style(created.format("%Y-%m-%d %H:%M").to_string()).dim().to_string());
    }

    if !note.tags.is_empty() {
        header.push_str("  ");
        header.push_str(&style(format!("[{}]", note.tags.join(", "))).yellow().to_string());
    }

    let body: Vec<String> = note
        .content
        .lines()
        .map(|line| format!("    {}", line))
        .collect();

    format!("{}\n{}", header, body.join("\n"))
}

/// Creation time encoded in a timestamp id, if the id looks like one
fn created_at(id: NoteId) -> Option<DateTime<Local>> {
    if id < TIMESTAMP_ID_FLOOR {
        return None;
    }
    let millis = i64::try_from(id).ok()?;
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&Local))
}
