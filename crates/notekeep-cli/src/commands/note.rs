// crates/notekeep-cli/src/commands/note.rs - Note Mutation Commands
//
// new, remove and clean. Each maps onto exactly one service operation and
// reports the outcome; errors propagate to main.

use anyhow::Result;
use notekeep_core::NoteId;

use crate::context::Context;

/// Create a note from an argument or piped stdin
pub fn create(ctx: &Context, note: Option<&str>, tags: &str) -> Result<()> {
    let content = crate::stdin::read_input_or_stdin(note)?;
    let created = ctx.notes.create_note(&content, split_tags(tags))?;

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!("✅ Note created successfully");
        println!("{}", super::render_note(&created));
    }
    Ok(())
}

/// Remove one note; an unknown id is reported, not treated as a failure
pub fn remove(ctx: &Context, id: NoteId) -> Result<()> {
    let removed = ctx.notes.remove_note(id)?;

    if ctx.json() {
        let value = serde_json::json!({ "id": id, "removed": removed.is_some() });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match removed {
        Some(id) => println!("✅ Removed note with id: {}", id),
        None => println!("No note found with id: {}", id),
    }
    Ok(())
}

/// Drop every note
pub fn clean(ctx: &Context) -> Result<()> {
    ctx.notes.remove_all_notes()?;

    if ctx.json() {
        println!("{}", serde_json::json!({ "removed": "all" }));
    } else {
        println!("🧹 Removed all notes");
    }
    Ok(())
}

/// Split the comma-separated `--tags` value, dropping blank entries
fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}
