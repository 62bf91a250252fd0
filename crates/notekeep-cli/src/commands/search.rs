// crates/notekeep-cli/src/commands/search.rs - Note Search Command
//
// Case-insensitive substring search over note content. Tags are not searched.

use anyhow::Result;

use crate::context::Context;

pub fn handle(ctx: &Context, filter: &str) -> Result<()> {
    let notes = ctx.notes.find_notes(filter)?;
    super::print_notes(&notes, ctx.json(), &format!("No notes match '{}'.", filter))
}
