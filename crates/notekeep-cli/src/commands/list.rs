use anyhow::Result;

use crate::context::Context;

/// List every note in insertion order
pub fn handle(ctx: &Context) -> Result<()> {
    let notes = ctx.notes.all_notes()?;
    super::print_notes(&notes, ctx.json(), "No notes yet.")
}
