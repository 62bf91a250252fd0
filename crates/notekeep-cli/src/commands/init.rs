// crates/notekeep-cli/src/commands/init.rs - Database Initialization Command
//
// Every other command expects the database to exist already; a missing file
// is an error for them, never an implicit empty database.

use anyhow::{Context as AnyhowContext, Result};

use crate::context::Context;

/// Create the database with an empty note list if it is missing
///
/// Safe to run repeatedly: an existing database is left untouched.
pub fn handle(ctx: &Context) -> Result<()> {
    let created = ctx
        .notes
        .store()
        .init()
        .with_context(|| format!("Failed to initialize {}", ctx.db_path().display()))?;

    if created {
        println!("✅ Initialized note database at: {}", ctx.db_path().display());
        println!();
        println!("💡 Next steps:");
        println!("   notes new \"My first note\" --tags idea");
        println!("   notes all");
    } else {
        println!("Note database already exists at: {}", ctx.db_path().display());
    }

    Ok(())
}
