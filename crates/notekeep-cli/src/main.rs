// crates/notekeep-cli/src/main.rs - CLI Application Entry Point
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │ (main function)  │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │    NoteService      │
//                        │ (config + store) │    │   (notekeep-core)   │
//                        └──────────────────┘    └─────────────────────┘
//
// Each invocation performs one operation and exits: 0 on success, non-zero
// with the error on stderr otherwise. Usage errors (missing --tags, a
// non-numeric id) are reported by clap.
//
// EXAMPLE USAGE:
// ```bash
// notes init
// notes new "Buy milk" --tags errand,shop
// notes find milk --json | jq '.[].id'
// notes remove 1700000000000
// ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod logging;
mod stdin;

use cli::{Cli, Commands};
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Commands that never touch the database
    match &cli.command {
        Commands::Web { port } => return commands::web::handle(*port),
        #[cfg(feature = "completions")]
        Commands::Completions { shell } => return commands::completions::handle(*shell),
        _ => {}
    }

    let ctx = Context::new(cli.db.as_deref(), cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Init => commands::init::handle(&ctx),
        Commands::New { note, tags } => commands::note::create(&ctx, note.as_deref(), &tags),
        Commands::All => commands::list::handle(&ctx),
        Commands::Find { filter } => commands::search::handle(&ctx, &filter),
        Commands::Remove { id } => commands::note::remove(&ctx, id),
        Commands::Clean => commands::note::clean(&ctx),
        Commands::Config => commands::config::handle(&ctx),
        Commands::Web { .. } => unreachable!(), // Already handled above
        #[cfg(feature = "completions")]
        Commands::Completions { .. } => unreachable!(), // Already handled above
    }
}
