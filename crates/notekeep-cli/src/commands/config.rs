use anyhow::Result;
use notekeep_core::ConfigManager;

use crate::context::Context;

/// Print the resolved database path and the effective configuration
pub fn handle(ctx: &Context) -> Result<()> {
    if ctx.json() {
        let value = serde_json::json!({
            "db": ctx.db_path().display().to_string(),
            "config": ctx.config(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("# database: {}", ctx.db_path().display());
    print!("{}", ConfigManager::to_toml(ctx.config())?);
    Ok(())
}
