use anyhow::{Result, bail};

/// The browser viewer is not part of this tool; fail loudly instead of
/// pretending to serve.
pub fn handle(port: u16) -> Result<()> {
    bail!("The web viewer is not available in this build (requested port {port})")
}
