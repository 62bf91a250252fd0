// crates/notekeep-cli/src/stdin.rs - Argument-or-stdin input
//
// Follows Unix conventions: read from stdin when the positional argument is
// omitted and input is piped.

use anyhow::Result;
use std::io::{self, IsTerminal, Read};

/// Read input from stdin or use provided argument
///
/// ```bash
/// notes new "Buy milk" -t errand
/// echo "Buy milk" | notes new -t errand
/// ```
pub fn read_input_or_stdin(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(value) => Ok(value.to_string()),
        None => {
            if io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "No input provided. Either provide an argument or pipe input.\n\nExamples:\n  notes new \"Buy milk\" -t errand\n  echo \"Buy milk\" | notes new -t errand"
                ));
            }

            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            parse_piped_input(&buffer)
        }
    }
}

fn parse_piped_input(buffer: &str) -> Result<String> {
    let input = buffer.trim();
    if input.is_empty() {
        return Err(anyhow::anyhow!("Empty input provided"));
    }
    Ok(input.to_string())
}
