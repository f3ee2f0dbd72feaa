use std::fmt::Display;

use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

/// Emit a per-file progress line.
///
/// Text mode keeps progress on stdout; JSON mode moves it to stderr so stdout
/// carries a single document.
pub fn progress(format: OutputFormat, line: impl Display) {
    match format {
        OutputFormat::Text => println!("{line}"),
        OutputFormat::Json => eprintln!("{line}"),
    }
}

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let document = json!({
                "command": result.command,
                "data": result.data,
            });
            let payload = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{payload}");
        }
        OutputFormat::Text => {
            for line in &result.summary {
                println!("{line}");
            }
        }
    }

    Ok(())
}
