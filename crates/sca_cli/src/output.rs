//! Structured output shared by listing commands.

use serde::Serialize;

use crate::OutputFormat;
use crate::ui::print_command_header;

/// Prints `value` as pretty JSON when `format` is JSON. Returns `true` when
/// it did so; otherwise prints the command header and returns `false`.
pub fn emit_json<T: Serialize + ?Sized>(format: OutputFormat, command: &str, value: &T) -> anyhow::Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(true)
        }
        OutputFormat::Text => {
            print_command_header(command);
            Ok(false)
        }
    }
}
