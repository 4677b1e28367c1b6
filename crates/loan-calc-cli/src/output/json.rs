use std::io::{self, Write};

use serde_json::Value;

/// Write `value` as indented JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)
}

pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(stdout.lock(), value) {
        log::error!("failed to write JSON output: {e}");
    }
}
