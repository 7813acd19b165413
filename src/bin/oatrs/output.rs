use std::fmt::Display;

use serde::Serialize;

use crate::app::GlobalOptions;

/// Writes a command result to stdout: pretty JSON with `--json`, the
/// `Display` rendering otherwise.
pub fn print_output<T>(data: &T, opts: &GlobalOptions) -> anyhow::Result<()>
where
    T: Serialize + Display,
{
    if opts.json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        print!("{data}");
    }
    Ok(())
}
