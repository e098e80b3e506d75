//! File/stdin/stdout plumbing shared by the subcommands.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read a whole input, from a file when a path is given or from stdin
/// otherwise.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let Some(path) = path else {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading from stdin")?;
        return Ok(buf);
    };
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Write to a file when a path is given, stdout otherwise.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    let Some(path) = path else {
        return io::stdout().write_all(data).context("writing to stdout");
    };
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}
