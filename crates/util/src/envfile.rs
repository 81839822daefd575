//! `.env` file loader: parses `KEY=VALUE` lines and exports them into the
//! process environment.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Loads the file at `path` and sets one environment variable per
/// `KEY=VALUE` line.
///
/// Blank lines, `#` comments (inline included), and lines without `=` are
/// skipped; keys and values are trimmed of surrounding whitespace. Later
/// assignments to the same key override earlier ones.
pub fn load(path: impl AsRef<Path>) -> io::Result<()> {
    let contents = fs::read_to_string(path)?;
    for (key, value) in parse(&contents) {
        std::env::set_var(key, value);
    }
    Ok(())
}

/// Loads `.env` from the current directory.
pub fn load_default() -> io::Result<()> {
    load(".env")
}

fn parse(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in contents.lines() {
        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        vars.insert(key.trim().to_string(), value.trim().to_string());
    }
    vars
}
