pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Resolve a command's input from `--input`, then piped stdin. Returns `None`
/// when neither is present so the caller can fall back to flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading input file");
        return Ok(Some(file::read_json(path)?));
    }
    let piped = stdin::read_stdin()?;
    if piped.is_some() {
        debug!("reading input from stdin");
    }
    Ok(piped)
}
