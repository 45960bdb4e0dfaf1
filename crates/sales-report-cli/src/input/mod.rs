pub mod file;
pub mod stdin;

use serde_json::Value;

/// JSON from `--input <file>` when given, else from piped stdin.
/// Returns None when neither source provides a document.
pub fn load_json(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_json_value(path)?)),
        None => stdin::read_stdin(),
    }
}
