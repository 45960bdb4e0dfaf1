use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON document from disk as a generic serde_json::Value.
///
/// Shape checks are left to the caller so that a malformed sales document
/// is reported against the field that is wrong.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
    Ok(value)
}

/// Resolve relative paths against the working directory and make sure the
/// target is an existing regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reported() {
        let err = read_json_value("definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = std::env::temp_dir();
        let err = read_json_value(dir.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }

    #[test]
    fn test_reads_sales_document() {
        let path = std::env::temp_dir().join("salesrep_read_json_value_test.json");
        fs::write(&path, r#"{"sellers": [], "products": [], "purchase_records": []}"#).unwrap();
        let value = read_json_value(path.to_str().unwrap()).unwrap();
        assert!(value["sellers"].is_array());
        let _ = fs::remove_file(&path);
    }
}
