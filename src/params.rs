use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Keeps every non-blank line that does not start with `#`, trimmed, in order.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a parameter file. A file that cannot be read yields an empty list
/// rather than aborting the run.
pub fn load_list(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let values = parse_list(&content);
            info!(action = "loaded", component = "parameter_file", file_path = ?path, value_count = values.len(), "Loaded parameter file");
            values
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(action = "load", component = "parameter_file", file_path = ?path, "Parameter file not found");
            Vec::new()
        }
        Err(e) => {
            warn!(action = "load", component = "parameter_file", file_path = ?path, error = %e, "Failed to read parameter file");
            Vec::new()
        }
    }
}

pub fn load_first(path: &Path) -> Option<String> {
    load_list(path).into_iter().next()
}
