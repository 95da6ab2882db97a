use std::path::Path;

use serde::{Deserialize, Serialize};

/// Signals derived from the currently active file and its context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSignals {
    /// Path to the currently active file.
    pub active_file: Option<String>,
    /// Files opened recently, most recent first.
    pub recent_files: Vec<String>,
    /// Extension of the active file, e.g. "rs".
    pub file_type: Option<String>,
    /// Pattern ids detected in the active file.
    pub detected_patterns: Vec<String>,
    /// Import/dependency paths extracted from the active file.
    pub imports: Vec<String>,
    /// Symbol names (functions, types) in the active file.
    pub symbols: Vec<String>,
    /// Directory containing the active file.
    pub directory: Option<String>,
}

impl FileSignals {
    /// Collect file signals, deriving directory and file type from the active path.
    pub fn gather(
        active_file: Option<&str>,
        recent_files: Vec<String>,
        detected_patterns: Vec<String>,
        imports: Vec<String>,
        symbols: Vec<String>,
    ) -> Self {
        let path = active_file.map(Path::new);
        let directory = path
            .and_then(Path::parent)
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|d| !d.is_empty());
        let file_type = path
            .and_then(Path::extension)
            .map(|e| e.to_string_lossy().to_lowercase());
        Self {
            active_file: active_file.map(String::from),
            recent_files,
            file_type,
            detected_patterns,
            imports,
            symbols,
            directory,
        }
    }
}
