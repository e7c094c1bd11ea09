//! Filename generation for drops and collections.

use crate::error::{Error, Result};

/// Sanitize a path component by replacing characters that are unsafe in filenames.
///
/// Path separators, the Windows-reserved set and control characters become `_`.
/// Returns an error if nothing usable is left (empty, whitespace-only, `.` or `..`).
pub fn sanitize_path_component(name: &str) -> Result<String> {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    if sanitized == "." || sanitized == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

/// Filename stem for a drop: the title with whitespace replaced by underscores.
///
/// Falls back to `drop_<id>` when the title yields no usable name.
pub fn drop_file_stem(title: &str, id: i64) -> String {
    let underscored: String = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    sanitize_path_component(&underscored).unwrap_or_else(|_| format!("drop_{}", id))
}

/// Folder name for a collection, falling back to `collection_<id>`.
pub fn collection_folder_name(title: &str, id: i64) -> String {
    sanitize_path_component(title.trim()).unwrap_or_else(|_| format!("collection_{}", id))
}
