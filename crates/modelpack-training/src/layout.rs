//! File naming conventions of the training pipeline.
//!
//! A trained model is written as `<dir>/<model>.kaier`. Vision classification
//! jobs also write one descriptor per output directory, `<dir>/config.kaml`.

/// Extension of trained model files.
pub const MODEL_EXTENSION: &str = "kaier";

/// Extension of the companion descriptor.
pub const DESCRIPTOR_EXTENSION: &str = "kaml";

/// Fixed file name of the descriptor next to the model file.
pub const DESCRIPTOR_FILE_NAME: &str = "config.kaml";

/// `<model_name>.kaier`
#[must_use]
pub fn model_file_name(model_name: &str) -> String {
    format!("{model_name}.{MODEL_EXTENSION}")
}

/// Rewrite backslashes to `/` and collapse repeated separators.
///
/// Manifests written on Windows hosts use `\` and sometimes doubled separators.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Last `/`-separated component of `path`.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last `/`, including the separator. Empty for bare names.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..=idx])
}

/// Archive entry name for the descriptor: the model file name with `.kaier` swapped for `.kaml`.
#[must_use]
pub fn descriptor_entry_name(model_file: &str) -> String {
    let suffix = format!(".{MODEL_EXTENSION}");
    let stem = model_file.strip_suffix(suffix.as_str()).unwrap_or(model_file);
    format!("{stem}.{DESCRIPTOR_EXTENSION}")
}
