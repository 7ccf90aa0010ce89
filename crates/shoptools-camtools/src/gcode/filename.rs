//! Output file naming
//!
//! File names and contents are first produced with placeholders because the
//! file count is only known once every tool file has been rendered.

use chrono::Local;

pub const FILE_INDEX: &str = "{FileIndex}";
pub const FILE_COUNT: &str = "{FileCount}";
pub const EXTENSION: &str = "{Extension}";

pub const DEFAULT_EXTENSION: &str = ".gcode";

/// `ShopTools-yyyyMMddHHmmss` for the current local time
pub fn default_base_name() -> String {
    Local::now().format("ShopTools-%Y%m%d%H%M%S").to_string()
}

/// Extension with a leading dot; blank selects [`DEFAULT_EXTENSION`]
pub fn normalize_extension(extension: Option<&str>) -> String {
    match extension.map(str::trim) {
        None | Some("") => DEFAULT_EXTENSION.to_string(),
        Some(ext) if ext.starts_with('.') => ext.to_string(),
        Some(ext) => format!(".{}", ext),
    }
}

/// Replace characters that are not valid in Windows file names
pub fn sanitize_file_component(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `{base}-{FileIndex}of{FileCount}-{tool}{Extension}`
pub fn filename_template(base: &str, tool_name: &str) -> String {
    format!(
        "{}-{}of{}-{}{}",
        base,
        FILE_INDEX,
        FILE_COUNT,
        sanitize_file_component(tool_name),
        EXTENSION
    )
}

/// Resolve the placeholders; `index` is 1-based
pub fn substitute(text: &str, index: usize, count: usize, extension: &str) -> String {
    text.replace(FILE_INDEX, &format!("{:02}", index))
        .replace(FILE_COUNT, &format!("{:02}", count))
        .replace(EXTENSION, extension)
}
