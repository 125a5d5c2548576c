//! Shared text and path helpers.

/// Drop a missing or empty path, keeping any other value byte for byte.
///
/// Paths are never trimmed: leading or trailing spaces are legal in file
/// names and name a different file.
pub fn nonempty_path(value: Option<String>) -> Option<String> {
    value.filter(|path| !path.is_empty())
}

/// Extract the final path component for display.
///
/// Both `/` and `\` are treated as separators regardless of platform, since
/// paths handed back by the host may come from either convention.
///
/// # Returns
/// The file name, or `None` when the path is empty or ends in a separator.
pub fn display_file_name(path: &str) -> Option<&str> {
    let name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Length of `text` in Unicode scalar values.
///
/// Used for volume-triggered snapshots so multi-byte characters count once.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Returns whether `text` holds nothing worth recovering.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{char_len, display_file_name, is_blank, nonempty_path};

    #[test]
    fn nonempty_path_keeps_surrounding_spaces() {
        assert_eq!(
            nonempty_path(Some(" notes.txt ".to_string())),
            Some(" notes.txt ".to_string())
        );
        assert_eq!(nonempty_path(Some(String::new())), None);
        assert_eq!(nonempty_path(None), None);
    }

    #[test]
    fn display_file_name_handles_both_separators() {
        assert_eq!(display_file_name("/tmp/a.txt"), Some("a.txt"));
        assert_eq!(display_file_name("C:\\Users\\me\\notes.md"), Some("notes.md"));
        assert_eq!(display_file_name("mixed/dir\\file.txt"), Some("file.txt"));
        assert_eq!(display_file_name("plain.txt"), Some("plain.txt"));
        assert_eq!(display_file_name("/tmp/dir/"), None);
        assert_eq!(display_file_name(""), None);
    }

    #[test]
    fn char_len_counts_code_points() {
        assert_eq!(char_len("hello"), 5);
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len("🦀🦀"), 2);
    }

    #[test]
    fn is_blank_ignores_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" x "));
    }
}
