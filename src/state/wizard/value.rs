//! Wizard field value objects

use std::path::PathBuf;

/// A file chosen for upload but not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub size: u64,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// File name component of the path
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    /// Lowercased extension, without the dot
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// Upload lifecycle of a document field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FileValue {
    /// No file chosen
    #[default]
    None,
    /// Chosen locally, not yet uploaded
    Pending(FileHandle),
    /// Stored at the given backend path
    Uploaded(String),
}

impl FileValue {
    pub fn is_none(&self) -> bool {
        matches!(self, FileValue::None)
    }

    pub fn as_pending(&self) -> Option<&FileHandle> {
        match self {
            FileValue::Pending(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    File(FileValue),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    pub fn flag(on: bool) -> Self {
        FieldValue::Flag(on)
    }

    pub fn pending_file(handle: FileHandle) -> Self {
        FieldValue::File(FileValue::Pending(handle))
    }

    /// Get the text value (returns empty string for other kinds)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the flag value (returns false for other kinds)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(on) => *on,
            _ => false,
        }
    }

    /// Get the file value, if this is a file field
    pub fn as_file(&self) -> Option<&FileValue> {
        match self {
            FieldValue::File(f) => Some(f),
            _ => None,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = self {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = self {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match self {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Flag(on) => *on = false,
            FieldValue::File(f) => *f = FileValue::None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(on) => if *on { "Yes" } else { "No" }.to_string(),
            FieldValue::File(FileValue::None) => "(no file)".to_string(),
            FieldValue::File(FileValue::Pending(handle)) => {
                let mb = handle.size as f64 / (1024.0 * 1024.0);
                format!("{} ({:.1} MB)", handle.file_name(), mb)
            }
            FieldValue::File(FileValue::Uploaded(path)) => format!("uploaded: {path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod file_handle {
        use super::*;

        #[test]
        fn test_file_name_from_path() {
            let handle = FileHandle::new("/tmp/docs/site-plan.pdf", 1024);
            assert_eq!(handle.file_name(), "site-plan.pdf");
        }

        #[test]
        fn test_extension_is_lowercased() {
            let handle = FileHandle::new("/tmp/SCAN.PDF", 1024);
            assert_eq!(handle.extension(), Some("pdf".to_string()));
        }

        #[test]
        fn test_extension_missing() {
            let handle = FileHandle::new("/tmp/noext", 1024);
            assert_eq!(handle.extension(), None);
        }
    }

    mod file_value {
        use super::*;

        #[test]
        fn test_default_is_none() {
            assert!(FileValue::default().is_none());
        }

        #[test]
        fn test_as_pending() {
            let handle = FileHandle::new("a.pdf", 10);
            let value = FileValue::Pending(handle.clone());
            assert_eq!(value.as_pending(), Some(&handle));
            assert!(FileValue::None.as_pending().is_none());
            assert!(FileValue::Uploaded("x/y".to_string()).as_pending().is_none());
        }
    }

    mod field_value {
        use super::*;

        #[test]
        fn test_default_is_empty_text() {
            let value = FieldValue::default();
            assert_eq!(value.as_text(), "");
        }

        #[test]
        fn test_push_and_pop_char() {
            let mut value = FieldValue::default();
            value.push_char('h');
            value.push_char('i');
            assert_eq!(value.as_text(), "hi");
            value.pop_char();
            assert_eq!(value.as_text(), "h");
        }

        #[test]
        fn test_push_char_ignored_for_flag() {
            let mut value = FieldValue::flag(false);
            value.push_char('x');
            assert!(!value.as_flag());
        }

        #[test]
        fn test_clear_resets_each_kind() {
            let mut text = FieldValue::text("hello");
            text.clear();
            assert_eq!(text.as_text(), "");

            let mut flag = FieldValue::flag(true);
            flag.clear();
            assert!(!flag.as_flag());

            let mut file = FieldValue::pending_file(FileHandle::new("a.pdf", 10));
            file.clear();
            assert!(file.as_file().is_some_and(|f| f.is_none()));
        }

        #[test]
        fn test_display_value_flag() {
            assert_eq!(FieldValue::flag(true).display_value(), "Yes");
            assert_eq!(FieldValue::flag(false).display_value(), "No");
        }

        #[test]
        fn test_display_value_file() {
            assert_eq!(
                FieldValue::File(FileValue::None).display_value(),
                "(no file)"
            );
            let pending = FieldValue::pending_file(FileHandle::new("plan.pdf", 2 * 1024 * 1024));
            assert_eq!(pending.display_value(), "plan.pdf (2.0 MB)");
        }
    }
}
