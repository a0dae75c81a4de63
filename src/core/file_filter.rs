use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File-type filters offered by the file chooser. Each maps a label to
/// exactly one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileFilter {
    #[default]
    Text,
    JavaSource,
    Html,
    Xml,
}

impl FileFilter {
    pub const ALL: [FileFilter; 4] = [
        FileFilter::Text,
        FileFilter::JavaSource,
        FileFilter::Html,
        FileFilter::Xml,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FileFilter::Text => "Text Documents (*.txt)",
            FileFilter::JavaSource => "Java Source Files (*.java)",
            FileFilter::Html => "HTML Files (*.html)",
            FileFilter::Xml => "XML Files (*.xml)",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileFilter::Text => "txt",
            FileFilter::JavaSource => "java",
            FileFilter::Html => "html",
            FileFilter::Xml => "xml",
        }
    }

    /// Whether a file is listed under this filter. Extension comparison
    /// ignores case, like desktop file dialogs do.
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(self.extension()))
            .unwrap_or(false)
    }

    /// Appends `.<ext>` unless the file name already ends with it.
    pub fn apply_extension(self, path: PathBuf) -> PathBuf {
        let suffix = format!(".{}", self.extension());
        let has_suffix = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(&suffix))
            .unwrap_or(false);
        if has_suffix {
            return path;
        }

        let mut raw: OsString = path.into_os_string();
        raw.push(&suffix);
        PathBuf::from(raw)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_missing_extension() {
        assert_eq!(
            FileFilter::Text.apply_extension(PathBuf::from("notes")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            FileFilter::Html.apply_extension(PathBuf::from("dir/page.htm")),
            PathBuf::from("dir/page.htm.html")
        );
    }

    #[test]
    fn test_keeps_existing_extension() {
        assert_eq!(
            FileFilter::JavaSource.apply_extension(PathBuf::from("src/Main.java")),
            PathBuf::from("src/Main.java")
        );
    }

    #[test]
    fn test_extension_check_is_case_sensitive() {
        assert_eq!(
            FileFilter::Xml.apply_extension(PathBuf::from("DATA.XML")),
            PathBuf::from("DATA.XML.xml")
        );
    }

    #[test]
    fn test_matches_ignores_case() {
        assert!(FileFilter::Xml.matches(Path::new("DATA.XML")));
        assert!(!FileFilter::Xml.matches(Path::new("data.txt")));
        assert!(!FileFilter::Text.matches(Path::new("README")));
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(FileFilter::Xml.next(), FileFilter::Text);
        assert_eq!(FileFilter::Text.prev(), FileFilter::Xml);
        assert_eq!(FileFilter::default().label(), "Text Documents (*.txt)");
    }
}
