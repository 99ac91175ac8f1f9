/// Well-known third-party libraries whose scripts are not worth harvesting.
pub const DEFAULT_LIBRARIES: &[&str] = &[
    "jquery",
    "bootstrap",
    "angular",
    "react",
    "vue",
    "lodash",
    "moment",
    "underscore",
];

/// Classifies resource URLs as common (ignorable) or interesting by
/// case-insensitive substring match against a library name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFilter {
    names: Vec<String>,
}

impl LibraryFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// A filter that never matches.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    pub fn is_common(&self, url: &str) -> bool {
        if self.names.is_empty() {
            return false;
        }
        let lower = url.to_lowercase();
        self.names.iter().any(|name| lower.contains(name.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for LibraryFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARIES)
    }
}
