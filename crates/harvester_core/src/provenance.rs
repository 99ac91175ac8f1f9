/// Kind of artifact written to disk; decides extension and comment syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Script,
    Page,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Script => "js",
            ArtifactKind::Page => "html",
        }
    }
}

/// Ordered `label: value` lines recorded at the top of an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    lines: Vec<(String, String)>,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push((label.into(), value.into()));
        self
    }

    /// `// Source: <resource>`
    pub fn script(resource_url: &str) -> Self {
        Self::new().with_line("Source", resource_url)
    }

    /// `// Webpage URL: <page>` followed by `// Source: <resource>`
    pub fn script_on_page(page_url: &str, resource_url: &str) -> Self {
        Self::new()
            .with_line("Webpage URL", page_url)
            .with_line("Source", resource_url)
    }

    /// `<!-- Webpage URL: <page>-->`
    pub fn page(page_url: &str) -> Self {
        Self::new().with_line("Webpage URL", page_url)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the comment block, one newline-terminated comment per line.
    pub fn render(&self, kind: ArtifactKind) -> String {
        let mut out = String::new();
        for (label, value) in &self.lines {
            match kind {
                ArtifactKind::Script => {
                    out.push_str(&format!("// {label}: {value}\n"));
                }
                // No space before the closing marker, matching existing harvested pages.
                ArtifactKind::Page => {
                    out.push_str(&format!("<!-- {label}: {value}-->\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_header_is_single_source_line() {
        let header = Provenance::script("https://a.test/x.js").render(ArtifactKind::Script);
        assert_eq!(header, "// Source: https://a.test/x.js\n");
    }

    #[test]
    fn script_on_page_header_lists_page_first() {
        let header = Provenance::script_on_page("https://a.test/", "https://a.test/x.js")
            .render(ArtifactKind::Script);
        assert_eq!(
            header,
            "// Webpage URL: https://a.test/\n// Source: https://a.test/x.js\n"
        );
    }

    #[test]
    fn page_header_uses_html_comment() {
        let header = Provenance::page("https://a.test/").render(ArtifactKind::Page);
        assert_eq!(header, "<!-- Webpage URL: https://a.test/-->\n");
    }
}
