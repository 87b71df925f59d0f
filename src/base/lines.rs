//! Source line splitting.

/// An ordered sequence of raw source lines.
///
/// Lines are split on `\n`; a trailing `\r` is removed so that both Unix
/// and Windows line endings are accepted. A leading UTF-8 BOM is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    lines: Vec<String>,
}

impl SourceLines {
    pub fn from_source(source: &str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.lines
    }
}
