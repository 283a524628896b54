//! Output sink for generated code.

use std::fmt;

/// Accumulates generated source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeWriter {
    buf: String,
}

impl CodeWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the writer, returning its text.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Iterate the written lines without terminators.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.buf.lines()
    }
}

impl fmt::Display for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_raw() {
        let mut out = CodeWriter::new();
        assert!(out.is_empty());
        out.line("a;");
        out.raw("b\nc\n");
        out.line(String::from("d;"));
        assert_eq!(out.as_str(), "a;\nb\nc\nd;\n");
        assert_eq!(out.lines().collect::<Vec<_>>(), vec!["a;", "b", "c", "d;"]);
    }
}
