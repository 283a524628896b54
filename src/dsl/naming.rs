//! Naming-rule blocks.
//!
//! A naming rule is two opaque pieces of text, one used when parsing a
//! branch name and one used when generating it:
//!
//! ```text
//! (parse)
//!   ...text copied verbatim...
//! (generate)
//!   ...text copied verbatim...
//! <end>
//! ```
//!
//! The sections may appear in either order.

use std::io::BufRead;

use tracing::warn;

use crate::codegen::CodeWriter;
use crate::error::Result;

/// Marker line switching to the parse section.
pub const PARSE_MARKER: &str = "(parse)";
/// Marker line switching to the generate section.
pub const GENERATE_MARKER: &str = "(generate)";
/// Prefix of the line terminating a block.
pub const END_MARKER: &str = "<end";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Parse,
    Generate,
}

/// Parse and generate text of a naming convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingRule {
    parse: String,
    generate: String,
}

impl NamingRule {
    /// Read a block from `source`, consuming the terminator line.
    ///
    /// Reaching the end of input before the terminator ends the block.
    pub fn read<R: BufRead>(source: &mut R) -> Result<Self> {
        let mut rule = NamingRule::default();
        let mut section = Section::None;
        let mut line = String::new();

        loop {
            line.clear();
            if source.read_line(&mut line)? == 0 {
                warn!("naming block ended without a terminator line");
                break;
            }

            if line.trim().starts_with(END_MARKER) {
                break;
            }

            if line.contains(PARSE_MARKER) {
                section = Section::Parse;
                continue;
            }

            if line.contains(GENERATE_MARKER) {
                section = Section::Generate;
                continue;
            }

            match section {
                Section::Parse => rule.parse.push_str(&line),
                Section::Generate => rule.generate.push_str(&line),
                Section::None => {}
            }
        }

        Ok(rule)
    }

    /// Read a block held in memory.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::read(&mut text.as_bytes())
    }

    /// Text of the parse section.
    pub fn parse_text(&self) -> &str {
        &self.parse
    }

    /// Text of the generate section.
    pub fn generate_text(&self) -> &str {
        &self.generate
    }

    /// Write the parse section verbatim.
    pub fn write_parse(&self, out: &mut CodeWriter) {
        out.raw(&self.parse);
    }

    /// Write the generate section verbatim.
    pub fn write_generate(&self, out: &mut CodeWriter) {
        out.raw(&self.generate);
    }
}
