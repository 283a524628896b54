//! Definition language for branches.
//!
//! Each branch of a record is described by one line. The line names the
//! branch, its array shape, its scalar type and optional modifiers, a
//! default literal and a trailing comment.
//!
//! # Grammar Overview
//!
//! ```text
//! line        = name { "[" dimension "]" } "/" type [ "/" modifiers ] [ " = " literal ] [ " //" comment ]
//! name        = (letter | '_') { letter | digit | '_' }
//! dimension   = integer | constant_expression
//! modifiers   = { "!" | "m" }
//! literal     = (letter | digit | '_' | '.' | '-')+
//! ```
//!
//! # Type Codes
//!
//! | Code | Storage type | Code | Storage type |
//! |------|--------------|------|--------------|
//! | C | `Text_t const*` | i | `UInt_t` |
//! | B | `Char_t` | L | `Long64_t` |
//! | b | `UChar_t` | l | `ULong64_t` |
//! | S | `Short_t` | F | `Float_t` |
//! | s | `UShort_t` | D | `Double_t` |
//! | I | `Int_t` | O | `Bool_t` |
//!
//! # Modifiers
//!
//! | Letter | Meaning |
//! |--------|---------|
//! | `!` | transient: never registered with the persistence runtime |
//! | `m` | mutable: declared `mutable` in record roles |
//!
//! # Example
//!
//! ```text
//! pt/F
//! charge/B = -1
//! hits[4][nMaxHits]/s      // per layer
//! isSelected/O/!           // analysis scratch flag
//! ```

mod ast;
mod grammar;
mod naming;
mod parser;

pub use ast::*;
pub use grammar::{match_branch, BranchCaptures};
pub use naming::{NamingRule, END_MARKER, GENERATE_MARKER, PARSE_MARKER};
pub use parser::parse_branches;

use crate::error::Result;

/// Parse a branch definition source into branches, in definition order.
pub fn parse(input: &str) -> Result<Vec<Branch>> {
    parse_branches(input)
}

/// Parse a branch definition file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Vec<Branch>> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::BranchgenError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
