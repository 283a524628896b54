//! # Branchgen
//!
//! A code generator for columnar event records.
//!
//! Each field ("branch") of a record is described by one definition line.
//! From that line the generator writes every piece of C++ the field needs:
//! - Member declarations
//! - Storage allocation and release
//! - Constructor initializer lists, assignment and reset
//! - Registration with the persistence runtime (status, address, booking)
//! - Debug dumping
//!
//! ## Architecture
//!
//! - [`dsl`] - Branch definition grammar, branch model and naming-rule blocks
//! - [`codegen`] - Role-aware emitter and output sink
//! - [`error`] - Error type shared by the crate
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! branchgen muon.def --role storage --vector > muon_storage.inc
//! ```
//!
//! ### Library
//!
//! ```
//! use branchgen::{dsl, CodeWriter, Emitter, Operation, Role};
//!
//! let branches = dsl::parse("pt/F\ncharge/B = -1\n").unwrap();
//! let emitter = Emitter::new(Role::EntryRecord);
//!
//! let mut out = CodeWriter::new();
//! emitter.emit_all(Operation::Declare, &branches, &mut out);
//! assert_eq!(out.as_str(), "Float_t pt{};\nChar_t charge{-1};\n");
//! ```

pub mod codegen;
pub mod dsl;
pub mod error;

// Re-export main types for convenience
pub use codegen::{CodeWriter, Conventions, Emitter, InitKind, Operation, Role, StorageMode};
pub use dsl::{Branch, NamingRule};
pub use error::{BranchgenError, Result};
