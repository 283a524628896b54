//! Code generation for branches.
//!
//! The same [`Branch`](crate::dsl::Branch) is rendered differently depending
//! on the class it lives in:
//!
//! | Role | Holds | Persisted name |
//! |------|-------|----------------|
//! | storage | one value per collection element | `BranchName(_name, "x")` |
//! | cached record | its own value | `BranchName(name_, "x")` |
//! | entry record | its own value | `BranchName("x")` |
//! | element | a reference into storage | `BranchName(_name, "x")` |
//!
//! Storage comes in two flavours ([`StorageMode`]): a raw heap array of
//! fixed capacity, or a `std::vector` whose address is passed to the
//! runtime through an auxiliary pointer.
//!
//! Branches marked transient are declared, initialized, copied and dumped
//! like any other, but never reach the persistence runtime.

mod conventions;
mod emitter;
mod role;
mod writer;

pub use conventions::{Conventions, DEFAULT_CAPACITY, DEFAULT_RUNTIME_NAMESPACE};
pub use emitter::{Emitter, InitKind, Operation};
pub use role::{Role, StorageMode};
pub use writer::CodeWriter;
