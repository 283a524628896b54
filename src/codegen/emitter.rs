//! Role-aware emission of branch code.
//!
//! Every output shape is selected by an [`Operation`] and the emitter's
//! [`Role`]. Which pairs produce output is decided in one place,
//! [`Operation::applies_to`]; the per-operation functions below only build
//! the text.

use std::fmt;

use tracing::trace;

use super::{CodeWriter, Conventions, Role, StorageMode};
use crate::dsl::{Branch, Dimension};

/// A statement-level output of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Member declaration
    Declare,
    /// Pointer to the vector, handed to the runtime as a stable address
    DeclareSecondaryPointer,
    /// Storage allocation to capacity
    Allocate,
    /// Storage release
    Deallocate,
    /// Enable the persisted branch
    RegisterStatus,
    /// Bind the member address to the persisted branch
    BindAddress,
    /// Create the persisted branch
    Book,
    /// Unbind the member address
    Release,
    /// Copy from a source object, used by assignment and copy construction
    Assign,
    /// Reset to the default value
    Initialize,
    /// Debug print
    Dump,
}

impl Operation {
    /// All operations, in the order [`Emitter::generate`] renders them.
    pub const ALL: [Operation; 11] = [
        Operation::Declare,
        Operation::DeclareSecondaryPointer,
        Operation::Allocate,
        Operation::Deallocate,
        Operation::Assign,
        Operation::Initialize,
        Operation::RegisterStatus,
        Operation::BindAddress,
        Operation::Book,
        Operation::Release,
        Operation::Dump,
    ];

    /// Section name used by [`Emitter::generate`].
    pub fn label(self) -> &'static str {
        match self {
            Operation::Declare => "declare",
            Operation::DeclareSecondaryPointer => "declare vector pointers",
            Operation::Allocate => "allocate",
            Operation::Deallocate => "deallocate",
            Operation::RegisterStatus => "register status",
            Operation::BindAddress => "bind address",
            Operation::Book => "book",
            Operation::Release => "release",
            Operation::Assign => "assign",
            Operation::Initialize => "initialize",
            Operation::Dump => "dump",
        }
    }

    /// Operations talking to the persistence runtime. Transient branches skip these.
    pub fn is_persistence(self) -> bool {
        matches!(
            self,
            Operation::RegisterStatus | Operation::BindAddress | Operation::Book | Operation::Release
        )
    }

    /// Whether the operation produces output in `role` with storage `mode`.
    pub fn applies_to(self, role: Role, mode: StorageMode) -> bool {
        match self {
            Operation::Declare
            | Operation::RegisterStatus
            | Operation::BindAddress
            | Operation::Book
            | Operation::Release
            | Operation::Initialize
            | Operation::Dump => true,
            Operation::DeclareSecondaryPointer => {
                role == Role::Storage && mode == StorageMode::Vector
            }
            Operation::Allocate | Operation::Deallocate => role == Role::Storage,
            Operation::Assign => role != Role::Element,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Constructor initializer-list fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitKind {
    /// Default constructor
    Default,
    /// Constructor from a storage and an index
    Standard,
    /// Copy constructor
    Copy,
}

impl InitKind {
    /// All initializer kinds.
    pub const ALL: [InitKind; 3] = [InitKind::Default, InitKind::Standard, InitKind::Copy];

    /// Section name used by [`Emitter::generate`].
    pub fn label(self) -> &'static str {
        match self {
            InitKind::Default => "default-init",
            InitKind::Standard => "standard-init",
            InitKind::Copy => "copy-init",
        }
    }

    /// Whether constructors in `role` take a fragment of this kind.
    pub fn applies_to(self, role: Role) -> bool {
        match self {
            InitKind::Default | InitKind::Standard => role == Role::Element,
            InitKind::Copy => role == Role::Element || role.is_record(),
        }
    }
}

/// Generates code for branches in one role.
#[derive(Debug, Clone)]
pub struct Emitter {
    role: Role,
    storage_mode: StorageMode,
    conventions: Conventions,
}

impl Emitter {
    /// Create an emitter with default conventions and raw array storage.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            storage_mode: StorageMode::default(),
            conventions: Conventions::default(),
        }
    }

    /// Select the storage representation. Only the storage role uses it.
    pub fn with_storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Replace the naming conventions.
    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Role code is generated for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Selected storage representation.
    pub fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    /// Naming conventions in use.
    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Emit one operation for one branch. Operations that do not apply emit nothing.
    pub fn emit(&self, op: Operation, branch: &Branch, out: &mut CodeWriter) {
        if !op.applies_to(self.role, self.storage_mode) {
            return;
        }
        if op.is_persistence() && branch.is_transient() {
            return;
        }

        match op {
            Operation::Declare => out.line(self.declare(branch)),
            Operation::DeclareSecondaryPointer => out.line(self.declare_vector_pointer(branch)),
            Operation::Allocate => self.allocate(branch, out),
            Operation::Deallocate => self.deallocate(branch, out),
            Operation::RegisterStatus => out.line(self.register_status(branch)),
            Operation::BindAddress => out.line(self.bind_address(branch)),
            Operation::Book => out.line(self.book(branch)),
            Operation::Release => out.line(self.release(branch)),
            Operation::Assign => out.line(self.assign(branch)),
            Operation::Initialize => out.line(branch.init_statement()),
            Operation::Dump => out.line(self.dump(branch)),
        }
    }

    /// Emit one operation for every branch, in definition order.
    pub fn emit_all(&self, op: Operation, branches: &[Branch], out: &mut CodeWriter) {
        trace!(operation = %op, role = %self.role, branches = branches.len(), "emitting");
        for branch in branches {
            self.emit(op, branch, out);
        }
    }

    /// Initializer-list fragment for one branch, if the branch takes part.
    pub fn init_fragment(&self, kind: InitKind, branch: &Branch) -> Option<String> {
        if !kind.applies_to(self.role) {
            return None;
        }

        let name = branch.name();
        let conv = &self.conventions;
        match (kind, self.role) {
            (InitKind::Standard, Role::Element) => Some(format!(
                "{}({}.{}[{}])",
                name, conv.element_data, name, conv.element_index
            )),
            (_, Role::Element) => Some(format!(
                "{}({}.{}[0])",
                name, conv.store_accessor, name
            )),
            // arrays are copied by `Assign` in the constructor body
            (InitKind::Copy, _) if !branch.is_array() => {
                Some(format!("{}({}.{})", name, conv.copy_source, name))
            }
            _ => None,
        }
    }

    /// Initializer-list fragments for all branches, in definition order.
    pub fn initializer_list(&self, kind: InitKind, branches: &[Branch]) -> Vec<String> {
        branches
            .iter()
            .filter_map(|branch| self.init_fragment(kind, branch))
            .collect()
    }

    /// Render every applicable operation as a commented section.
    pub fn generate(&self, branches: &[Branch]) -> CodeWriter {
        let mut out = CodeWriter::new();

        for op in Operation::ALL {
            if !op.applies_to(self.role, self.storage_mode) {
                continue;
            }
            let mut section = CodeWriter::new();
            self.emit_all(op, branches, &mut section);
            push_section(&mut out, op.label(), &section);

            if op == Operation::Declare {
                for kind in InitKind::ALL {
                    let mut section = CodeWriter::new();
                    for fragment in self.initializer_list(kind, branches) {
                        section.line(fragment);
                    }
                    push_section(&mut out, kind.label(), &section);
                }
            }
        }

        out
    }

    fn uses_vector(&self) -> bool {
        self.role == Role::Storage && self.storage_mode == StorageMode::Vector
    }

    fn qualified_name(&self, branch: &Branch) -> String {
        let ty = &self.conventions.branch_name_type;
        match self.role.qualifier(&self.conventions) {
            Some(qualifier) => format!("{}({}, \"{}\")", ty, qualifier, branch.name()),
            None => format!("{}(\"{}\")", ty, branch.name()),
        }
    }

    /// Address handed to the runtime outside vector storage.
    fn address(&self, branch: &Branch) -> String {
        if self.role == Role::Storage || branch.is_array() {
            branch.name().to_string()
        } else {
            format!("&{}", branch.name())
        }
    }

    fn declare(&self, branch: &Branch) -> String {
        let name = branch.name();
        let value_type = branch.value_type();

        let mut line = match self.role {
            Role::Storage => match self.storage_mode {
                StorageMode::Vector => format!("std::vector<{}> {};", value_type, name),
                StorageMode::RawArray => format!("{}* {}{{0}};", value_type, name),
            },
            Role::CachedRecord | Role::EntryRecord => format!(
                "{}{} {}{{{}}};",
                if branch.is_mutable() { "mutable " } else { "" },
                value_type,
                name,
                branch.initializer()
            ),
            Role::Element => format!("{}& {};", value_type, name),
        };

        if branch.is_transient() {
            line.push_str(" // transient");
        }
        if self.role != Role::Storage {
            line.push_str(branch.comment());
        }
        line
    }

    fn declare_vector_pointer(&self, branch: &Branch) -> String {
        format!(
            "std::vector<{}>* {}{{&{}}};",
            branch.value_type(),
            vector_pointer(branch),
            branch.name()
        )
    }

    fn allocate(&self, branch: &Branch, out: &mut CodeWriter) {
        let name = branch.name();
        let capacity = &self.conventions.capacity;
        match self.storage_mode {
            StorageMode::Vector => out.line(format!("{}.resize({});", name, capacity)),
            StorageMode::RawArray => out.line(format!(
                "{} = new {}[{}];",
                name,
                branch.value_type(),
                capacity
            )),
        }
    }

    fn deallocate(&self, branch: &Branch, out: &mut CodeWriter) {
        let name = branch.name();
        match self.storage_mode {
            StorageMode::Vector => out.line(format!("{}.resize(0);", name)),
            StorageMode::RawArray => {
                out.line(format!("delete [] {};", name));
                out.line(format!("{} = 0;", name));
            }
        }
    }

    fn register_status(&self, branch: &Branch) -> String {
        let conv = &self.conventions;
        format!(
            "{}({}, {}, {});",
            conv.runtime_fn("setStatus"),
            conv.tree,
            self.qualified_name(branch),
            conv.branch_list
        )
    }

    fn bind_address(&self, branch: &Branch) -> String {
        let conv = &self.conventions;
        let address = if self.uses_vector() {
            format!("&{}", vector_pointer(branch))
        } else {
            self.address(branch)
        };
        format!(
            "{}({}, {}, {}, {}, {});",
            conv.runtime_fn("setAddress"),
            conv.tree,
            self.qualified_name(branch),
            address,
            conv.branch_list,
            conv.set_status_flag
        )
    }

    fn book(&self, branch: &Branch) -> String {
        let conv = &self.conventions;

        if self.uses_vector() {
            return format!(
                "{}({}, {}, \"std::vector<{}>\", &{}, {});",
                conv.runtime_fn("book"),
                conv.tree,
                self.qualified_name(branch),
                branch.value_type(),
                vector_pointer(branch),
                conv.branch_list
            );
        }

        format!(
            "{}({}, {}, {}, '{}', {}, {});",
            conv.runtime_fn("book"),
            conv.tree,
            self.qualified_name(branch),
            self.size_descriptor(branch),
            branch.scalar_type().code(),
            self.address(branch),
            conv.branch_list
        )
    }

    /// Shape argument of `book`.
    ///
    /// Literal dimensions are written inline; symbolic ones become `%d`
    /// placeholders filled at run time, e.g. `TString::Format("[4][%d]", nMax)`.
    /// Storage booking prefixes the per-element size.
    fn size_descriptor(&self, branch: &Branch) -> String {
        let conv = &self.conventions;

        if !branch.is_array() {
            return if self.role == Role::Storage {
                conv.size_prefix.clone()
            } else {
                "\"\"".to_string()
            };
        }

        let mut pattern = String::new();
        let mut args = Vec::new();
        for dim in branch.shape() {
            match dim {
                Dimension::Literal { value, .. } => pattern.push_str(&format!("[{}]", value)),
                Dimension::Symbol(symbol) => {
                    pattern.push_str("[%d]");
                    args.push(symbol.as_str());
                }
            }
        }

        let mut shape = format!("{}(\"{}\"", conv.format_function, pattern);
        if !args.is_empty() {
            shape.push_str(", ");
            shape.push_str(&args.join(", "));
        }
        shape.push(')');

        if self.role == Role::Storage {
            format!("{} + {}", conv.size_prefix, shape)
        } else {
            shape
        }
    }

    fn release(&self, branch: &Branch) -> String {
        let conv = &self.conventions;
        format!(
            "{}({}, {});",
            conv.runtime_fn("resetAddress"),
            conv.tree,
            self.qualified_name(branch)
        )
    }

    fn assign(&self, branch: &Branch) -> String {
        let name = branch.name();
        let src = &self.conventions.copy_source;
        if branch.is_array() {
            format!(
                "std::memcpy({}, {}.{}, sizeof({}) * {});",
                name,
                src,
                name,
                branch.type_name(),
                branch.shape().element_count()
            )
        } else {
            format!("{} = {}.{};", name, src, name)
        }
    }

    fn dump(&self, branch: &Branch) -> String {
        let conv = &self.conventions;
        let name = branch.name();
        let value = match branch.scalar_type().print_widened() {
            Some(wide) if !branch.is_array() => {
                format!("static_cast<const {}>({})", wide.type_name(), name)
            }
            _ => name.to_string(),
        };
        format!(
            "{} << {} << \"{} = \" << {} << std::endl;",
            conv.dump_stream, conv.dump_indent, name, value
        )
    }
}

fn vector_pointer(branch: &Branch) -> String {
    format!("{}Ptr_", branch.name())
}

fn push_section(out: &mut CodeWriter, label: &str, section: &CodeWriter) {
    if section.is_empty() {
        return;
    }
    out.line(format!("// {}", label));
    out.raw(section.as_str());
    out.line("");
}
